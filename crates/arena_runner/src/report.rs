use arena_core::{MatchMode, MatchOutcome, Notice};
use chrono::Utc;
use serde::Serialize;

use crate::RunnerDirector;

/// JSON record of one finished (or stopped) match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub id: String,
    pub timestamp: String,
    pub seed: u64,
    pub mode: Option<MatchMode>,
    pub rounds: u32,
    pub outcome: Option<MatchOutcome>,
    pub transcript: Vec<String>,
    pub notices: Vec<Notice>,
}

impl MatchReport {
    pub fn new(id: impl Into<String>, seed: u64, director: &RunnerDirector) -> Self {
        let (_, recording) = director.observer();
        Self {
            id: id.into(),
            timestamp: Utc::now().to_rfc3339(),
            seed,
            mode: director.contestants().map(|c| c.mode()),
            rounds: director.rounds_played(),
            outcome: director.outcome().cloned(),
            transcript: recording.transcript(),
            notices: recording.notices().to_vec(),
        }
    }

    pub fn headline(&self) -> String {
        match &self.outcome {
            Some(MatchOutcome::Winner(v)) => {
                format!("{} won after {} rounds", v.winner, self.rounds)
            }
            Some(MatchOutcome::Draw { rounds }) => format!("draw after {rounds} rounds"),
            None => format!("stopped after {} rounds", self.rounds),
        }
    }
}

pub fn default_run_id() -> String {
    format!("match-{}", Utc::now().format("%Y%m%dT%H%M%S"))
}
