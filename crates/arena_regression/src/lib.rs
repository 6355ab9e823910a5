//! Helpers for deterministic regression tests.

use arena_core::{
    ArenaConfig, Combatant, MatchDirector, RandomSource, RecordingObserver, ScriptedRng,
    SimulationParams, SimulationRng, StepScheduler, Team,
};
use serde_json::json;

pub const DEFAULT_SEED: u64 = 42;

type Director = MatchDirector<RecordingObserver, StepScheduler>;

fn director(rng: Box<dyn RandomSource>) -> Director {
    MatchDirector::new(
        ArenaConfig::default(),
        rng,
        RecordingObserver::new(),
        StepScheduler::new(),
    )
}

fn trace(director: &Director) -> serde_json::Value {
    json!({
        "rounds": director.rounds_played(),
        "outcome": director.outcome(),
        "transcript": director.observer().transcript(),
    })
}

/// Plays Gosho against Ivan to the end with a seeded generator.
pub fn simulate_single(seed: u64) -> serde_json::Value {
    let params = SimulationParams::from_seed(seed);
    let mut d = director(Box::new(SimulationRng::from(&params)));
    d.start_game(
        Combatant::new(1, "Gosho", 400, 10),
        Combatant::new(2, "Ivan", 300, 20),
    );
    d.run_until_finished();
    trace(&d)
}

pub fn simulate_teams(seed: u64) -> serde_json::Value {
    let mut d = director(Box::new(SimulationRng::new(seed)));
    d.start_team_match(
        Team::new(
            "Team One",
            vec![
                Combatant::new(1, "Gosho", 400, 10),
                Combatant::new(2, "Ivan", 300, 20),
            ],
        ),
        Team::new(
            "Team Two",
            vec![
                Combatant::new(3, "Petar", 350, 11),
                Combatant::new(4, "Jivko", 600, 4),
            ],
        ),
    );
    d.run_until_finished();
    trace(&d)
}

/// Replays a 1v1 match from a fixed list of draws and returns the
/// announcer transcript.
pub fn scripted_single(
    draws: impl IntoIterator<Item = i64>,
    first: Combatant,
    second: Combatant,
) -> Vec<String> {
    let mut d = director(Box::new(ScriptedRng::new(draws)));
    d.start_game(first, second);
    d.run_until_finished();
    d.observer().transcript()
}
