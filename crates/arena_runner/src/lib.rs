//! Headless driver for arena matches: a bevy app whose clock feeds the
//! director's round scheduler.

pub mod report;

use std::collections::HashSet;

use arena_core::{
    combatant_from_template, ArenaConfig, ArenaError, Combatant, IntervalScheduler,
    MatchDirector, RecordingObserver, SimulationRng, Team, TracingObserver,
};
use bevy::prelude::*;
use tracing::info;

pub type RunnerObserver = (TracingObserver, RecordingObserver);
pub type RunnerDirector = MatchDirector<RunnerObserver, IntervalScheduler>;

/// Ticks the [`RunnerDirector`] non-send resource from bevy's `Time`.
pub struct MatchLoopPlugin;

impl Plugin for MatchLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MatchStatus>()
            .add_systems(Update, drive_match);
    }
}

#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchStatus {
    pub rounds: u32,
    pub finished: bool,
}

fn drive_match(
    time: Res<Time>,
    mut director: NonSendMut<RunnerDirector>,
    mut status: ResMut<MatchStatus>,
) {
    if !director.is_running() {
        return;
    }
    let played = director.advance(time.delta());
    if played > 0 {
        status.rounds = director.rounds_played();
    }
    if !director.is_running() {
        status.finished = director.is_finished();
        info!(target: "arena.match", rounds = status.rounds, "round loop finished");
    }
}

pub fn new_director(config: ArenaConfig, seed: u64) -> RunnerDirector {
    MatchDirector::new(
        config,
        Box::new(SimulationRng::new(seed)),
        (TracingObserver, RecordingObserver::new()),
        IntervalScheduler::new(),
    )
}

pub fn fighter(config: &ArenaConfig, id: u32) -> arena_core::Result<Combatant> {
    let template = config.fighter(id)?;
    Ok(combatant_from_template(config, template))
}

/// Fails on the first id that appears twice. Ids identify fighters for the
/// whole match, across both sides.
pub fn ensure_distinct<'a>(ids: impl IntoIterator<Item = &'a u32>) -> arena_core::Result<()> {
    let mut seen = HashSet::new();
    for &id in ids {
        if !seen.insert(id) {
            return Err(ArenaError::DuplicateFighter(id));
        }
    }
    Ok(())
}

pub fn build_team(config: &ArenaConfig, name: &str, ids: &[u32]) -> arena_core::Result<Team> {
    ensure_distinct(ids)?;
    let fighters = ids
        .iter()
        .map(|&id| fighter(config, id))
        .collect::<arena_core::Result<Vec<_>>>()?;
    Ok(Team::new(name, fighters))
}
