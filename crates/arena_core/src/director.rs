//! The round loop. A director owns at most one match at a time: starting a
//! new one always stops whatever was running first.

use std::slice;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::combat::{
    check_victory_condition, process_single_combat, process_team_combat, Contest, Victory,
};
use crate::combatant::Combatant;
use crate::config::ArenaConfig;
use crate::consumable::{ConsumableSource, ConsumableTable};
use crate::context::RoundContext;
use crate::event_scheduler::process_round_event;
use crate::observer::{MatchObserver, Notice};
use crate::referee::{self, RoundSummary};
use crate::rng::RandomSource;
use crate::round_state::RoundState;
use crate::team::Team;
use crate::ticker::TickScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Single,
    Team,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Contestants {
    Single { first: Combatant, second: Combatant },
    Teams { one: Team, two: Team },
}

impl Contestants {
    pub fn mode(&self) -> MatchMode {
        match self {
            Contestants::Single { .. } => MatchMode::Single,
            Contestants::Teams { .. } => MatchMode::Team,
        }
    }

    pub fn contest(&self) -> Contest<'_> {
        match self {
            Contestants::Single { first, second } => Contest::Single(first, second),
            Contestants::Teams { one, two } => Contest::Teams(one, two),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchOutcome {
    Winner(Victory),
    /// The round cap was hit with both sides still standing.
    Draw { rounds: u32 },
}

pub struct MatchDirector<O, S> {
    config: ArenaConfig,
    rng: Box<dyn RandomSource>,
    consumables: Box<dyn ConsumableSource>,
    observer: O,
    scheduler: S,
    state: RoundState,
    contestants: Option<Contestants>,
    outcome: Option<MatchOutcome>,
    rounds_played: u32,
}

impl<O: MatchObserver, S: TickScheduler> MatchDirector<O, S> {
    pub fn new(config: ArenaConfig, rng: Box<dyn RandomSource>, observer: O, scheduler: S) -> Self {
        let consumables = Box::new(ConsumableTable::new(config.consumables.items.clone()));
        Self {
            config,
            rng,
            consumables,
            observer,
            scheduler,
            state: RoundState::new(),
            contestants: None,
            outcome: None,
            rounds_played: 0,
        }
    }

    pub fn with_consumables(mut self, consumables: Box<dyn ConsumableSource>) -> Self {
        self.consumables = consumables;
        self
    }

    pub fn start_game(&mut self, first: Combatant, second: Combatant) {
        self.stop_game();
        for notice in referee::introduce_fighters(&first, &second) {
            self.observer.notice(&notice);
        }
        self.begin(Contestants::Single { first, second });
    }

    pub fn start_team_match(&mut self, one: Team, two: Team) {
        self.stop_game();
        for notice in referee::introduce_teams(&one, &two) {
            self.observer.notice(&notice);
        }
        self.begin(Contestants::Teams { one, two });
    }

    fn begin(&mut self, contestants: Contestants) {
        self.state = RoundState::new();
        self.outcome = None;
        self.rounds_played = 0;
        info!(
            target: "arena.match",
            mode = ?contestants.mode(),
            interval_ms = self.config.combat.round_interval_ms,
            "match started"
        );
        self.contestants = Some(contestants);
        let handle = self.scheduler.start(self.config.round_interval());
        self.state.attach(handle);
    }

    /// Stops the round loop. Safe to call when idle or more than once.
    pub fn stop_game(&mut self) {
        if let Some(handle) = self.state.stop() {
            self.scheduler.cancel(handle);
            debug!(target: "arena.match", rounds = self.rounds_played, "match stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Feeds elapsed time to the scheduler and plays every round that came
    /// due. Returns the number of rounds played.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.scheduler.poll(elapsed);
        let mut played = 0;
        for _ in 0..due {
            if self.tick().is_none() {
                break;
            }
            played += 1;
        }
        played
    }

    /// Plays rounds back to back until the match ends.
    pub fn run_until_finished(&mut self) -> Option<&MatchOutcome> {
        while self.tick().is_some() {}
        self.outcome.as_ref()
    }

    /// Plays one round. Returns `None` when no match is running.
    pub fn tick(&mut self) -> Option<RoundSummary> {
        if !self.state.is_running() {
            return None;
        }
        let round = self.state.start_round();
        self.rounds_played = round;
        self.observer.notice(&referee::round_banner(round));

        let contestants = self.contestants.as_mut()?;
        let mut ctx = RoundContext::new(
            self.rng.as_mut(),
            self.consumables.as_ref(),
            &mut self.observer,
            &self.config,
        );

        let summary = match contestants {
            Contestants::Single { first, second } => {
                let draw = ctx.rng.random_int(0, ctx.config.draws.single_round);
                let window = ctx.config.events.single;
                process_round_event(
                    &mut self.state,
                    slice::from_mut(first),
                    slice::from_mut(second),
                    draw,
                    window,
                    &mut ctx,
                );
                process_single_combat(first, second, draw, &mut ctx);
                RoundSummary::single(round, first, second)
            }
            Contestants::Teams { one, two } => {
                let draw = ctx.rng.random_int(0, ctx.config.draws.team_round);
                let window = ctx.config.events.team;
                process_round_event(
                    &mut self.state,
                    one.fighters_mut(),
                    two.fighters_mut(),
                    draw,
                    window,
                    &mut ctx,
                );
                prune_fallen(one, &mut ctx);
                prune_fallen(two, &mut ctx);
                if draw < window.midpoint() {
                    process_team_combat(one, two, &mut ctx);
                } else {
                    process_team_combat(two, one, &mut ctx);
                }
                RoundSummary::teams(round, one, two)
            }
        };
        ctx.observer.notice(&Notice::Summary(summary.clone()));

        let victory = check_victory_condition(contestants.contest());
        if let Some(victory) = victory {
            self.finish(MatchOutcome::Winner(victory));
        } else if round >= self.config.combat.max_rounds {
            warn!(target: "arena.match", rounds = round, "round cap reached without a winner");
            self.finish(MatchOutcome::Draw { rounds: round });
        }
        Some(summary)
    }

    fn finish(&mut self, outcome: MatchOutcome) {
        let notice = match &outcome {
            MatchOutcome::Winner(victory) => {
                info!(
                    target: "arena.match",
                    winner = %victory.winner,
                    team = victory.is_team,
                    rounds = self.rounds_played,
                    "match won"
                );
                referee::declare_winner(&victory.winner, victory.is_team)
            }
            MatchOutcome::Draw { rounds } => Notice::Draw { rounds: *rounds },
        };
        self.observer.notice(&notice);
        self.outcome = Some(outcome);
        self.stop_game();
    }

    pub fn contestants(&self) -> Option<&Contestants> {
        self.contestants.as_ref()
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn round_state(&self) -> &RoundState {
        &self.state
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

/// Event damage can drop team members without a strike; they leave before
/// the exchange so they can neither attack nor be targeted.
fn prune_fallen(team: &mut Team, ctx: &mut RoundContext<'_>) {
    for fallen in team.remove_fallen() {
        ctx.observer.notice(&Notice::Eliminated {
            fighter: fallen.name,
            team: team.name.clone(),
        });
    }
}
