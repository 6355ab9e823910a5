//! Notification sinks. The engine reports everything it does as [`Notice`]s
//! (announcer text) and [`Cue`]s (sound/animation hooks); it never waits on or
//! inspects what a sink does with them.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::combatant::AttackKind;
use crate::director::MatchMode;
use crate::referee::RoundSummary;
use crate::team::Side;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    MatchIntro {
        mode: MatchMode,
        first: String,
        second: String,
    },
    Introduce {
        side: Side,
        name: String,
        health: i32,
        strength: u32,
    },
    Round {
        number: u32,
    },
    Attack {
        attacker: String,
        kind: AttackKind,
        damage: u32,
        missed: bool,
    },
    Target {
        attacker: String,
        defender: String,
    },
    Eliminated {
        fighter: String,
        team: String,
    },
    Consumed {
        fighter: String,
        item: String,
        amount: u32,
    },
    EventStarted {
        name: String,
        description: String,
        rounds: u32,
    },
    EventEffect {
        event: String,
        fighter: String,
        amount: i32,
    },
    EventExpired {
        name: String,
    },
    Summary(RoundSummary),
    Victory {
        winner: String,
        is_team: bool,
    },
    Draw {
        rounds: u32,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::MatchIntro { mode, first, second } => match mode {
                MatchMode::Single => write!(
                    f,
                    "BATTLE ARENA: {first} vs {second}. Two warriors enter, only one will emerge victorious!"
                ),
                MatchMode::Team => write!(
                    f,
                    "TEAM BATTLE: {first} vs {second}. Two teams clash in an epic showdown!"
                ),
            },
            Notice::Introduce {
                name,
                health,
                strength,
                ..
            } => write!(f, "{name} (health {health}, strength {strength})"),
            Notice::Round { number } => write!(f, "Round {number} - FIGHT!"),
            Notice::Attack {
                attacker,
                kind,
                damage,
                missed,
            } => match (kind, missed) {
                (AttackKind::Normal, true) => {
                    write!(f, "{attacker} swung but missed completely! (0 damage)")
                }
                (AttackKind::Special, true) => write!(
                    f,
                    "{attacker} attempted a special attack but it failed! (0 damage)"
                ),
                (AttackKind::Normal, false) => {
                    write!(f, "{attacker} landed a solid hit! ({damage} damage)")
                }
                (AttackKind::Special, false) => write!(
                    f,
                    "{attacker} unleashed a devastating special attack! ({damage} damage)"
                ),
            },
            Notice::Target { attacker, defender } => write!(f, "{attacker} attacked {defender}."),
            Notice::Eliminated { fighter, team } => {
                write!(f, "{fighter} has fallen and leaves {team}.")
            }
            Notice::Consumed {
                fighter,
                item,
                amount,
            } => write!(f, "{fighter} consumed {item} which gave {amount} HP."),
            Notice::EventStarted {
                name, description, ..
            } => write!(f, "{}: {description}", name.to_uppercase()),
            Notice::EventEffect {
                event,
                fighter,
                amount,
            } => write!(f, "{fighter} takes {amount} HP damage from {event}."),
            Notice::EventExpired { name } => write!(f, "{name} has passed."),
            Notice::Summary(summary) => write!(f, "{summary}"),
            Notice::Victory { winner, is_team } => {
                if *is_team {
                    write!(f, "VICTORY! {winner} has dominated the battlefield!")
                } else {
                    write!(f, "VICTORY! {winner} has won the battle!")
                }
            }
            Notice::Draw { rounds } => {
                write!(f, "No winner after {rounds} rounds. The match is a draw.")
            }
        }
    }
}

/// Presentation hooks for sound and floating numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum Cue {
    Hit { fighter_id: u32, damage: u32 },
    Special { fighter_id: u32, damage: u32 },
    Miss { fighter_id: u32 },
    Heal { fighter_id: u32, amount: u32 },
    Event,
}

pub trait MatchObserver {
    fn notice(&mut self, notice: &Notice);

    fn cue(&mut self, _cue: Cue) {}
}

impl MatchObserver for () {
    fn notice(&mut self, _notice: &Notice) {}
}

impl<A: MatchObserver, B: MatchObserver> MatchObserver for (A, B) {
    fn notice(&mut self, notice: &Notice) {
        self.0.notice(notice);
        self.1.notice(notice);
    }

    fn cue(&mut self, cue: Cue) {
        self.0.cue(cue);
        self.1.cue(cue);
    }
}

/// Forwards every notice to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MatchObserver for TracingObserver {
    fn notice(&mut self, notice: &Notice) {
        match notice {
            Notice::Summary(summary) => {
                debug!(target: "arena.match", round = summary.round, "{summary}")
            }
            Notice::EventStarted { .. } | Notice::EventEffect { .. } | Notice::EventExpired { .. } => {
                info!(target: "arena.event", "{notice}")
            }
            Notice::Attack { .. }
            | Notice::Target { .. }
            | Notice::Consumed { .. }
            | Notice::Eliminated { .. } => info!(target: "arena.combat", "{notice}"),
            _ => info!(target: "arena.match", "{notice}"),
        }
    }

    fn cue(&mut self, cue: Cue) {
        debug!(target: "arena.fx", ?cue, "cue");
    }
}

/// Keeps every notice and cue in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    notices: Vec<Notice>,
    cues: Vec<Cue>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn transcript(&self) -> Vec<String> {
        self.notices.iter().map(ToString::to_string).collect()
    }

    pub fn count(&self, pred: impl Fn(&Notice) -> bool) -> usize {
        self.notices.iter().filter(|n| pred(n)).count()
    }
}

impl MatchObserver for RecordingObserver {
    fn notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
