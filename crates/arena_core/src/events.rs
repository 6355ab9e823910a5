//! The battlefield event catalog.
//!
//! Events are plain data: a kind, a scope, a duration and an HP delta. A
//! single interpreter, [`apply_effect`], turns that data into health changes.

use serde::Serialize;

use crate::combatant::Combatant;
use crate::observer::{MatchObserver, Notice};
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Earthquake,
    FullMoon,
    PoisonedFood,
    LightningStorm,
    FireEruption,
    Blizzard,
}

pub const CATALOG: [EventKind; 6] = [
    EventKind::Earthquake,
    EventKind::FullMoon,
    EventKind::PoisonedFood,
    EventKind::LightningStorm,
    EventKind::FireEruption,
    EventKind::Blizzard,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventScope {
    /// Hits both sides.
    Global,
    /// Hits one side, chosen on the first tick and kept for the duration.
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Magnitude {
    Flat(i32),
    /// Percent of each fighter's current health, rounded half up.
    PercentOfCurrent(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub scope: EventScope,
    pub duration: u32,
    pub magnitude: Magnitude,
}

impl EventKind {
    pub const fn spec(self) -> EventSpec {
        match self {
            EventKind::Earthquake => EventSpec {
                name: "Earthquake",
                description: "The ground violently shakes beneath everyone! All fighters take 100 HP damage.",
                scope: EventScope::Global,
                duration: 1,
                magnitude: Magnitude::Flat(100),
            },
            EventKind::FullMoon => EventSpec {
                name: "Full Moon",
                description: "Wild beasts emerge under the full moon, attacking one team! All fighters lose 50% HP.",
                scope: EventScope::Team,
                duration: 1,
                magnitude: Magnitude::PercentOfCurrent(50),
            },
            EventKind::PoisonedFood => EventSpec {
                name: "Poisoned Food",
                description: "One team's supplies are contaminated! They suffer 20 HP poison damage per round for 5 rounds.",
                scope: EventScope::Team,
                duration: 5,
                magnitude: Magnitude::Flat(20),
            },
            EventKind::LightningStorm => EventSpec {
                name: "Lightning Storm",
                description: "Lightning strikes the battlefield! Everyone takes 50 HP damage for 2 rounds.",
                scope: EventScope::Global,
                duration: 2,
                magnitude: Magnitude::Flat(50),
            },
            EventKind::FireEruption => EventSpec {
                name: "Fire Eruption",
                description: "Flames engulf one team! They burn for 30 HP per round for 3 rounds.",
                scope: EventScope::Team,
                duration: 3,
                magnitude: Magnitude::Flat(30),
            },
            EventKind::Blizzard => EventSpec {
                name: "Blizzard",
                description: "A freezing blizzard hits everyone! All fighters take 15 HP for 4 rounds.",
                scope: EventScope::Global,
                duration: 4,
                magnitude: Magnitude::Flat(15),
            },
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Health a fighter at `health` loses from one tick of this event.
    pub fn health_loss(self, health: i32) -> i32 {
        match self.spec().magnitude {
            Magnitude::Flat(amount) => amount,
            Magnitude::PercentOfCurrent(pct) => {
                (health as f64 * pct as f64 / 100.0 + 0.5).floor() as i32
            }
        }
    }
}

/// An event in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub rounds_left: u32,
}

impl GameEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            rounds_left: kind.spec().duration,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn description(&self) -> &'static str {
        self.kind.spec().description
    }

    pub fn is_global(&self) -> bool {
        self.kind.spec().scope == EventScope::Global
    }

    pub fn is_team_event(&self) -> bool {
        self.kind.spec().scope == EventScope::Team
    }

    pub fn announce(&self) -> Notice {
        Notice::EventStarted {
            name: self.name().to_string(),
            description: self.description().to_string(),
            rounds: self.rounds_left,
        }
    }
}

/// Picks one catalog entry uniformly.
pub fn generate_event(rng: &mut dyn RandomSource) -> GameEvent {
    GameEvent::new(CATALOG[rng.pick_index(CATALOG.len())])
}

/// Applies one tick of `kind` to every fighter in `fighters`.
pub fn apply_effect(kind: EventKind, fighters: &mut [Combatant], observer: &mut dyn MatchObserver) {
    for fighter in fighters.iter_mut() {
        let loss = kind.health_loss(fighter.health);
        fighter.health = fighter.health.saturating_sub(loss);
        observer.notice(&Notice::EventEffect {
            event: kind.name().to_string(),
            fighter: fighter.name.clone(),
            amount: loss,
        });
    }
}
