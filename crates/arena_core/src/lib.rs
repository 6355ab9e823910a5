//! Combat resolution and round progression for arena matches.
//!
//! A [`MatchDirector`] owns one match at a time. Each round it draws a single
//! number, lets the event scheduler apply battlefield events, resolves the
//! exchange, reports a summary and checks whether a side is out.

pub mod combat;
pub mod combatant;
pub mod config;
pub mod consumable;
pub mod context;
pub mod director;
pub mod error;
pub mod event_scheduler;
pub mod events;
pub mod observer;
pub mod referee;
pub mod rng;
pub mod round_state;
pub mod team;
pub mod ticker;

pub use combat::{check_victory_condition, Contest, Victory};
pub use combatant::{Attack, AttackKind, Combatant, FighterClass, FighterTemplate};
pub use config::{ArenaConfig, Window};
pub use consumable::{Consumable, ConsumableSource, ConsumableTable};
pub use director::{Contestants, MatchDirector, MatchMode, MatchOutcome};
pub use error::{ArenaError, Result};
pub use events::{EventKind, GameEvent};
pub use observer::{Cue, MatchObserver, Notice, RecordingObserver, TracingObserver};
pub use referee::RoundSummary;
pub use rng::{RandomSource, ScriptedRng, SimulationParams, SimulationRng};
pub use round_state::RoundState;
pub use team::{Side, Team};
pub use ticker::{IntervalScheduler, StepScheduler, TickHandle, TickScheduler};

/// Builds a combatant from a roster entry, applying class balance when the
/// config asks for it.
pub fn combatant_from_template(config: &ArenaConfig, template: &FighterTemplate) -> Combatant {
    if config.combat.apply_class_modifiers {
        Combatant::with_class_modifiers(template, config.classes.modifiers(template.class))
    } else {
        Combatant::from_template(template)
    }
}
