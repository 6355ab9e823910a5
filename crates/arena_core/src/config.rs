use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combatant::{FighterClass, FighterTemplate};
use crate::consumable::{default_consumables, Consumable};
use crate::error::{ArenaError, Result};

/// Exclusive `(min, max)` window a round draw is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub min: i64,
    pub max: i64,
}

impl Window {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(self, draw: i64) -> bool {
        draw > self.min && draw < self.max
    }

    pub fn midpoint(self) -> i64 {
        ((i128::from(self.min) + i128::from(self.max)) / 2) as i64
    }
}

/// Inclusive `[min, max]` additive damage bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub min: i64,
    pub max: i64,
}

impl Bonus {
    /// Exclusive upper bound for the draw. Saturates at `i64::MAX`.
    pub fn upper_exclusive(self) -> i64 {
        self.max.saturating_add(1)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub combat: CombatSettings,
    pub draws: DrawSettings,
    pub events: EventSettings,
    pub consumables: ConsumableSettings,
    pub classes: ClassTable,
    pub telemetry: TelemetryConfig,
    pub fighters: Vec<FighterTemplate>,
}

impl ArenaConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| ArenaError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::parse(&data)?;
        debug!(
            target: "arena.config",
            path = %path.display(),
            fighters = cfg.fighters.len(),
            items = cfg.consumables.items.len(),
            "config loaded"
        );
        Ok(cfg)
    }

    pub fn parse(data: &str) -> Result<Self> {
        let cfg: ArenaConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let windows = [
            ("events.single", self.events.single),
            ("events.team", self.events.team),
            ("consumables.single.attacker", self.consumables.single.attacker),
            ("consumables.single.defender", self.consumables.single.defender),
            ("consumables.team.chance", self.consumables.team.chance),
        ];
        for (label, window) in windows {
            if window.min >= window.max {
                return Err(invalid(format!(
                    "{label} window ({}, {}) is empty",
                    window.min, window.max
                )));
            }
        }

        let draws = [
            ("draws.single_round", self.draws.single_round),
            ("draws.team_round", self.draws.team_round),
            ("draws.attack_roll", self.draws.attack_roll),
            ("draws.team_consumable_roll", self.draws.team_consumable_roll),
        ];
        for (label, range) in draws {
            if range <= 0 {
                return Err(invalid(format!("{label} must be positive, got {range}")));
            }
        }

        let combat = &self.combat;
        for (label, value) in [
            ("combat.normal_attack_multiplier", combat.normal_attack_multiplier),
            ("combat.special_attack_multiplier", combat.special_attack_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{label} must be a non-negative number")));
            }
        }
        for (label, bonus) in [
            ("combat.normal_attack_bonus", combat.normal_attack_bonus),
            ("combat.special_attack_bonus", combat.special_attack_bonus),
        ] {
            if bonus.min > bonus.max {
                return Err(invalid(format!(
                    "{label} has min {} above max {}",
                    bonus.min, bonus.max
                )));
            }
        }
        if combat.max_rounds == 0 {
            return Err(invalid("combat.max_rounds must be at least 1".into()));
        }

        if let Some(item) = self.consumables.items.iter().find(|c| c.health < 0) {
            return Err(invalid(format!(
                "consumable {} heals a negative amount",
                item.name
            )));
        }

        let mut seen = HashSet::new();
        for fighter in &self.fighters {
            if !seen.insert(fighter.id) {
                return Err(invalid(format!("duplicate fighter id {}", fighter.id)));
            }
        }
        Ok(())
    }

    pub fn fighter(&self, id: u32) -> Result<&FighterTemplate> {
        self.fighters
            .iter()
            .find(|f| f.id == id)
            .ok_or(ArenaError::UnknownFighter(id))
    }

    pub fn round_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.combat.round_interval_ms)
    }
}

fn invalid(msg: String) -> ArenaError {
    ArenaError::InvalidConfig(msg)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    pub round_interval_ms: u64,
    /// Percent of hits that are normal attacks; the rest are specials.
    pub normal_attack_chance: i64,
    pub miss_chance: i64,
    pub normal_attack_multiplier: f64,
    pub normal_attack_bonus: Bonus,
    pub special_attack_multiplier: f64,
    pub special_attack_bonus: Bonus,
    pub max_rounds: u32,
    pub apply_class_modifiers: bool,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            round_interval_ms: 1500,
            normal_attack_chance: 80,
            miss_chance: 10,
            normal_attack_multiplier: 0.4,
            normal_attack_bonus: Bonus { min: 0, max: 40 },
            special_attack_multiplier: 0.8,
            special_attack_bonus: Bonus { min: 20, max: 80 },
            max_rounds: 1000,
            apply_class_modifiers: false,
        }
    }
}

/// Exclusive upper bounds of the per-round and per-attack draws.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DrawSettings {
    pub single_round: i64,
    pub team_round: i64,
    pub attack_roll: i64,
    pub team_consumable_roll: i64,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            single_round: 201,
            team_round: 1001,
            attack_roll: 101,
            team_consumable_roll: 101,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    pub single: Window,
    pub team: Window,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            single: Window::new(90, 110),
            team: Window::new(470, 530),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsumableSettings {
    pub single: SingleConsumableWindows,
    pub team: TeamConsumableWindows,
    pub items: Vec<Consumable>,
}

impl Default for ConsumableSettings {
    fn default() -> Self {
        Self {
            single: SingleConsumableWindows::default(),
            team: TeamConsumableWindows::default(),
            items: default_consumables(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SingleConsumableWindows {
    pub attacker: Window,
    pub defender: Window,
}

impl Default for SingleConsumableWindows {
    fn default() -> Self {
        Self {
            attacker: Window::new(149, 160),
            defender: Window::new(49, 60),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TeamConsumableWindows {
    pub chance: Window,
}

impl Default for TeamConsumableWindows {
    fn default() -> Self {
        Self {
            chance: Window::new(60, 80),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ClassModifiers {
    pub health_multiplier: f64,
    pub strength_multiplier: f64,
}

impl ClassModifiers {
    pub const fn new(health_multiplier: f64, strength_multiplier: f64) -> Self {
        Self {
            health_multiplier,
            strength_multiplier,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ClassTable {
    pub balanced: ClassModifiers,
    pub glass_cannon: ClassModifiers,
    pub tank: ClassModifiers,
    pub bruiser: ClassModifiers,
    pub warrior: ClassModifiers,
}

impl ClassTable {
    pub fn modifiers(&self, class: FighterClass) -> ClassModifiers {
        match class {
            FighterClass::Balanced => self.balanced,
            FighterClass::GlassCannon => self.glass_cannon,
            FighterClass::Tank => self.tank,
            FighterClass::Bruiser => self.bruiser,
            FighterClass::Warrior => self.warrior,
        }
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self {
            balanced: ClassModifiers::new(1.0, 1.0),
            glass_cannon: ClassModifiers::new(0.8, 2.0),
            tank: ClassModifiers::new(2.0, 0.4),
            bruiser: ClassModifiers::new(1.5, 0.6),
            warrior: ClassModifiers::new(0.9, 1.1),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub trace_filter: Option<String>,
}
