//! Fighters and the attack model.

use serde::{Deserialize, Serialize};

use crate::config::{ArenaConfig, Bonus, ClassModifiers};
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FighterClass {
    #[default]
    Balanced,
    Warrior,
    Tank,
    GlassCannon,
    Bruiser,
}

/// Immutable roster entry a [`Combatant`] is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterTemplate {
    pub id: u32,
    pub name: String,
    pub health: i32,
    pub strength: u32,
    #[serde(default)]
    pub mana: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub class: FighterClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Normal,
    Special,
}

/// Result of one swing. A miss always carries zero damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attack {
    pub kind: AttackKind,
    pub damage: u32,
    pub missed: bool,
}

impl Attack {
    fn miss(kind: AttackKind) -> Self {
        Self {
            kind,
            damage: 0,
            missed: true,
        }
    }

    fn landed(kind: AttackKind, damage: u32) -> Self {
        Self {
            kind,
            damage,
            missed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub id: u32,
    pub name: String,
    pub class: FighterClass,
    /// Current health. Goes to zero or below on defeat and is never clamped
    /// while a round resolves.
    pub health: i32,
    pub max_health: i32,
    pub strength: u32,
    pub mana: i32,
    pub skills: Vec<String>,
}

impl Combatant {
    pub fn new(id: u32, name: impl Into<String>, health: i32, strength: u32) -> Self {
        Self {
            id,
            name: name.into(),
            class: FighterClass::default(),
            health,
            max_health: health,
            strength,
            mana: 0,
            skills: Vec::new(),
        }
    }

    pub fn from_template(template: &FighterTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name.clone(),
            class: template.class,
            health: template.health,
            max_health: template.health,
            strength: template.strength,
            mana: template.mana,
            skills: template.skills.clone(),
        }
    }

    /// Builds a combatant with its class balance applied to health and strength.
    pub fn with_class_modifiers(template: &FighterTemplate, modifiers: ClassModifiers) -> Self {
        let mut fighter = Self::from_template(template);
        let health = scale(template.health as f64, modifiers.health_multiplier);
        let strength = scale(template.strength as f64, modifiers.strength_multiplier);
        fighter.health = health.min(i32::MAX as f64) as i32;
        fighter.max_health = fighter.health;
        fighter.strength = strength.min(u32::MAX as f64) as u32;
        fighter
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Rolls the attack type, then resolves it.
    pub fn hit(&self, rng: &mut dyn RandomSource, config: &ArenaConfig) -> Attack {
        let roll = rng.random_int(0, config.draws.attack_roll);
        if roll < config.combat.normal_attack_chance {
            self.normal_attack(rng, config)
        } else {
            self.special_attack(rng, config)
        }
    }

    pub fn normal_attack(&self, rng: &mut dyn RandomSource, config: &ArenaConfig) -> Attack {
        let combat = &config.combat;
        self.resolve(
            AttackKind::Normal,
            rng,
            config,
            combat.normal_attack_multiplier,
            combat.normal_attack_bonus,
        )
    }

    pub fn special_attack(&self, rng: &mut dyn RandomSource, config: &ArenaConfig) -> Attack {
        let combat = &config.combat;
        self.resolve(
            AttackKind::Special,
            rng,
            config,
            combat.special_attack_multiplier,
            combat.special_attack_bonus,
        )
    }

    fn resolve(
        &self,
        kind: AttackKind,
        rng: &mut dyn RandomSource,
        config: &ArenaConfig,
        multiplier: f64,
        bonus: Bonus,
    ) -> Attack {
        let should_hit = rng.random_int(0, config.draws.attack_roll);
        if should_hit < config.combat.miss_chance {
            return Attack::miss(kind);
        }
        let extra = rng.random_int(bonus.min, bonus.upper_exclusive());
        let damage = sanitize_damage(self.strength as f64 * multiplier + extra as f64);
        Attack::landed(kind, damage)
    }

    pub fn take_damage(&mut self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.health = self.health.saturating_sub(amount);
    }

    /// Uncapped heal, as used by the 1v1 consumable pickup.
    pub fn heal(&mut self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.health = self.health.saturating_add(amount);
    }

    /// Heal that never lifts health past `max_health`.
    pub fn heal_capped(&mut self, amount: u32) {
        self.heal(amount);
        self.health = self.health.min(self.max_health);
    }

    /// Health as shown to players: never below zero.
    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }
}

/// Rounds a raw damage figure up and coerces anything non-finite or
/// non-positive to zero.
pub fn sanitize_damage(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.ceil().min(u32::MAX as f64) as u32
}

fn scale(value: f64, multiplier: f64) -> f64 {
    let scaled = (value * multiplier).round();
    if scaled.is_finite() {
        scaled.max(0.0)
    } else {
        0.0
    }
}
