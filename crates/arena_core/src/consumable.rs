use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Healing pickup handed out mid-fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumable {
    pub name: String,
    pub health: i32,
}

impl Consumable {
    pub fn new(name: impl Into<String>, health: i32) -> Self {
        Self {
            name: name.into(),
            health,
        }
    }

    /// Heal amount with negative values coerced to zero.
    pub fn heal_amount(&self) -> u32 {
        self.health.max(0) as u32
    }
}

/// Item catalog the resolver draws pickups from.
pub trait ConsumableSource {
    fn draw(&self, rng: &mut dyn RandomSource) -> Option<Consumable>;
}

#[derive(Debug, Clone)]
pub struct ConsumableTable {
    items: Vec<Consumable>,
}

impl ConsumableTable {
    pub fn new(items: Vec<Consumable>) -> Self {
        Self { items }
    }
}

impl Default for ConsumableTable {
    fn default() -> Self {
        Self::new(default_consumables())
    }
}

impl ConsumableSource for ConsumableTable {
    fn draw(&self, rng: &mut dyn RandomSource) -> Option<Consumable> {
        if self.items.is_empty() {
            return None;
        }
        self.items.get(rng.pick_index(self.items.len())).cloned()
    }
}

pub fn default_consumables() -> Vec<Consumable> {
    vec![
        Consumable::new("Bread", 20),
        Consumable::new("Roasted Meat", 35),
        Consumable::new("Health Potion", 50),
        Consumable::new("Elixir", 80),
    ]
}
