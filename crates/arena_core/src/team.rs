use serde::Serialize;

use crate::combatant::Combatant;

/// One side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Maps a `1`/`2` draw onto a side; anything other than `1` is side two.
    pub fn from_draw(draw: i64) -> Self {
        if draw == 1 {
            Side::One
        } else {
            Side::Two
        }
    }
}

/// Ordered group of fighters sharing a win condition. Fallen members are
/// removed, not flagged, so an empty team has lost.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub name: String,
    fighters: Vec<Combatant>,
}

impl Team {
    pub fn new(name: impl Into<String>, fighters: Vec<Combatant>) -> Self {
        Self {
            name: name.into(),
            fighters,
        }
    }

    pub fn fighters(&self) -> &[Combatant] {
        &self.fighters
    }

    pub fn fighters_mut(&mut self) -> &mut [Combatant] {
        &mut self.fighters
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Combatant> {
        self.fighters.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }

    pub fn is_defeated(&self) -> bool {
        self.is_empty()
    }

    /// Removes the member at `idx`, returning it if present.
    pub fn remove_at(&mut self, idx: usize) -> Option<Combatant> {
        (idx < self.fighters.len()).then(|| self.fighters.remove(idx))
    }

    /// Drops every member at or below zero health and returns them in order.
    pub fn remove_fallen(&mut self) -> Vec<Combatant> {
        let (fallen, standing): (Vec<_>, Vec<_>) = std::mem::take(&mut self.fighters)
            .into_iter()
            .partition(Combatant::is_defeated);
        self.fighters = standing;
        fallen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        Team::new(
            "Team One",
            vec![
                Combatant::new(1, "Gosho", 400, 10),
                Combatant::new(2, "Ivan", 0, 20),
                Combatant::new(3, "Petar", -15, 11),
            ],
        )
    }

    #[test]
    fn remove_at_only_touches_that_slot() {
        let mut t = team();
        let removed = t.remove_at(1).unwrap();
        assert_eq!("Ivan", removed.name);
        assert_eq!(vec![1, 3], t.fighters().iter().map(|f| f.id).collect::<Vec<_>>());
        assert!(t.remove_at(2).is_none());
    }

    #[test]
    fn remove_fallen_keeps_order_of_survivors() {
        let mut t = team();
        let fallen = t.remove_fallen();
        assert_eq!(2, fallen.len());
        assert_eq!(1, t.len());
        assert!(!t.is_defeated());
    }

    #[test]
    fn side_draw_mapping() {
        assert_eq!(Side::One, Side::from_draw(1));
        assert_eq!(Side::Two, Side::from_draw(2));
        assert_eq!(Side::One, Side::Two.opponent());
    }
}
