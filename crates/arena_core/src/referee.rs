//! Announcements and round summaries. Everything here is a pure function of
//! match state; rendering is up to whichever observer receives the notices.

use std::fmt;

use serde::Serialize;

use crate::combatant::Combatant;
use crate::director::MatchMode;
use crate::observer::Notice;
use crate::team::{Side, Team};

/// Health bars in 1v1 summaries are drawn against this fixed scale.
pub const SINGLE_BAR_SCALE: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Healthy,
    Wounded,
    Critical,
}

impl HealthBand {
    pub fn classify(current: i32, scale: i32) -> Self {
        let pct = percentage(current, scale);
        if pct < 30.0 {
            HealthBand::Critical
        } else if pct < 60.0 {
            HealthBand::Wounded
        } else {
            HealthBand::Healthy
        }
    }
}

/// Fill of a health bar in `[0, 100]`.
pub fn percentage(current: i32, scale: i32) -> f64 {
    if scale <= 0 {
        return 0.0;
    }
    (current.max(0) as f64 / scale as f64 * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FighterStatus {
    pub name: String,
    pub health: i32,
    pub band: HealthBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideStatus {
    pub name: String,
    pub fighters: Vec<FighterStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    pub first: SideStatus,
    pub second: SideStatus,
}

impl RoundSummary {
    pub fn single(round: u32, first: &Combatant, second: &Combatant) -> Self {
        let side = |c: &Combatant| SideStatus {
            name: c.name.clone(),
            fighters: vec![status(c, SINGLE_BAR_SCALE)],
        };
        Self {
            round,
            first: side(first),
            second: side(second),
        }
    }

    pub fn teams(round: u32, first: &Team, second: &Team) -> Self {
        let side = |t: &Team| SideStatus {
            name: t.name.clone(),
            fighters: t.fighters().iter().map(|c| status(c, c.max_health)).collect(),
        };
        Self {
            round,
            first: side(first),
            second: side(second),
        }
    }
}

fn status(c: &Combatant, scale: i32) -> FighterStatus {
    FighterStatus {
        name: c.name.clone(),
        health: c.display_health(),
        band: HealthBand::classify(c.health, scale),
    }
}

impl fmt::Display for SideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, fighter) in self.fighters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {} HP", fighter.name, fighter.health)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "After round {}: {} | {}", self.round, self.first, self.second)
    }
}

pub fn introduce_fighters(first: &Combatant, second: &Combatant) -> Vec<Notice> {
    vec![
        Notice::MatchIntro {
            mode: MatchMode::Single,
            first: first.name.clone(),
            second: second.name.clone(),
        },
        introduce(Side::One, first),
        introduce(Side::Two, second),
    ]
}

pub fn introduce_teams(first: &Team, second: &Team) -> Vec<Notice> {
    let mut notices = vec![Notice::MatchIntro {
        mode: MatchMode::Team,
        first: first.name.clone(),
        second: second.name.clone(),
    }];
    notices.extend(first.fighters().iter().map(|c| introduce(Side::One, c)));
    notices.extend(second.fighters().iter().map(|c| introduce(Side::Two, c)));
    notices
}

fn introduce(side: Side, c: &Combatant) -> Notice {
    Notice::Introduce {
        side,
        name: c.name.clone(),
        health: c.health,
        strength: c.strength,
    }
}

pub fn round_banner(number: u32) -> Notice {
    Notice::Round { number }
}

pub fn declare_winner(name: &str, is_team: bool) -> Notice {
    Notice::Victory {
        winner: name.to_string(),
        is_team,
    }
}
