//! Competitor record.

use serde::{Deserialize, Serialize};

/// Losses at which a competitor stops being paired.
pub const ELIMINATION_THRESHOLD: u32 = 2;

/// A competitor in the tournament. `name` is the identity.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    /// Empty string means no team.
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl Competitor {
    /// Create a new competitor with a clean record.
    pub fn new(name: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            wins: 0,
            losses: 0,
        }
    }

    /// Team name, or `None` for team-less competitors.
    pub fn team(&self) -> Option<&str> {
        let team = self.team.trim();
        (!team.is_empty()).then_some(team)
    }

    /// True when both competitors are on the same non-empty team.
    pub fn is_teammate_of(&self, other: &Competitor) -> bool {
        matches!((self.team(), other.team()), (Some(a), Some(b)) if a == b)
    }

    /// Still in the running (below the elimination threshold).
    pub fn is_eligible(&self) -> bool {
        self.losses < ELIMINATION_THRESHOLD
    }

    /// No recorded result yet.
    pub fn is_fresh(&self) -> bool {
        self.wins == 0 && self.losses == 0
    }

    /// Record a win.
    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    /// Record a loss.
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    pub fn reset(&mut self) {
        self.wins = 0;
        self.losses = 0;
    }
}
