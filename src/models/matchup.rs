//! Matchup, Opponent, and Side for one round of pairings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display text for a bye opponent.
pub const BYE: &str = "BYE";

/// Second slot of a matchup: another competitor, or a bye.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opponent {
    Competitor(String),
    Bye,
}

impl Opponent {
    pub fn name(&self) -> Option<&str> {
        match self {
            Opponent::Competitor(name) => Some(name),
            Opponent::Bye => None,
        }
    }
}

impl fmt::Display for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opponent::Competitor(name) => f.write_str(name),
            Opponent::Bye => f.write_str(BYE),
        }
    }
}

/// Which slot of a matchup won.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    First,
    Second,
}

/// One pairing of the current round. Competitors are referenced by name.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub competitor1: String,
    pub competitor2: Opponent,
}

impl Matchup {
    pub fn new(competitor1: impl Into<String>, competitor2: impl Into<String>) -> Self {
        Self {
            competitor1: competitor1.into(),
            competitor2: Opponent::Competitor(competitor2.into()),
        }
    }

    pub fn bye(competitor: impl Into<String>) -> Self {
        Self {
            competitor1: competitor.into(),
            competitor2: Opponent::Bye,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.competitor2 == Opponent::Bye
    }

    /// Names of the competitors in this matchup (one for a bye).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.competitor1.as_str()).chain(self.competitor2.name())
    }

    pub fn involves(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Winner and loser names for the given side. `None` when the loser would be the bye.
    pub fn outcome(&self, winner: Side) -> Option<(&str, &str)> {
        let other = self.competitor2.name()?;
        match winner {
            Side::First => Some((self.competitor1.as_str(), other)),
            Side::Second => Some((other, self.competitor1.as_str())),
        }
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.competitor1, self.competitor2)
    }
}
