//! Per-tournament configuration.

use serde::{Deserialize, Serialize};

/// Default largest group size matched by exhaustive search.
pub const DEFAULT_EXHAUSTIVE_LIMIT: usize = 12;

/// Hard cap on the exhaustive limit. An all-teammate group of n is never pruned and
/// visits (n-1)!! pairings.
pub const MAX_EXHAUSTIVE_LIMIT: usize = 12;

/// How the bye is chosen in an odd-sized loss group.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByePolicy {
    /// Try every member as the bye and keep the lowest-penalty pairing.
    #[default]
    SearchOptimal,
    /// The member with the most wins sits out.
    HighestWins,
}

/// Formula for the per-team standings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamPointsFormula {
    /// Sum of wins minus losses.
    #[default]
    NetWins,
    /// Sum of wins.
    Wins,
}

/// Knobs for round generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingOptions {
    pub bye_policy: ByePolicy,
    /// Groups larger than this are matched greedily with the highest-wins bye.
    /// Values above [`MAX_EXHAUSTIVE_LIMIT`] are accepted but capped; see
    /// [`PairingOptions::effective_limit`].
    pub exhaustive_limit: usize,
}

impl PairingOptions {
    /// The exhaustive limit actually applied: `exhaustive_limit` capped at
    /// [`MAX_EXHAUSTIVE_LIMIT`].
    pub fn effective_limit(&self) -> usize {
        self.exhaustive_limit.min(MAX_EXHAUSTIVE_LIMIT)
    }
}

impl Default for PairingOptions {
    fn default() -> Self {
        Self {
            bye_policy: ByePolicy::SearchOptimal,
            exhaustive_limit: DEFAULT_EXHAUSTIVE_LIMIT,
        }
    }
}

/// Tournament-level options (pairing plus session policy).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentOptions {
    #[serde(flatten)]
    pub pairing: PairingOptions,
    pub team_points: TeamPointsFormula,
    /// Finalize even when some matchups have no winner selected.
    pub allow_partial_finalize: bool,
    /// Shuffle the matchup list once before presenting it.
    pub shuffle_display: bool,
}

impl Default for TournamentOptions {
    fn default() -> Self {
        Self {
            pairing: PairingOptions::default(),
            team_points: TeamPointsFormula::NetWins,
            allow_partial_finalize: true,
            shuffle_display: true,
        }
    }
}
