//! Tournament session: roster, options, and the open round.

use crate::models::matchup::{Matchup, Side};
use crate::models::options::TournamentOptions;
use crate::models::roster::{Roster, RosterError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A roster edit was rejected.
    Roster(RosterError),
    /// A round is open; finalize it first.
    RoundInProgress,
    /// No round is open.
    RoundNotStarted,
    /// Fewer than two competitors are still eligible.
    TournamentComplete,
    /// No matchup at this index in the open round.
    MatchupNotFound(usize),
    /// The matchup at this index is a bye; only its first slot can be selected.
    ByeHasNoOpponent(usize),
    /// Partial finalize is disabled and some matchups have no winner.
    IncompleteResults { unresolved: usize },
    /// A matchup names a competitor who is no longer on the roster.
    CompetitorNotFound(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::Roster(e) => write!(f, "{}", e),
            TournamentError::RoundInProgress => write!(f, "A round is already in progress"),
            TournamentError::RoundNotStarted => write!(f, "No round in progress"),
            TournamentError::TournamentComplete => {
                write!(f, "Competition finished: fewer than 2 competitors remain")
            }
            TournamentError::MatchupNotFound(idx) => write!(f, "No matchup at index {}", idx),
            TournamentError::ByeHasNoOpponent(idx) => {
                write!(f, "Matchup {} is a bye and has no opponent to win", idx)
            }
            TournamentError::IncompleteResults { unresolved } => {
                write!(f, "{} matchup(s) have no winner selected", unresolved)
            }
            TournamentError::CompetitorNotFound(name) => {
                write!(f, "Competitor {} is not on the roster", name)
            }
        }
    }
}

impl std::error::Error for TournamentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TournamentError::Roster(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RosterError> for TournamentError {
    fn from(e: RosterError) -> Self {
        TournamentError::Roster(e)
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// The round awaiting results. `selections[i]` is the chosen winner of `matchups[i]`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number.
    pub number: u32,
    pub matchups: Vec<Matchup>,
    pub selections: Vec<Option<Side>>,
}

impl Round {
    pub fn new(number: u32, matchups: Vec<Matchup>) -> Self {
        let selections = vec![None; matchups.len()];
        Self {
            number,
            matchups,
            selections,
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.matchups.iter().any(|m| m.involves(name))
    }

    /// Real matchups still without a winner.
    pub fn unresolved(&self) -> usize {
        self.matchups
            .iter()
            .zip(&self.selections)
            .filter(|(m, s)| !m.is_bye() && s.is_none())
            .count()
    }
}

/// Full tournament state. At most one round is open at a time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub roster: Roster,
    pub options: TournamentOptions,
    /// Open round, if any.
    pub round: Option<Round>,
    /// Rounds finalized since the last reset.
    pub rounds_played: u32,
}

impl Tournament {
    /// Create a new tournament with an empty roster.
    pub fn new(options: TournamentOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            roster: Roster::new(),
            options,
            round: None,
            rounds_played: 0,
        }
    }

    pub fn with_roster(roster: Roster, options: TournamentOptions) -> Self {
        Self {
            roster,
            ..Self::new(options)
        }
    }

    pub fn is_round_open(&self) -> bool {
        self.round.is_some()
    }

    /// At least two competitors can still be paired.
    pub fn can_pair(&self) -> bool {
        self.roster.eligible_count() >= 2
    }

    /// Add a competitor. Allowed mid-round; they join from the next round.
    pub fn add_competitor(&mut self, name: &str, team: &str) -> Result<(), TournamentError> {
        self.roster.add(name, team)?;
        Ok(())
    }

    /// Remove a competitor. Rejected if they are in the open round.
    pub fn remove_competitor(&mut self, name: &str) -> Result<(), TournamentError> {
        if self
            .round
            .as_ref()
            .is_some_and(|r| r.involves(name.trim()))
        {
            return Err(TournamentError::RoundInProgress);
        }
        self.roster.remove(name)?;
        Ok(())
    }

    /// Remove everyone and close any open round.
    pub fn erase_roster(&mut self) {
        self.roster.erase();
        self.clear_rounds();
    }

    /// Zero all records and close any open round. The next round is a first round again.
    pub fn reset_scores(&mut self) {
        self.roster.reset_scores();
        self.clear_rounds();
    }

    pub fn add_sample_teams(&mut self) -> Result<(), TournamentError> {
        self.roster.add_sample_teams()?;
        Ok(())
    }

    /// Replace the roster (e.g. after CSV import) and close any open round.
    pub fn replace_roster(&mut self, roster: Roster) {
        self.roster = roster;
        self.clear_rounds();
    }

    fn clear_rounds(&mut self) {
        self.round = None;
        self.rounds_played = 0;
    }
}
