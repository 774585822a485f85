//! Data structures for the tournament: competitors, matchups, roster, session state.

mod competitor;
mod matchup;
mod options;
mod roster;
mod tournament;

pub use competitor::{Competitor, ELIMINATION_THRESHOLD};
pub use matchup::{Matchup, Opponent, Side, BYE};
pub use options::{
    ByePolicy, PairingOptions, TeamPointsFormula, TournamentOptions, DEFAULT_EXHAUSTIVE_LIMIT,
    MAX_EXHAUSTIVE_LIMIT,
};
pub use roster::{Roster, RosterError};
pub use tournament::{Round, Tournament, TournamentError, TournamentId};
