//! Swiss-style double elimination organizer: library with models and the pairing engine.

pub mod logic;
pub mod models;

pub use logic::{
    apply_results, begin_round, clear_winner, finalize_round, pair_competitors, read_roster,
    roster_file_name, roster_from_csv, roster_to_csv, set_winner, team_points, write_roster,
    RosterCsvError, RoundOutcome,
};
pub use models::{
    ByePolicy, Competitor, Matchup, Opponent, PairingOptions, Roster, RosterError, Round, Side,
    TeamPointsFormula, Tournament, TournamentError, TournamentId, TournamentOptions, BYE,
    ELIMINATION_THRESHOLD, MAX_EXHAUSTIVE_LIMIT,
};
