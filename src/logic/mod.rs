//! Tournament business logic: the pairing engine, round lifecycle, team points, roster CSV.

mod bye;
mod eligibility;
mod matching;
mod pairing;
mod results;
mod roster_csv;
mod round;
mod team_points;

pub use bye::{highest_wins_index, pair_group, GroupPairing};
pub use eligibility::{eligible_competitors, group_by_losses, is_first_round, order_for_pairing};
pub use matching::{
    conflict_penalty, exhaustive_matching, greedy_matching, match_group, Matching, Pair, Strategy,
};
pub use pairing::pair_competitors;
pub use results::{apply_results, RoundOutcome};
pub use roster_csv::{
    read_roster, roster_file_name, roster_from_csv, roster_to_csv, write_roster, RosterCsvError,
};
pub use round::{begin_round, clear_winner, finalize_round, set_winner};
pub use team_points::team_points;
