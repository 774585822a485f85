//! Result application: turn selected winners into wins and losses on the roster.

use crate::models::{Matchup, Roster, Side, TournamentError};
use serde::Serialize;

/// Summary of one round's result application.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RoundOutcome {
    /// Matchups that produced a win and a loss.
    pub applied: usize,
    /// Real matchups left without a winner.
    pub unresolved: usize,
    /// Bye matchups (never change a record).
    pub byes: usize,
    /// Fewer than two competitors remain eligible.
    pub complete: bool,
}

/// Apply the selected winners of a round. `selections[i]` belongs to `matchups[i]`;
/// missing entries count as undecided.
///
/// Every decided matchup is validated before any record changes, so an error leaves the
/// roster untouched.
pub fn apply_results(
    roster: &mut Roster,
    matchups: &[Matchup],
    selections: &[Option<Side>],
) -> Result<RoundOutcome, TournamentError> {
    let mut outcome = RoundOutcome::default();
    let mut decided: Vec<(String, String)> = Vec::new();

    for (idx, m) in matchups.iter().enumerate() {
        let selection = selections.get(idx).copied().flatten();
        if m.is_bye() {
            if selection == Some(Side::Second) {
                return Err(TournamentError::ByeHasNoOpponent(idx));
            }
            outcome.byes += 1;
            continue;
        }
        let Some(side) = selection else {
            outcome.unresolved += 1;
            continue;
        };
        if let Some((winner, loser)) = m.outcome(side) {
            for name in [winner, loser] {
                if roster.get(name).is_none() {
                    return Err(TournamentError::CompetitorNotFound(name.to_string()));
                }
            }
            decided.push((winner.to_string(), loser.to_string()));
        }
    }

    for (winner, loser) in &decided {
        if let Some(w) = roster.get_mut(winner) {
            w.add_win();
        }
        if let Some(l) = roster.get_mut(loser) {
            l.add_loss();
            if !l.is_eligible() {
                log::info!("{} eliminated with {} losses", l.name, l.losses);
            }
        }
    }

    outcome.applied = decided.len();
    outcome.complete = roster.eligible_count() < 2;
    Ok(outcome)
}
