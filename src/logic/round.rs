//! Round lifecycle: open a round, record winners, finalize.

use crate::logic::pairing::pair_competitors;
use crate::logic::results::{apply_results, RoundOutcome};
use crate::models::{Round, Side, Tournament, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Open the next round.
///
/// Fails with `RoundInProgress` if a round is open and with `TournamentComplete` if fewer
/// than two competitors are eligible. When `shuffle_display` is set the matchup list is
/// shuffled once here; indices are stable from then on.
pub fn begin_round<'t, R: Rng + ?Sized>(
    tournament: &'t mut Tournament,
    rng: &mut R,
) -> Result<&'t Round, TournamentError> {
    if tournament.is_round_open() {
        return Err(TournamentError::RoundInProgress);
    }

    let mut matchups = pair_competitors(
        tournament.roster.competitors(),
        &tournament.options.pairing,
        rng,
    );
    if matchups.is_empty() {
        return Err(TournamentError::TournamentComplete);
    }
    if tournament.options.shuffle_display {
        matchups.shuffle(rng);
    }

    let number = tournament.rounds_played + 1;
    log::info!("Round {}: {} matchup(s)", number, matchups.len());
    Ok(&*tournament.round.insert(Round::new(number, matchups)))
}

/// Record the winner of matchup `index` in the open round. Can be changed until finalize.
pub fn set_winner(
    tournament: &mut Tournament,
    index: usize,
    side: Side,
) -> Result<(), TournamentError> {
    let round = tournament
        .round
        .as_mut()
        .ok_or(TournamentError::RoundNotStarted)?;
    let matchup = round
        .matchups
        .get(index)
        .ok_or(TournamentError::MatchupNotFound(index))?;
    if matchup.is_bye() && side == Side::Second {
        return Err(TournamentError::ByeHasNoOpponent(index));
    }
    round.selections[index] = Some(side);
    Ok(())
}

/// Undo a selection for matchup `index`.
pub fn clear_winner(tournament: &mut Tournament, index: usize) -> Result<(), TournamentError> {
    let round = tournament
        .round
        .as_mut()
        .ok_or(TournamentError::RoundNotStarted)?;
    let slot = round
        .selections
        .get_mut(index)
        .ok_or(TournamentError::MatchupNotFound(index))?;
    *slot = None;
    Ok(())
}

/// Apply the open round's results and close it.
///
/// Undecided matchups are skipped unless `allow_partial_finalize` is off, in which case
/// the round stays open and `IncompleteResults` is returned.
pub fn finalize_round(tournament: &mut Tournament) -> Result<RoundOutcome, TournamentError> {
    let round = tournament
        .round
        .as_ref()
        .ok_or(TournamentError::RoundNotStarted)?;

    let unresolved = round.unresolved();
    if unresolved > 0 && !tournament.options.allow_partial_finalize {
        return Err(TournamentError::IncompleteResults { unresolved });
    }

    let outcome = apply_results(&mut tournament.roster, &round.matchups, &round.selections)?;
    tournament.round = None;
    tournament.rounds_played += 1;

    if outcome.complete {
        log::info!("Competition finished after {} round(s)", tournament.rounds_played);
    } else {
        log::info!(
            "Round {} finalized: {} result(s), {} unresolved",
            tournament.rounds_played,
            outcome.applied,
            outcome.unresolved
        );
    }
    Ok(outcome)
}
