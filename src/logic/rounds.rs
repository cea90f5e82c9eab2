//! Round lifecycle: finalize results, generate the next round, advance the
//! tournament status. The caller is responsible for serializing these
//! operations per tournament; the engine only computes.

use crate::logic::pairing::create_new_round;
use crate::logic::stats::compute_player_stats;
use crate::models::{Player, Round, RoundId, Tournament, TournamentError, TournamentStatus};

/// Finalize a round: every match is marked completed (results left unset
/// stay `DidNotStart`, now final) and the round is closed.
pub fn finalize_round(round: &mut Round) {
    for game in &mut round.matches {
        game.completed = true;
    }
    round.completed = true;
}

/// Generate the next round without mutating the tournament.
///
/// The previous round (if any) must already be completed so the aggregator
/// sees a consistent history, and every tournament member must be present
/// in the roster snapshot.
pub fn next_round(tournament: &Tournament, roster: &[Player]) -> Result<Round, TournamentError> {
    if tournament.status == TournamentStatus::Completed {
        return Err(TournamentError::InvalidState);
    }
    if tournament.rounds.last().map_or(false, |r| !r.completed) {
        return Err(TournamentError::RoundInProgress);
    }
    for id in &tournament.players {
        if !roster.iter().any(|p| p.id == *id) {
            return Err(TournamentError::PlayerNotFound(*id));
        }
    }

    let mut stats = compute_player_stats(&tournament.rounds, roster)?;
    create_new_round(tournament, &mut stats)
}

/// Complete the current round, then either append a freshly generated round
/// (status becomes `Active`) or end the tournament (status becomes
/// `Completed`). Returns the new round's id when one was generated.
pub fn complete_round(
    tournament: &mut Tournament,
    roster: &[Player],
    generate_next: bool,
) -> Result<Option<RoundId>, TournamentError> {
    if tournament.status == TournamentStatus::Completed {
        return Err(TournamentError::InvalidState);
    }

    if let Some(round) = tournament.rounds.last_mut() {
        if !round.completed {
            finalize_round(round);
        }
    }

    if !generate_next {
        tournament.status = TournamentStatus::Completed;
        return Ok(None);
    }

    let round = next_round(tournament, roster)?;
    let round_id = round.id;
    log::info!(
        "round {} generated with {} matches",
        tournament.rounds.len() + 1,
        round.matches.len()
    );
    tournament.rounds.push(round);
    tournament.status = TournamentStatus::Active;
    Ok(Some(round_id))
}
