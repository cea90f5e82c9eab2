//! Round construction: bye selection, color and board assignment, and
//! dispatch to the configured pairing algorithm.

use crate::logic::rating_pairing::rating_matches;
use crate::logic::stats::StatsTable;
use crate::logic::swiss::swiss_matches;
use crate::models::{
    GameMatch, MatchResult, PairingAlgorithm, Participant, PlayerId, Round, Tournament,
    TournamentError, TournamentId,
};
use uuid::Uuid;

/// Pick the player who sits out this round, if the eligible count is odd.
///
/// The bye goes to the player with the fewest prior byes; ties break to the
/// lowest pairing score, then the lowest rating, then the latest roster
/// position. Deterministic for a given snapshot.
pub fn find_bye_player(stats: &StatsTable) -> Option<PlayerId> {
    if stats.eligible_count() % 2 == 0 {
        return None;
    }
    stats
        .eligible()
        .min_by(|a, b| {
            a.bye
                .cmp(&b.bye)
                .then_with(|| a.pairing_score.total_cmp(&b.pairing_score))
                .then_with(|| a.rating.cmp(&b.rating))
        })
        .map(|stat| stat.player_id)
}

/// Build the match record for a pairing, deciding who plays white.
///
/// White goes to whoever has held the white pieces less often; on an exact
/// tie the parity of `board_seed` decides, so colors replay identically from
/// the same tournament seed. The record snapshots both ratings and each
/// side's matches-played count as of this match.
pub fn create_match(
    player_id: PlayerId,
    opponent_id: PlayerId,
    stats: &StatsTable,
    board_number: u32,
    tournament_id: TournamentId,
    board_seed: u32,
) -> GameMatch {
    let player_whites = stats.get(player_id).map_or(0, |s| s.white_played);
    let opponent_whites = stats.get(opponent_id).map_or(0, |s| s.white_played);

    let (white_id, black_id) = if player_whites == opponent_whites {
        if board_seed % 2 == 1 {
            (player_id, opponent_id)
        } else {
            (opponent_id, player_id)
        }
    } else if player_whites > opponent_whites {
        (opponent_id, player_id)
    } else {
        (player_id, opponent_id)
    };

    GameMatch {
        id: Uuid::new_v4(),
        tournament_id,
        white: Participant::Player(white_id),
        black: Participant::Player(black_id),
        white_rating: stats.get(white_id).map_or(0, |s| s.rating),
        black_rating: stats.get(black_id).map_or(0, |s| s.rating),
        new_white_rating: None,
        new_black_rating: None,
        white_matches_played: stats.get(white_id).map_or(0, |s| s.matches_played) + 1,
        black_matches_played: stats.get(black_id).map_or(0, |s| s.matches_played) + 1,
        white_score: 0,
        black_score: 0,
        board_number,
        result: MatchResult::DidNotStart,
        completed: false,
    }
}

/// Pair the tournament's current members into a new round.
///
/// Restricts the stats to current members, takes the bye player out of the
/// pool, runs the configured algorithm over the rest, and appends the bye
/// match (highest board number) when one is needed. The returned round is
/// unpersisted; every match starts `DidNotStart` and incomplete.
pub fn create_new_round(
    tournament: &Tournament,
    stats: &mut StatsTable,
) -> Result<Round, TournamentError> {
    stats.retain_eligible(|id| tournament.players.contains(&id));
    if stats.eligible_count() == 0 {
        return Err(TournamentError::NoEligiblePlayers);
    }

    let bye_player = find_bye_player(stats);
    if let Some(id) = bye_player {
        log::debug!("bye goes to {}", id);
    }

    let mut matches = match tournament.config.algorithm {
        PairingAlgorithm::Swiss => {
            swiss_matches(tournament.id, stats, &tournament.config, bye_player)
        }
        PairingAlgorithm::Rating => {
            rating_matches(tournament.id, stats, &tournament.config, bye_player)
        }
    };

    if let Some(bye_id) = bye_player {
        let board_number = matches.last().map_or(0, |m| m.board_number) + 1;
        matches.push(GameMatch {
            id: Uuid::new_v4(),
            tournament_id: tournament.id,
            white: Participant::Player(bye_id),
            black: Participant::Bye,
            white_rating: stats.get(bye_id).map_or(0, |s| s.rating),
            black_rating: 0,
            new_white_rating: None,
            new_black_rating: None,
            white_matches_played: stats.get(bye_id).map_or(0, |s| s.matches_played),
            black_matches_played: 0,
            white_score: 0,
            black_score: 0,
            board_number,
            result: MatchResult::DidNotStart,
            completed: false,
        });
    }

    Ok(Round::new(matches))
}
