//! Elo-style rating updates, applied when a match result is recorded.

use crate::models::{GameMatch, MatchResult, TournamentError};

/// Update sensitivity: new players move fast, veterans settle down.
pub fn k_factor(matches_played: u32) -> f64 {
    20.0 + 600.0 / f64::from(matches_played.max(1))
}

/// Probability of the first rating beating the second.
pub fn expected_score(rating: i32, opponent_rating: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(opponent_rating - rating) / 400.0))
}

fn result_points(result: MatchResult, is_white: bool) -> f64 {
    match result {
        MatchResult::WhiteWon => {
            if is_white {
                1.0
            } else {
                0.0
            }
        }
        MatchResult::Draw => 0.5,
        MatchResult::BlackWon | MatchResult::DidNotStart => {
            if is_white {
                0.0
            } else {
                1.0
            }
        }
    }
}

/// New rating after a match, from one side's perspective. `matches_played`
/// is the player's experience before this match.
pub fn updated_rating(
    rating: i32,
    opponent_rating: i32,
    result: MatchResult,
    matches_played: u32,
    is_white: bool,
) -> i32 {
    let k = k_factor(matches_played);
    let points = result_points(result, is_white);
    let expected = expected_score(rating, opponent_rating);
    rating + (k * (points - expected)).round() as i32
}

/// Record a result on a match: computes both new ratings from the snapshots
/// stored on the record, bumps the winner's rivalry counter, and marks the
/// match completed. Each side updates independently, so the exchange is not
/// necessarily zero-sum when the two K-factors differ.
///
/// Byes never touch ratings; recording a playable result against the bye
/// slot is a caller error. Recording `DidNotStart` puts the match back to
/// its unplayed state.
pub fn record_match_result(
    game: &mut GameMatch,
    result: MatchResult,
) -> Result<(), TournamentError> {
    if game.white.is_bye() && game.black.is_bye() {
        return Err(TournamentError::MalformedMatch(game.id));
    }
    if result == MatchResult::DidNotStart {
        game.result = result;
        game.new_white_rating = None;
        game.new_black_rating = None;
        game.white_score = 0;
        game.black_score = 0;
        game.completed = false;
        return Ok(());
    }
    if game.is_bye() {
        return Err(TournamentError::ByeMatchResult(game.id));
    }

    // The record stores each side's count as of this match; K wants the
    // experience before it.
    let white_before = game.white_matches_played.saturating_sub(1);
    let black_before = game.black_matches_played.saturating_sub(1);

    game.new_white_rating = Some(updated_rating(
        game.white_rating,
        game.black_rating,
        result,
        white_before,
        true,
    ));
    game.new_black_rating = Some(updated_rating(
        game.black_rating,
        game.white_rating,
        result,
        black_before,
        false,
    ));

    game.white_score = 0;
    game.black_score = 0;
    match result {
        MatchResult::WhiteWon => game.white_score = 1,
        MatchResult::BlackWon => game.black_score = 1,
        MatchResult::Draw | MatchResult::DidNotStart => {}
    }

    game.result = result;
    game.completed = true;
    Ok(())
}
