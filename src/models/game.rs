//! Match and Round records as produced by the pairing algorithms and later
//! filled in by recorded results.

use crate::models::player::{Participant, PlayerId};
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Unique identifier for a round.
pub type RoundId = Uuid;

/// Outcome of a match. Every match starts as `DidNotStart`; a finalized
/// round may leave it there permanently (bye or forfeited pairing).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    WhiteWon,
    BlackWon,
    Draw,
    #[default]
    DidNotStart,
}

/// A single pairing on one board.
///
/// Ratings and matches-played counters are snapshotted at creation time so
/// the record stays meaningful after the roster moves on; `white_matches_played`
/// and `black_matches_played` hold each side's count as of this match
/// (baseline + 1). `white_score`/`black_score` are lifetime head-to-head
/// rivalry counters between the two players, not tournament points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub white: Participant,
    pub black: Participant,
    pub white_rating: i32,
    pub black_rating: i32,
    pub new_white_rating: Option<i32>,
    pub new_black_rating: Option<i32>,
    pub white_matches_played: u32,
    pub black_matches_played: u32,
    pub white_score: u32,
    pub black_score: u32,
    pub board_number: u32,
    pub result: MatchResult,
    pub completed: bool,
}

impl GameMatch {
    /// True when either side is the bye slot.
    pub fn is_bye(&self) -> bool {
        self.white.is_bye() || self.black.is_bye()
    }

    /// Both real player ids, in white/black order (empty for a bye side).
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.white.player().into_iter().chain(self.black.player())
    }
}

/// One round of the tournament; `matches` is in board order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub completed: bool,
    pub matches: Vec<GameMatch>,
}

impl Round {
    pub fn new(matches: Vec<GameMatch>) -> Self {
        Self {
            id: Uuid::new_v4(),
            completed: false,
            matches,
        }
    }
}
