//! Player data structures and match-side participants.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// One side of a match: either a real player or the bye slot.
///
/// Byes are a first-class variant rather than a reserved id, so every place
/// that touches a match side has to say what it does with a bye.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Participant {
    Player(PlayerId),
    Bye,
}

impl Participant {
    /// The player id, or None for the bye slot.
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Participant::Player(id) => Some(*id),
            Participant::Bye => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Participant::Bye)
    }
}

/// A rated club member. `rating` and `matches_played` are the persisted
/// baseline supplied by the caller; they only advance once a completed,
/// non-bye match is recorded and persisted back.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: i32,
    pub matches_played: u32,
}

impl Player {
    /// Create a new player with the given name and starting rating.
    pub fn new(name: impl Into<String>, rating: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rating,
            matches_played: 0,
        }
    }
}

/// A player's row in the ranked standings (1-based position).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub position: u32,
    pub score: f64,
    pub rating: i32,
    pub initial_rating: i32,
    pub win: u32,
    pub loss: u32,
    pub draw: u32,
    pub bye: u32,
}
