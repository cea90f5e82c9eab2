//! Tournament snapshot, pairing configuration, and engine errors.

use crate::models::game::{MatchId, Round};
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during engine operations. All of them are
/// pure-input errors: retry only after correcting the input snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// The pairing pool is empty (no tournament members left in the roster).
    NoEligiblePlayers,
    /// Match data is inconsistent: bye on both sides, or one player on both sides.
    MalformedMatch(MatchId),
    /// A playable result was recorded against the bye slot.
    ByeMatchResult(MatchId),
    /// The previous round has not been completed yet.
    RoundInProgress,
    /// A tournament member is missing from the roster snapshot.
    PlayerNotFound(PlayerId),
    /// Tournament is not in a status that allows this action.
    InvalidState,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NoEligiblePlayers => write!(f, "No eligible players to pair"),
            TournamentError::MalformedMatch(id) => write!(f, "Match {} is malformed", id),
            TournamentError::ByeMatchResult(id) => {
                write!(f, "Match {} is a bye and cannot have a playable result", id)
            }
            TournamentError::RoundInProgress => {
                write!(f, "The previous round has not been completed")
            }
            TournamentError::PlayerNotFound(id) => write!(f, "Player {} not found in roster", id),
            TournamentError::InvalidState => write!(f, "Invalid tournament status for this action"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of a tournament. Transitions are driven by round completion:
/// the first generated round moves `Created` to `Active`, and declining a
/// further round moves `Active` to `Completed`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Created,
    Active,
    Completed,
}

/// Which pairing algorithm produces the next round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingAlgorithm {
    /// Score-group fold pairing with a bounded punch-down.
    #[default]
    Swiss,
    /// Rating-optimized pairing via bounded branch-and-bound matching.
    Rating,
}

/// Pairing configuration, fixed at tournament creation.
///
/// `tiebreak_seed` is drawn once and stored so color tiebreaks replay
/// identically from the same snapshot; nothing in the engine draws
/// randomness at pairing time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairingConfig {
    pub algorithm: PairingAlgorithm,
    /// How many score-adjacent players may share a pairing chunk (chunk size
    /// is twice this).
    pub max_punch_down: u32,
    /// Scales the per-point rating nudge in rating-optimized pairing.
    pub performance_weight: f64,
    pub tiebreak_seed: u32,
}

impl PairingConfig {
    pub fn new(algorithm: PairingAlgorithm) -> Self {
        Self {
            algorithm,
            max_punch_down: 3,
            performance_weight: 1.0,
            tiebreak_seed: Self::random_seed(),
        }
    }

    pub fn with_seed(mut self, tiebreak_seed: u32) -> Self {
        self.tiebreak_seed = tiebreak_seed;
        self
    }

    /// Fresh seed for a new tournament. The only place randomness enters:
    /// the drawn value is stored and reused for every round.
    pub fn random_seed() -> u32 {
        rand::thread_rng().gen()
    }
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self::new(PairingAlgorithm::Swiss)
    }
}

/// Full tournament snapshot: membership, round history, and configuration.
///
/// Player records themselves live in the caller's roster; the tournament
/// only tracks membership by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub date: DateTime<Utc>,
    pub status: TournamentStatus,
    /// Current members; pairing only considers these.
    pub players: Vec<PlayerId>,
    /// Round history, oldest first.
    pub rounds: Vec<Round>,
    pub config: PairingConfig,
}

impl Tournament {
    /// Create a tournament in `Created` status with no members.
    pub fn new(name: impl Into<String>, config: PairingConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date: Utc::now(),
            status: TournamentStatus::Created,
            players: Vec::new(),
            rounds: Vec::new(),
            config,
        }
    }

    /// Add a member (idempotent). Closed once the tournament has completed.
    pub fn join(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.status == TournamentStatus::Completed {
            return Err(TournamentError::InvalidState);
        }
        if !self.players.contains(&player_id) {
            self.players.push(player_id);
        }
        Ok(())
    }

    /// Withdraw a member. Round history is untouched; the player simply
    /// stops being eligible for future pairings.
    pub fn withdraw(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.status == TournamentStatus::Completed {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .players
            .iter()
            .position(|id| *id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// The round currently open for results, if any.
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last().filter(|r| !r.completed)
    }

    pub fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.last_mut().filter(|r| !r.completed)
    }
}
