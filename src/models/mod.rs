//! Data structures for the tournament engine: players, matches, rounds, tournaments.

mod game;
mod player;
mod tournament;

pub use game::{GameMatch, MatchId, MatchResult, Round, RoundId};
pub use player::{Participant, Player, PlayerId, Standing};
pub use tournament::{
    PairingAlgorithm, PairingConfig, Tournament, TournamentError, TournamentId, TournamentStatus,
};
