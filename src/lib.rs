//! Chess club tournament engine: pairing, Elo tracking, and standings over
//! in-memory tournament snapshots. Pure computation; persistence and
//! transport belong to the caller.

pub mod logic;
pub mod models;

pub use logic::{
    batch_groups, complete_round, compute_player_stats, create_match, create_new_round,
    create_standings, expected_score, explore_order, fill_gaps, finalize_round, find_bye_player,
    k_factor, next_round, pair_cost, rating_matches, record_match_result, swiss_matches,
    swiss_split, updated_rating, PlayerStat, StatsTable, MAX_EXPLORE_NODES, REMATCH_PENALTY,
};
pub use models::{
    GameMatch, MatchId, MatchResult, PairingAlgorithm, PairingConfig, Participant, Player,
    PlayerId, Round, RoundId, Standing, Tournament, TournamentError, TournamentId,
    TournamentStatus,
};
