//! Engine logic: statistics aggregation, pairing, ratings, standings, rounds.

mod pairing;
mod rating;
mod rating_pairing;
mod rounds;
mod standings;
mod stats;
mod swiss;

pub use pairing::{create_match, create_new_round, find_bye_player};
pub use rating::{expected_score, k_factor, record_match_result, updated_rating};
pub use rating_pairing::{
    explore_order, pair_cost, rating_matches, MAX_EXPLORE_NODES, REMATCH_PENALTY,
};
pub use rounds::{complete_round, finalize_round, next_round};
pub use standings::create_standings;
pub use stats::{compute_player_stats, PlayerStat, StatsTable};
pub use swiss::{batch_groups, fill_gaps, swiss_matches, swiss_split};
