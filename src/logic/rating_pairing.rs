//! Rating-optimized pairing via a bounded branch-and-bound search.
//!
//! Pairing is treated as minimum-cost perfect matching over the complete
//! graph of eligible players, where an edge costs the squared rating gap
//! plus a large penalty per previous meeting. The search is deliberately
//! bounded: it branches on the strongest unpaired player, explores only a
//! handful of nearby candidates per step, and memoizes partial pairings.
//! The result is a good pairing found quickly, not a proven optimum.

use crate::logic::pairing::create_match;
use crate::logic::stats::StatsTable;
use crate::models::{GameMatch, PairingConfig, PlayerId, TournamentId};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Branching width: at most this many candidate opponents per partial state.
pub const MAX_EXPLORE_NODES: usize = 5;

/// Cost added per previous meeting. Large enough to dominate any realistic
/// rating gap, so rematches happen only when every alternative also is one.
pub const REMATCH_PENALTY: f64 = 100_000.0;

/// Rating nudge per pairing point, scaled by the configured weight, so
/// over-performers get pulled toward stronger opposition.
const PERFORMANCE_STEP: f64 = 40.0;

/// Largest roster the bitset search handles; bigger pools fall back to
/// adjacent pairing.
const MAX_SEARCH_PLAYERS: usize = 128;

struct Entrant {
    id: PlayerId,
    rating: f64,
}

/// A partial pairing: which entrants are already paired (bit per index in
/// rating order), the accumulated cost, and the pairs so far.
#[derive(Clone)]
struct PartialPairing {
    paired: u128,
    cost: f64,
    pairs: Vec<(usize, usize)>,
}

/// Cost of pairing two entrants: squared rating distance plus the rematch
/// penalty per previous meeting.
pub fn pair_cost(rating_a: f64, rating_b: f64, times_played: u32) -> f64 {
    let diff = rating_a - rating_b;
    diff * diff + REMATCH_PENALTY * f64::from(times_played)
}

/// Branch ordering for the explore stack: costlier branches sort first so
/// the cheapest branch ends up on top of the LIFO frontier and is explored
/// next. This is what makes the search greedy-first rather than exhaustive.
pub fn explore_order(cost_a: f64, cost_b: f64) -> Ordering {
    cost_b.total_cmp(&cost_a)
}

/// Keep only the candidates that have met `player` the fewest times.
/// Rotation is preferred, but when every candidate is a rematch the whole
/// minimum class stays available rather than failing the pairing.
fn rotation_filter(
    player: usize,
    unpaired: &[usize],
    entrants: &[Entrant],
    stats: &StatsTable,
) -> Vec<usize> {
    let min_met = unpaired
        .iter()
        .map(|&i| stats.times_played(entrants[i].id, entrants[player].id))
        .min()
        .unwrap_or(0);
    unpaired
        .iter()
        .copied()
        .filter(|&i| stats.times_played(entrants[i].id, entrants[player].id) == min_met)
        .collect()
}

/// Least-bad fallback: adjacent entrants in rating order, strongest board
/// first. Used when the pool exceeds the bitset width.
fn adjacent_pairs(count: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut i = count;
    while i >= 2 {
        pairs.push((i - 1, i - 2));
        i -= 2;
    }
    pairs
}

fn search_pairs(entrants: &[Entrant], stats: &StatsTable) -> Vec<(usize, usize)> {
    let count = entrants.len();
    if count < 2 {
        return Vec::new();
    }
    let complete: u128 = if count == MAX_SEARCH_PLAYERS {
        u128::MAX
    } else {
        (1u128 << count) - 1
    };

    let mut best: Option<PartialPairing> = None;
    let mut memo: HashMap<u128, f64> = HashMap::new();
    let mut frontier = vec![PartialPairing {
        paired: 0,
        cost: 0.0,
        pairs: Vec::new(),
    }];
    let mut explored = 0usize;

    while let Some(state) = frontier.pop() {
        explored += 1;
        if let Some(current_best) = &best {
            if state.cost >= current_best.cost {
                continue;
            }
        }
        if state.paired == complete {
            best = Some(state);
            continue;
        }

        // Branch on the highest-rated unpaired entrant (entrants are in
        // ascending rating order, so that is the highest free index).
        let player = match (0..count).rev().find(|i| state.paired & (1u128 << i) == 0) {
            Some(i) => i,
            None => continue,
        };

        let unpaired: Vec<usize> = (0..count)
            .filter(|&i| i != player && state.paired & (1u128 << i) == 0)
            .collect();
        let mut candidates = rotation_filter(player, &unpaired, entrants, stats);
        candidates.sort_by_key(|&i| player.abs_diff(i));
        candidates.truncate(MAX_EXPLORE_NODES);

        let mut branches: Vec<PartialPairing> = Vec::new();
        for opponent in candidates {
            let cost = state.cost
                + pair_cost(
                    entrants[player].rating,
                    entrants[opponent].rating,
                    stats.times_played(entrants[opponent].id, entrants[player].id),
                );
            let paired = state.paired | (1u128 << player) | (1u128 << opponent);
            if let Some(&seen) = memo.get(&paired) {
                if seen <= cost {
                    continue;
                }
            }
            memo.insert(paired, cost);
            let mut pairs = state.pairs.clone();
            pairs.push((player, opponent));
            branches.push(PartialPairing { paired, cost, pairs });
        }
        branches.sort_by(|a, b| explore_order(a.cost, b.cost));
        frontier.extend(branches);
    }

    log::debug!(
        "rating pairing explored {} states for {} players",
        explored,
        count
    );

    match best {
        Some(state) => state.pairs,
        None => adjacent_pairs(count),
    }
}

/// Pair the eligible players (bye excluded) by rating proximity.
///
/// Each player's effective rating is nudged by performance so far, then the
/// bounded search looks for a low-cost perfect matching. Board numbers
/// follow the search's pairing order: board 1 is the strongest pairing.
pub fn rating_matches(
    tournament_id: TournamentId,
    stats: &StatsTable,
    config: &PairingConfig,
    bye_player: Option<PlayerId>,
) -> Vec<GameMatch> {
    let mut entrants: Vec<Entrant> = stats
        .eligible()
        .filter(|stat| Some(stat.player_id) != bye_player)
        .map(|stat| Entrant {
            id: stat.player_id,
            rating: f64::from(stat.rating)
                + stat.pairing_score * PERFORMANCE_STEP * config.performance_weight,
        })
        .collect();
    entrants.sort_by(|a, b| a.rating.total_cmp(&b.rating));

    let pairs = if entrants.len() <= MAX_SEARCH_PLAYERS {
        search_pairs(&entrants, stats)
    } else {
        adjacent_pairs(entrants.len())
    };

    let mut matches = Vec::new();
    for (i, (player, opponent)) in pairs.iter().enumerate() {
        let board_number = i as u32 + 1;
        matches.push(create_match(
            entrants[*player].id,
            entrants[*opponent].id,
            stats,
            board_number,
            tournament_id,
            config.tiebreak_seed.wrapping_add(board_number),
        ));
    }
    matches
}
