//! Score-group ("Swiss") fold pairing.
//!
//! Players are bucketed by pairing score, buckets are cut into chunks so a
//! pairing can only reach a bounded number of score-adjacent players, and
//! each chunk is folded top half against bottom half. A final greedy pass
//! resolves rematches and leftovers deterministically.

use crate::logic::pairing::create_match;
use crate::logic::stats::StatsTable;
use crate::models::{GameMatch, PairingConfig, PlayerId, TournamentId};
use std::cmp::Ordering;

struct RankedPlayer {
    id: PlayerId,
    score: f64,
    rating: i32,
}

/// A player slotted into the pairing order, remembering where its fold
/// partner sits. `target_index` is -1 for players whose half had no slot
/// opposite them; they prefer the front of the order.
struct Candidate {
    id: PlayerId,
    index: usize,
    target_index: i64,
}

/// Cut each score group into chunks of `chunk_size`. A player can only be
/// paired within its own chunk (until gap-filling borrows across an edge).
pub fn batch_groups(groups: Vec<Vec<PlayerId>>, chunk_size: usize) -> Vec<Vec<PlayerId>> {
    let chunk_size = chunk_size.max(1);
    groups
        .into_iter()
        .flat_map(|group| {
            group
                .chunks(chunk_size)
                .map(|chunk| chunk.to_vec())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Fold-split a chunk: the stronger half (rounded up) plays the weaker half.
pub fn swiss_split(group: Vec<PlayerId>) -> (Vec<PlayerId>, Vec<PlayerId>) {
    let half = (group.len() + 1) / 2;
    let mut top = group;
    let bottom = top.split_off(half);
    (top, bottom)
}

/// Balance uneven halves by borrowing from the next chunk's top half,
/// front to back. When a short bottom half has no donor left, the chunk is
/// left uneven and the greedy pass pairs the remainder.
pub fn fill_gaps(
    mut columns: Vec<(Vec<PlayerId>, Vec<PlayerId>)>,
) -> Vec<(Vec<PlayerId>, Vec<PlayerId>)> {
    let len = columns.len();
    for i in 0..len {
        if i + 1 >= len {
            break;
        }
        loop {
            let top_len = columns[i].0.len();
            let bottom_len = columns[i].1.len();
            if top_len == bottom_len {
                break;
            }
            if bottom_len < top_len {
                if columns[i + 1].0.is_empty() {
                    break;
                }
                let borrowed = columns[i + 1].0.remove(0);
                columns[i].1.push(borrowed);
            } else {
                let moved = columns[i].1.remove(0);
                columns[i].0.push(moved);
            }
        }
    }
    columns
}

/// Opponent choice for the greedy pass: fewest prior meetings with the
/// player, then closest to the player's fold slot, then lowest index.
/// Total order, so the choice is unique.
fn opponent_preference(
    player: &Candidate,
    a: &Candidate,
    b: &Candidate,
    stats: &StatsTable,
) -> Ordering {
    let met_a = stats.times_played(a.id, player.id);
    let met_b = stats.times_played(b.id, player.id);
    met_a
        .cmp(&met_b)
        .then_with(|| {
            let dist_a = (a.index as i64 - player.target_index).abs();
            let dist_b = (b.index as i64 - player.target_index).abs();
            dist_a.cmp(&dist_b)
        })
        .then_with(|| a.index.cmp(&b.index))
}

/// Pair the eligible players (bye excluded) Swiss-style.
pub fn swiss_matches(
    tournament_id: TournamentId,
    stats: &StatsTable,
    config: &PairingConfig,
    bye_player: Option<PlayerId>,
) -> Vec<GameMatch> {
    let mut ranked: Vec<RankedPlayer> = stats
        .eligible()
        .filter(|stat| Some(stat.player_id) != bye_player)
        .map(|stat| RankedPlayer {
            id: stat.player_id,
            score: stat.pairing_score,
            rating: stat.rating,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.rating.cmp(&a.rating))
    });

    // Bucket by pairing score; ranked is already descending, so equal
    // scores are adjacent and buckets come out strongest-first.
    let mut groups: Vec<Vec<PlayerId>> = Vec::new();
    let mut last_score = f64::NAN;
    for player in &ranked {
        if groups.is_empty() || player.score != last_score {
            groups.push(Vec::new());
            last_score = player.score;
        }
        if let Some(group) = groups.last_mut() {
            group.push(player.id);
        }
    }

    let chunks = batch_groups(groups, 2 * config.max_punch_down as usize);
    let halves: Vec<(Vec<PlayerId>, Vec<PlayerId>)> = chunks.into_iter().map(swiss_split).collect();
    let columns: Vec<(Vec<PlayerId>, Vec<PlayerId>)> = fill_gaps(halves)
        .into_iter()
        .filter(|(top, _)| !top.is_empty())
        .collect();

    // Flatten into one pairing order: per chunk, top half then bottom half,
    // each entry remembering its fold partner.
    let mut order: Vec<(PlayerId, Option<PlayerId>)> = Vec::new();
    for (top, bottom) in &columns {
        for (i, id) in top.iter().enumerate() {
            order.push((*id, bottom.get(i).copied()));
        }
        for (i, id) in bottom.iter().enumerate() {
            order.push((*id, top.get(i).copied()));
        }
    }

    let mut candidates: Vec<Candidate> = order
        .iter()
        .enumerate()
        .map(|(index, (id, partner))| {
            let target_index = partner
                .and_then(|partner_id| order.iter().position(|(other, _)| *other == partner_id))
                .map_or(-1, |pos| pos as i64);
            Candidate {
                id: *id,
                index,
                target_index,
            }
        })
        .collect();

    let mut matches: Vec<GameMatch> = Vec::new();
    let mut board_number = 0;

    // Candidates stay sorted by index (built in order, only ever removed),
    // so the front is always the lowest-index unpaired player.
    while !candidates.is_empty() {
        let player = candidates.remove(0);
        let choice = candidates
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| opponent_preference(&player, a, b, stats))
            .map(|(pos, _)| pos);

        if let Some(pos) = choice {
            let opponent = candidates.remove(pos);
            board_number += 1;
            matches.push(create_match(
                player.id,
                opponent.id,
                stats,
                board_number,
                tournament_id,
                config.tiebreak_seed.wrapping_add(board_number),
            ));
        }
    }

    matches
}
