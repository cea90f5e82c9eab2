//! Ranked standings derived from aggregated statistics.

use crate::logic::stats::StatsTable;
use crate::models::Standing;

/// Rank the eligible players by score, then rating, with 1-based positions.
///
/// The sort is stable over the roster-ordered stats, so players tied on
/// both keys keep their roster order rather than shifting run to run. No
/// tie-break beyond rating is promised.
pub fn create_standings(stats: &StatsTable) -> Vec<Standing> {
    let mut standings: Vec<Standing> = stats
        .eligible()
        .map(|stat| Standing {
            player_id: stat.player_id,
            position: 0,
            score: stat.score,
            rating: stat.rating,
            initial_rating: stat.initial_rating,
            win: stat.win,
            loss: stat.loss,
            draw: stat.draw,
            bye: stat.bye,
        })
        .collect();
    standings.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.rating.cmp(&a.rating))
    });
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.position = i as u32 + 1;
    }
    standings
}
