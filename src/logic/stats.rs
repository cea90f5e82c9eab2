//! Per-player statistics aggregated from round history.
//!
//! Statistics are recomputed from scratch on every invocation; nothing here
//! is persisted. The roster supplies the baseline rating and matches-played
//! counters, and the match records themselves are the authority for how
//! those evolved during the tournament.

use crate::models::{MatchResult, Player, PlayerId, Round, TournamentError};
use std::collections::HashMap;

/// Aggregated view of one player's tournament so far.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStat {
    pub player_id: PlayerId,
    pub win: u32,
    pub loss: u32,
    pub draw: u32,
    pub bye: u32,
    /// Tournament points: win + draw/2 + bye/2.
    pub score: f64,
    /// Points used for score-grouping: byes excluded, so a bye does not drag
    /// a player into a stronger bracket.
    pub pairing_score: f64,
    pub rating: i32,
    pub previous_rating: i32,
    pub initial_rating: i32,
    pub matches_played: u32,
    /// How many times this player has had the white pieces.
    pub white_played: u32,
    /// Times this player has faced each opponent. Symmetric between any two
    /// real players who have met.
    pub opponents: HashMap<PlayerId, u32>,
}

impl PlayerStat {
    fn from_player(player: &Player) -> Self {
        Self {
            player_id: player.id,
            win: 0,
            loss: 0,
            draw: 0,
            bye: 0,
            score: 0.0,
            pairing_score: 0.0,
            rating: player.rating,
            previous_rating: player.rating,
            initial_rating: player.rating,
            matches_played: player.matches_played,
            white_played: 0,
            opponents: HashMap::new(),
        }
    }

    /// Times this player has faced `opponent`.
    pub fn times_played(&self, opponent: PlayerId) -> u32 {
        self.opponents.get(&opponent).copied().unwrap_or(0)
    }
}

/// Owned collection of player statistics, in roster order.
///
/// Records are never structurally removed while the table is in use:
/// excluding a player from pairing flips an eligibility flag, so indices
/// and iteration order stay stable for the whole computation.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsTable {
    records: Vec<PlayerStat>,
    index: HashMap<PlayerId, usize>,
    eligible: Vec<bool>,
}

impl StatsTable {
    /// One zeroed record per roster member.
    pub fn from_roster(roster: &[Player]) -> Self {
        let records: Vec<PlayerStat> = roster.iter().map(PlayerStat::from_player).collect();
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.player_id, i))
            .collect();
        let eligible = vec![true; records.len()];
        Self {
            records,
            index,
            eligible,
        }
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerStat> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut PlayerStat> {
        let i = self.index.get(&id).copied()?;
        self.records.get_mut(i)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.index.contains_key(&id)
    }

    /// Restrict the eligible set to players matching the predicate. Records
    /// stay in place; the player is just skipped by `eligible()` from now on.
    pub fn retain_eligible(&mut self, mut keep: impl FnMut(PlayerId) -> bool) {
        for (i, record) in self.records.iter().enumerate() {
            if self.eligible[i] && !keep(record.player_id) {
                self.eligible[i] = false;
            }
        }
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible.iter().filter(|e| **e).count()
    }

    /// Eligible records in roster order.
    pub fn eligible(&self) -> impl Iterator<Item = &PlayerStat> {
        self.records
            .iter()
            .enumerate()
            .filter(|(i, _)| self.eligible[*i])
            .map(|(_, r)| r)
    }

    /// How many times `a` has faced `b` (0 when either is unknown).
    pub fn times_played(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.get(a).map(|s| s.times_played(b)).unwrap_or(0)
    }
}

/// Fold the round history into a fresh [`StatsTable`].
///
/// Rounds must be oldest-first. Matches referencing players outside the
/// roster are counted only for the sides that are known; a match with the
/// bye on both sides, or the same player on both sides, is malformed data.
pub fn compute_player_stats(
    rounds: &[Round],
    roster: &[Player],
) -> Result<StatsTable, TournamentError> {
    let mut stats = StatsTable::from_roster(roster);

    for (round_index, round) in rounds.iter().enumerate() {
        for game in &round.matches {
            let white = game.white.player();
            let black = game.black.player();

            if white.is_none() && black.is_none() {
                return Err(TournamentError::MalformedMatch(game.id));
            }
            if white.is_some() && white == black {
                return Err(TournamentError::MalformedMatch(game.id));
            }

            match game.result {
                MatchResult::WhiteWon => {
                    if let Some(stat) = white.and_then(|id| stats.get_mut(id)) {
                        stat.win += 1;
                    }
                    if let Some(stat) = black.and_then(|id| stats.get_mut(id)) {
                        stat.loss += 1;
                    }
                }
                MatchResult::BlackWon => {
                    if let Some(stat) = white.and_then(|id| stats.get_mut(id)) {
                        stat.loss += 1;
                    }
                    if let Some(stat) = black.and_then(|id| stats.get_mut(id)) {
                        stat.win += 1;
                    }
                }
                MatchResult::Draw => {
                    if let Some(stat) = white.and_then(|id| stats.get_mut(id)) {
                        stat.draw += 1;
                    }
                    if let Some(stat) = black.and_then(|id| stats.get_mut(id)) {
                        stat.draw += 1;
                    }
                }
                MatchResult::DidNotStart => {
                    // A finalized round scores an unplayed slot as a bye for
                    // each real side.
                    if let Some(stat) = white.and_then(|id| stats.get_mut(id)) {
                        stat.bye += 1;
                    }
                    if let Some(stat) = black.and_then(|id| stats.get_mut(id)) {
                        stat.bye += 1;
                    }
                }
            }

            // Rating and experience snapshots only exist on real pairings;
            // the match record is authoritative, not recomputed.
            if let (Some(white_id), Some(black_id)) = (white, black) {
                if let Some(stat) = stats.get_mut(white_id) {
                    stat.previous_rating = game.white_rating;
                    stat.rating = game.new_white_rating.unwrap_or(game.white_rating);
                    stat.matches_played = game.white_matches_played;
                    stat.white_played += 1;
                    if round_index == 0 {
                        stat.initial_rating = game.white_rating;
                    }
                    *stat.opponents.entry(black_id).or_insert(0) += 1;
                }
                if let Some(stat) = stats.get_mut(black_id) {
                    stat.previous_rating = game.black_rating;
                    stat.rating = game.new_black_rating.unwrap_or(game.black_rating);
                    stat.matches_played = game.black_matches_played;
                    if round_index == 0 {
                        stat.initial_rating = game.black_rating;
                    }
                    *stat.opponents.entry(white_id).or_insert(0) += 1;
                }
            }
        }
    }

    for stat in &mut stats.records {
        stat.score = f64::from(stat.win) + 0.5 * f64::from(stat.draw) + 0.5 * f64::from(stat.bye);
        stat.pairing_score = f64::from(stat.win) + 0.5 * f64::from(stat.draw);
    }

    Ok(stats)
}
