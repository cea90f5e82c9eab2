//! Tournament simulation driver: builds a roster, plays rounds with random
//! results, and prints the standings as the tournament progresses.
//! Run with: cargo run --bin simulate
//! Override with env: PLAYERS (roster size), ROUNDS (rounds to play),
//! ALGORITHM (swiss | rating), SEED (color tiebreak seed, random if unset),
//! JSON=1 (dump final standings as JSON).

use chess_club_engine::{
    complete_round, compute_player_stats, create_standings, record_match_result, MatchResult,
    PairingAlgorithm, PairingConfig, Player, Standing, Tournament,
};
use rand::Rng;

fn default_players() -> usize {
    9
}

fn default_rounds() -> usize {
    5
}

fn print_standings(standings: &[Standing], roster: &[Player]) {
    println!(
        "{:<4} {:<20} {:>6} {:>7} {:>4} {:>4} {:>4} {:>4}",
        "Pos", "Player", "Score", "Rating", "W", "L", "D", "Bye"
    );
    println!("{}", "-".repeat(60));
    for standing in standings {
        let name = roster
            .iter()
            .find(|p| p.id == standing.player_id)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        println!(
            "{:<4} {:<20} {:>6.1} {:>7} {:>4} {:>4} {:>4} {:>4}",
            standing.position,
            name,
            standing.score,
            standing.rating,
            standing.win,
            standing.loss,
            standing.draw,
            standing.bye
        );
    }
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let players: usize = std::env::var("PLAYERS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(default_players);
    let rounds: usize = std::env::var("ROUNDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(default_rounds);
    let algorithm = match std::env::var("ALGORITHM").as_deref() {
        Ok("rating") => PairingAlgorithm::Rating,
        _ => PairingAlgorithm::Swiss,
    };
    let config = match std::env::var("SEED").ok().and_then(|v| v.parse().ok()) {
        Some(seed) => PairingConfig::new(algorithm).with_seed(seed),
        None => PairingConfig::new(algorithm),
    };

    let mut rng = rand::thread_rng();
    let roster: Vec<Player> = (0..players)
        .map(|i| Player::new(format!("Player {}", i + 1), rng.gen_range(800..2400)))
        .collect();

    let mut tournament = Tournament::new("Simulated club night", config);
    for player in &roster {
        let _ = tournament.join(player.id);
    }
    log::info!(
        "simulating {} players over {} rounds ({:?} pairing, seed {})",
        players,
        rounds,
        algorithm,
        config.tiebreak_seed
    );

    for round_number in 1..=rounds {
        if let Err(e) = complete_round(&mut tournament, &roster, true) {
            log::error!("failed to generate round {}: {}", round_number, e);
            return;
        }

        if let Some(round) = tournament.current_round_mut() {
            for game in &mut round.matches {
                if game.is_bye() {
                    continue;
                }
                let result = match rng.gen_range(0..10) {
                    0..=4 => MatchResult::WhiteWon,
                    5..=8 => MatchResult::BlackWon,
                    _ => MatchResult::Draw,
                };
                if let Err(e) = record_match_result(game, result) {
                    log::warn!("could not record result: {}", e);
                }
            }
        }

        match compute_player_stats(&tournament.rounds, &roster) {
            Ok(stats) => {
                println!("\n=== After round {} ===", round_number);
                print_standings(&create_standings(&stats), &roster);
            }
            Err(e) => log::error!("stats aggregation failed: {}", e),
        }
    }

    if let Err(e) = complete_round(&mut tournament, &roster, false) {
        log::error!("failed to close the tournament: {}", e);
        return;
    }

    if std::env::var("JSON").map_or(false, |v| v == "1") {
        if let Ok(stats) = compute_player_stats(&tournament.rounds, &roster) {
            match serde_json::to_string_pretty(&create_standings(&stats)) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("could not serialize standings: {}", e),
            }
        }
    }
}
