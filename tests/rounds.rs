//! Integration tests for the round lifecycle and tournament status.

use chess_club_engine::{
    complete_round, finalize_round, next_round, record_match_result, MatchResult,
    PairingAlgorithm, PairingConfig, Player, Tournament, TournamentError, TournamentStatus,
};

fn roster(ratings: &[i32]) -> Vec<Player> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, r)| Player::new(format!("P{i}"), *r))
        .collect()
}

fn tournament(players: &[Player]) -> Tournament {
    let mut t = Tournament::new(
        "Lifecycle test",
        PairingConfig::new(PairingAlgorithm::Swiss).with_seed(3),
    );
    for p in players {
        t.join(p.id).unwrap();
    }
    t
}

#[test]
fn generating_the_first_round_activates_the_tournament() {
    let players = roster(&[1500, 1400, 1300, 1200]);
    let mut t = tournament(&players);
    assert_eq!(t.status, TournamentStatus::Created);

    let round_id = complete_round(&mut t, &players, true).unwrap();

    assert_eq!(t.status, TournamentStatus::Active);
    assert_eq!(t.rounds.len(), 1);
    assert_eq!(round_id, Some(t.rounds[0].id));
    assert!(t.current_round().is_some());
}

#[test]
fn an_open_round_blocks_direct_generation() {
    let players = roster(&[1500, 1400]);
    let mut t = tournament(&players);
    complete_round(&mut t, &players, true).unwrap();

    assert_eq!(
        next_round(&t, &players),
        Err(TournamentError::RoundInProgress)
    );
}

#[test]
fn completing_a_round_defaults_unplayed_matches() {
    let players = roster(&[1500, 1400, 1300, 1200]);
    let mut t = tournament(&players);
    complete_round(&mut t, &players, true).unwrap();

    // Record one result, leave the other board untouched.
    if let Some(round) = t.current_round_mut() {
        let game = &mut round.matches[0];
        record_match_result(game, MatchResult::WhiteWon).unwrap();
    }
    complete_round(&mut t, &players, true).unwrap();

    let first = &t.rounds[0];
    assert!(first.completed);
    for game in &first.matches {
        assert!(game.completed);
    }
    assert_eq!(first.matches[1].result, MatchResult::DidNotStart);
    assert_eq!(t.rounds.len(), 2);
}

#[test]
fn declining_a_new_round_completes_the_tournament() {
    let players = roster(&[1500, 1400]);
    let mut t = tournament(&players);
    complete_round(&mut t, &players, true).unwrap();

    let round_id = complete_round(&mut t, &players, false).unwrap();

    assert_eq!(round_id, None);
    assert_eq!(t.status, TournamentStatus::Completed);
    assert!(t.rounds[0].completed);

    assert_eq!(
        complete_round(&mut t, &players, true),
        Err(TournamentError::InvalidState)
    );
    let late = Player::new("late", 1000);
    assert_eq!(t.join(late.id), Err(TournamentError::InvalidState));
}

#[test]
fn members_missing_from_the_roster_are_reported() {
    let players = roster(&[1500, 1400]);
    let mut t = tournament(&players);
    let ghost = Player::new("ghost", 1200);
    t.join(ghost.id).unwrap();

    assert_eq!(
        next_round(&t, &players),
        Err(TournamentError::PlayerNotFound(ghost.id))
    );
}

#[test]
fn finalize_round_closes_every_match() {
    let players = roster(&[1500, 1400, 1300]);
    let t = tournament(&players);
    let mut round = next_round(&t, &players).unwrap();

    finalize_round(&mut round);

    assert!(round.completed);
    assert!(round.matches.iter().all(|m| m.completed));
}

#[test]
fn repeated_rounds_rotate_pairings_and_finish_cleanly() {
    let players = roster(&[1700, 1600, 1500, 1400, 1300]);
    let mut t = tournament(&players);

    for _ in 0..4 {
        complete_round(&mut t, &players, true).unwrap();
        if let Some(round) = t.current_round_mut() {
            for game in &mut round.matches {
                if !game.is_bye() {
                    record_match_result(game, MatchResult::WhiteWon).unwrap();
                }
            }
        }
    }
    complete_round(&mut t, &players, false).unwrap();

    assert_eq!(t.rounds.len(), 4);
    assert_eq!(t.status, TournamentStatus::Completed);
    assert!(t.rounds.iter().all(|r| r.completed));
    // Every round keeps the one-bye-when-odd shape.
    for round in &t.rounds {
        assert_eq!(round.matches.iter().filter(|m| m.is_bye()).count(), 1);
        assert_eq!(round.matches.len(), 3);
    }
}

#[test]
fn tournaments_round_trip_through_json() {
    let players = roster(&[1500, 1400, 1300]);
    let mut t = tournament(&players);
    complete_round(&mut t, &players, true).unwrap();

    let json = serde_json::to_string(&t).unwrap();
    let back: Tournament = serde_json::from_str(&json).unwrap();

    assert_eq!(t, back);
}
