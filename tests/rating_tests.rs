//! Integration tests for rating updates and the match completion workflow

mod fixtures;

use proptest::prelude::*;
use team_ladder::rating::{EloCalculator, InMemoryRatingStorage, RatingStorage};
use team_ladder::types::{MatchRecord, MatchStatus, Outcome, RatingState};
use team_ladder::LadderError;

use fixtures::{season_roster, team};

#[test]
fn test_reference_values() {
    let calculator = EloCalculator::default();

    let probability = calculator.expected_win_probability(1200.0, 1000.0);
    assert!((probability - 0.7597).abs() < 0.001);

    let (new_rating, _) = calculator.update_ratings(1200.0, 1000.0, Outcome::TeamA);
    assert!((new_rating - 1207.69).abs() < 0.01);

    let percentage = calculator.expected_win_percentage(1200.0, 1000.0);
    assert!((percentage - 76.0).abs() < 0.1);
}

#[test]
fn test_season_of_results() {
    let storage = InMemoryRatingStorage::with_teams(season_roster());
    let calculator = EloCalculator::default();

    let results = [
        ("titans", "falcons", "titans"),
        ("wolves", "otters", "otters"),
        ("comets", "ravens", "ravens"),
        ("titans", "ravens", "ravens"),
        ("falcons", "wolves", "falcons"),
    ];

    for (round, (team_a, team_b, winner)) in results.iter().enumerate() {
        let record = MatchRecord::scheduled(*team_a, *team_b, round as u32 + 1).complete(*winner);
        storage.record_match(&record, &calculator).unwrap();
    }

    let ravens = storage.get_rating(&"ravens".to_string()).unwrap().unwrap();
    assert_eq!(ravens.state.wins, 10);
    assert_eq!(ravens.state.losses, 5);

    let titans = storage.get_rating(&"titans".to_string()).unwrap().unwrap();
    assert_eq!(titans.state.total_games(), 18);

    // Upset win by the weakest team lifts it by more than half the K-factor
    let otters = storage.get_rating(&"otters".to_string()).unwrap().unwrap();
    assert!(otters.state.rating - 1104.7 > 16.0);

    let leaderboard = storage.leaderboard(Some(1)).unwrap();
    assert_eq!(leaderboard[0].team_id, "titans");
}

#[test]
fn test_rejected_matches_do_not_change_ratings() {
    let storage = InMemoryRatingStorage::with_teams(vec![
        team("red", 1200.0, 0, 0),
        team("blue", 1200.0, 0, 0),
    ]);
    let calculator = EloCalculator::default();

    let mut in_progress = MatchRecord::scheduled("red", "blue", 1);
    in_progress.status = MatchStatus::InProgress;
    in_progress.winner = Some("red".to_string());

    let err = storage.record_match(&in_progress, &calculator).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LadderError>(),
        Some(LadderError::MatchNotDecided { .. })
    ));

    let wrong_winner = MatchRecord::scheduled("red", "blue", 1).complete("green");
    let err = storage.record_match(&wrong_winner, &calculator).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LadderError>(),
        Some(LadderError::TeamNotInMatch { .. })
    ));

    for id in ["red", "blue"] {
        let entry = storage.get_rating(&id.to_string()).unwrap().unwrap();
        assert_eq!(entry.state, RatingState::default());
    }
}

proptest! {
    #[test]
    fn prop_equal_ratings_move_by_sixteen(rating in 0.0f64..3000.0) {
        let calculator = EloCalculator::default();
        let (new_a, new_b) = calculator.update_ratings(rating, rating, Outcome::TeamA);
        prop_assert!((new_a - (rating + 16.0)).abs() <= 0.005 + 1e-9);
        prop_assert!((new_b - (rating - 16.0)).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn prop_expected_scores_are_symmetric(a in 0.0f64..3000.0, b in 0.0f64..3000.0) {
        let calculator = EloCalculator::default();
        let total = calculator.expected_win_probability(a, b)
            + calculator.expected_win_probability(b, a);
        prop_assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_winner_gains_and_loser_loses(a in 0.0f64..3000.0, b in 0.0f64..3000.0) {
        let calculator = EloCalculator::default();
        let (new_a, new_b) = calculator.update_ratings(a, b, Outcome::TeamB);
        // Allow for rounding to 2 decimals
        prop_assert!(new_a <= a + 0.005);
        prop_assert!(new_b >= b - 0.005);
        prop_assert!(b + 32.0 - new_b >= -0.005);
    }
}
