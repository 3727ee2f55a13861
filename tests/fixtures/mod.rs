//! Shared rosters and helpers for integration testing

#![allow(dead_code)]

use team_ladder::types::{RatingState, Team};

/// Build a team with the given record
pub fn team(id: &str, rating: f64, wins: u32, losses: u32) -> Team {
    Team::new(id, format!("Team {}", id), RatingState::new(rating, wins, losses))
}

/// Teams with no match history, named t1, t2, ... in roster order
pub fn fresh_roster(ratings: &[f64]) -> Vec<Team> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, rating)| team(&format!("t{}", i + 1), *rating, 0, 0))
        .collect()
}

/// A realistic mid-season roster with mixed records
pub fn season_roster() -> Vec<Team> {
    vec![
        team("falcons", 1432.5, 9, 3),
        team("wolves", 1288.0, 6, 6),
        team("titans", 1611.2, 14, 2),
        team("otters", 1104.7, 2, 9),
        team("comets", 1250.0, 4, 4),
        team("ravens", 1375.9, 8, 5),
    ]
}

/// Ids covered by a set of matchups, in order of appearance
pub fn paired_ids(matchups: &[team_ladder::Matchup]) -> Vec<String> {
    matchups
        .iter()
        .flat_map(|m| [m.team_a.id.clone(), m.team_b.id.clone()])
        .collect()
}
