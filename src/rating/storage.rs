//! Rating storage interface and implementations
//!
//! This module defines the interface for persisting and retrieving team
//! rating states. Recording a match is part of the interface so that an
//! implementation can serialize the read-modify-write of both teams.

use crate::error::{LadderError, Result};
use crate::rating::elo::EloCalculator;
use crate::types::{MatchRatingUpdate, MatchRecord, RatingState, Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

/// Storage entry for a team's rating with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub team_id: TeamId,
    pub name: String,
    pub state: RatingState,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RatingEntry {
    /// Create a new rating entry for a team
    pub fn new(team_id: TeamId, name: String, state: RatingState) -> Self {
        let now = Utc::now();
        Self {
            team_id,
            name,
            state,
            last_updated: now,
            created_at: now,
        }
    }

    /// Replace the rating state and touch the update timestamp
    pub fn update_state(&mut self, state: RatingState) {
        self.state = state;
        self.last_updated = Utc::now();
    }

    /// View the entry as a matchmaking team
    pub fn to_team(&self) -> Team {
        Team::new(self.team_id.clone(), self.name.clone(), self.state)
    }
}

impl From<Team> for RatingEntry {
    fn from(team: Team) -> Self {
        Self::new(team.id, team.name, team.stats)
    }
}

/// Trait for rating storage operations
pub trait RatingStorage: Send + Sync {
    /// Get a team's rating entry
    fn get_rating(&self, team_id: &TeamId) -> Result<Option<RatingEntry>>;

    /// Store or update a team's rating
    fn store_rating(&self, entry: RatingEntry) -> Result<()>;

    /// Get ratings for multiple teams
    fn get_ratings(&self, team_ids: &[TeamId]) -> Result<HashMap<TeamId, RatingEntry>>;

    /// Get all teams with ratings
    fn get_all_ratings(&self) -> Result<HashMap<TeamId, RatingEntry>>;

    /// Remove a team's rating
    fn remove_rating(&self, team_id: &TeamId) -> Result<bool>;

    /// Get teams whose rating lies in `[min_rating, max_rating]`, highest first
    fn get_teams_by_rating_range(
        &self,
        min_rating: f64,
        max_rating: f64,
        limit: Option<usize>,
    ) -> Result<Vec<RatingEntry>>;

    /// Get total number of rated teams
    fn get_team_count(&self) -> Result<usize>;

    /// Teams ordered by rating, highest first
    fn leaderboard(&self, limit: Option<usize>) -> Result<Vec<RatingEntry>> {
        self.get_teams_by_rating_range(f64::MIN, f64::MAX, limit)
    }

    /// Apply a completed match to both teams' ratings and win/loss records
    ///
    /// Fails without touching storage when the match is not decided, when
    /// either team is unknown, or when a resulting rating would leave the
    /// calculator's valid range.
    fn record_match(
        &self,
        record: &MatchRecord,
        calculator: &EloCalculator,
    ) -> Result<MatchRatingUpdate>;
}

fn sort_by_rating_desc(entries: &mut [RatingEntry]) {
    // Stable, so equal ratings keep their relative order
    entries.sort_by(|a, b| b.state.rating.total_cmp(&a.state.rating));
}

/// In-memory rating storage implementation
#[derive(Debug, Default)]
pub struct InMemoryRatingStorage {
    ratings: RwLock<HashMap<TeamId, RatingEntry>>,
}

impl InMemoryRatingStorage {
    /// Create a new in-memory rating storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with a roster
    pub fn with_teams(teams: impl IntoIterator<Item = Team>) -> Self {
        let ratings = teams
            .into_iter()
            .map(|team| (team.id.clone(), RatingEntry::from(team)))
            .collect();

        Self {
            ratings: RwLock::new(ratings),
        }
    }

    /// Register a team with the calculator's initial state if it is unknown
    pub fn register_team(
        &self,
        team_id: TeamId,
        name: String,
        calculator: &EloCalculator,
    ) -> Result<RatingEntry> {
        let mut ratings = self.write()?;
        let entry = ratings
            .entry(team_id.clone())
            .or_insert_with(|| RatingEntry::new(team_id, name, calculator.initial_state()));
        Ok(entry.clone())
    }

    /// Snapshot of every stored team, in leaderboard order
    pub fn teams(&self) -> Result<Vec<Team>> {
        Ok(self
            .leaderboard(None)?
            .iter()
            .map(RatingEntry::to_team)
            .collect())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<TeamId, RatingEntry>>> {
        self.ratings.read().map_err(|_| {
            LadderError::InternalError {
                message: "Failed to acquire ratings read lock".to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<TeamId, RatingEntry>>> {
        self.ratings.write().map_err(|_| {
            LadderError::InternalError {
                message: "Failed to acquire ratings write lock".to_string(),
            }
            .into()
        })
    }
}

impl RatingStorage for InMemoryRatingStorage {
    fn get_rating(&self, team_id: &TeamId) -> Result<Option<RatingEntry>> {
        Ok(self.read()?.get(team_id).cloned())
    }

    fn store_rating(&self, entry: RatingEntry) -> Result<()> {
        self.write()?.insert(entry.team_id.clone(), entry);
        Ok(())
    }

    fn get_ratings(&self, team_ids: &[TeamId]) -> Result<HashMap<TeamId, RatingEntry>> {
        let ratings = self.read()?;

        let mut result = HashMap::new();
        for team_id in team_ids {
            if let Some(entry) = ratings.get(team_id) {
                result.insert(team_id.clone(), entry.clone());
            }
        }

        Ok(result)
    }

    fn get_all_ratings(&self) -> Result<HashMap<TeamId, RatingEntry>> {
        Ok(self.read()?.clone())
    }

    fn remove_rating(&self, team_id: &TeamId) -> Result<bool> {
        Ok(self.write()?.remove(team_id).is_some())
    }

    fn get_teams_by_rating_range(
        &self,
        min_rating: f64,
        max_rating: f64,
        limit: Option<usize>,
    ) -> Result<Vec<RatingEntry>> {
        let ratings = self.read()?;

        let mut matching_entries: Vec<RatingEntry> = ratings
            .values()
            .filter(|entry| {
                let rating = entry.state.rating;
                rating >= min_rating && rating <= max_rating
            })
            .cloned()
            .collect();

        // HashMap order is arbitrary; fix it before sorting
        matching_entries.sort_by(|a, b| a.team_id.cmp(&b.team_id));
        sort_by_rating_desc(&mut matching_entries);

        if let Some(limit) = limit {
            matching_entries.truncate(limit);
        }

        Ok(matching_entries)
    }

    fn get_team_count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    fn record_match(
        &self,
        record: &MatchRecord,
        calculator: &EloCalculator,
    ) -> Result<MatchRatingUpdate> {
        let outcome = record.outcome().map_err(|e| {
            warn!("Rejected rating update for {}: {}", record.label(), e);
            e
        })?;

        // Both teams are read and written under one lock so concurrent
        // results for the same team cannot lose an update
        let mut ratings = self.write()?;

        let old_a = ratings
            .get(&record.team_a)
            .map(|entry| entry.state)
            .ok_or_else(|| LadderError::TeamNotFound {
                team_id: record.team_a.clone(),
            })?;
        let old_b = ratings
            .get(&record.team_b)
            .map(|entry| entry.state)
            .ok_or_else(|| LadderError::TeamNotFound {
                team_id: record.team_b.clone(),
            })?;

        let (new_a, new_b) = calculator.apply_outcome(&old_a, &old_b, outcome);
        for rating in [new_a.rating, new_b.rating] {
            calculator.check_rating(rating).map_err(|e| {
                warn!("Rejected rating update for {}: {}", record.label(), e);
                e
            })?;
        }

        if let Some(entry) = ratings.get_mut(&record.team_a) {
            entry.update_state(new_a);
        }
        if let Some(entry) = ratings.get_mut(&record.team_b) {
            entry.update_state(new_b);
        }

        info!(
            "Recorded {}: {} {:.2} -> {:.2}, {} {:.2} -> {:.2}",
            record.label(),
            record.team_a,
            old_a.rating,
            new_a.rating,
            record.team_b,
            old_b.rating,
            new_b.rating
        );

        Ok(MatchRatingUpdate {
            team_a: record.team_a.clone(),
            team_b: record.team_b.clone(),
            outcome,
            old_a,
            new_a,
            old_b,
            new_b,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;
    use std::sync::Arc;
    use std::thread;

    fn team(id: &str, rating: f64) -> Team {
        Team::new(id, id.to_uppercase(), RatingState::new(rating, 0, 0))
    }

    #[test]
    fn test_store_and_get() {
        let storage = InMemoryRatingStorage::new();
        let entry = RatingEntry::from(team("red", 1300.0));
        storage.store_rating(entry.clone()).unwrap();

        let loaded = storage.get_rating(&"red".to_string()).unwrap().unwrap();
        assert_eq!(loaded, entry);
        assert!(storage.get_rating(&"blue".to_string()).unwrap().is_none());
        assert_eq!(storage.get_team_count().unwrap(), 1);
    }

    #[test]
    fn test_register_team_uses_initial_state() {
        let storage = InMemoryRatingStorage::new();
        let calculator = EloCalculator::default();

        let entry = storage
            .register_team("new".to_string(), "Newcomers".to_string(), &calculator)
            .unwrap();
        assert_eq!(entry.state, RatingState::default());

        // Registering again keeps the existing entry
        storage
            .store_rating(RatingEntry::from(team("new", 1500.0)))
            .unwrap();
        let entry = storage
            .register_team("new".to_string(), "Newcomers".to_string(), &calculator)
            .unwrap();
        assert_eq!(entry.state.rating, 1500.0);
    }

    #[test]
    fn test_get_ratings_and_remove() {
        let storage =
            InMemoryRatingStorage::with_teams(vec![team("a", 1200.0), team("b", 1300.0)]);

        let found = storage
            .get_ratings(&["a".to_string(), "missing".to_string()])
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("a"));

        assert!(storage.remove_rating(&"a".to_string()).unwrap());
        assert!(!storage.remove_rating(&"a".to_string()).unwrap());
        assert_eq!(storage.get_all_ratings().unwrap().len(), 1);
    }

    #[test]
    fn test_rating_range_and_leaderboard() {
        let storage = InMemoryRatingStorage::with_teams(vec![
            team("a", 1000.0),
            team("b", 1600.0),
            team("c", 1250.0),
            team("d", 1400.0),
        ]);

        let range = storage
            .get_teams_by_rating_range(1200.0, 1500.0, None)
            .unwrap();
        let ids: Vec<_> = range.iter().map(|e| e.team_id.as_str()).collect();
        assert_eq!(ids, vec!["d", "c"]);

        let top = storage.leaderboard(Some(2)).unwrap();
        let ids: Vec<_> = top.iter().map(|e| e.team_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d"]);

        let teams = storage.teams().unwrap();
        assert_eq!(teams.len(), 4);
        assert_eq!(teams[3].id, "a");
    }

    #[test]
    fn test_record_match() {
        let storage =
            InMemoryRatingStorage::with_teams(vec![team("red", 1200.0), team("blue", 1200.0)]);
        let calculator = EloCalculator::default();

        let record = MatchRecord::scheduled("red", "blue", 1).complete("red");
        let update = storage.record_match(&record, &calculator).unwrap();

        assert_eq!(update.outcome, Outcome::TeamA);
        assert_eq!(update.delta_a(), 16.0);
        assert_eq!(update.delta_b(), -16.0);

        let red = storage.get_rating(&"red".to_string()).unwrap().unwrap();
        assert_eq!(red.state, RatingState::new(1216.0, 1, 0));
        let blue = storage.get_rating(&"blue".to_string()).unwrap().unwrap();
        assert_eq!(blue.state, RatingState::new(1184.0, 0, 1));
    }

    #[test]
    fn test_record_undecided_match_leaves_storage_untouched() {
        let storage =
            InMemoryRatingStorage::with_teams(vec![team("red", 1200.0), team("blue", 1200.0)]);
        let calculator = EloCalculator::default();

        let pending = MatchRecord::scheduled("red", "blue", 1);
        let err = storage.record_match(&pending, &calculator).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::MatchNotDecided { .. })
        ));

        let red = storage.get_rating(&"red".to_string()).unwrap().unwrap();
        assert_eq!(red.state, RatingState::new(1200.0, 0, 0));
    }

    #[test]
    fn test_record_match_unknown_team() {
        let storage = InMemoryRatingStorage::with_teams(vec![team("red", 1200.0)]);
        let calculator = EloCalculator::default();

        let record = MatchRecord::scheduled("red", "ghost", 1).complete("red");
        let err = storage.record_match(&record, &calculator).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::TeamNotFound { .. })
        ));

        let red = storage.get_rating(&"red".to_string()).unwrap().unwrap();
        assert_eq!(red.state.total_games(), 0);
    }

    #[test]
    fn test_record_self_match_leaves_storage_untouched() {
        let storage = InMemoryRatingStorage::with_teams(vec![team("red", 1200.0)]);
        let calculator = EloCalculator::default();

        let record = MatchRecord::scheduled("red", "red", 1).complete("red");
        let err = storage.record_match(&record, &calculator).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::SelfMatch { .. })
        ));

        let red = storage.get_rating(&"red".to_string()).unwrap().unwrap();
        assert_eq!(red.state, RatingState::new(1200.0, 0, 0));
    }

    #[test]
    fn test_record_match_rejects_negative_rating() {
        let storage = InMemoryRatingStorage::with_teams(vec![team("red", 5.0), team("blue", 5.0)]);
        let calculator = EloCalculator::default();

        // Losing at 5.0 against an equal team would drop red to -11.0
        let record = MatchRecord::scheduled("red", "blue", 1).complete("blue");
        let err = storage.record_match(&record, &calculator).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::InvalidRating { .. })
        ));

        for id in ["red", "blue"] {
            let entry = storage.get_rating(&id.to_string()).unwrap().unwrap();
            assert_eq!(entry.state, RatingState::new(5.0, 0, 0));
        }
    }

    #[test]
    fn test_concurrent_results_are_not_lost() {
        let storage = Arc::new(InMemoryRatingStorage::with_teams(vec![
            team("hub", 1200.0),
            team("a", 1200.0),
            team("b", 1200.0),
            team("c", 1200.0),
            team("d", 1200.0),
        ]));
        let calculator = Arc::new(EloCalculator::default());

        let handles: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|opponent| {
                let storage = storage.clone();
                let calculator = calculator.clone();
                thread::spawn(move || {
                    let record = MatchRecord::scheduled("hub", opponent, 1).complete("hub");
                    storage.record_match(&record, &calculator).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let hub = storage.get_rating(&"hub".to_string()).unwrap().unwrap();
        assert_eq!(hub.state.wins, 4);
        assert_eq!(hub.state.losses, 0);
        assert!(hub.state.rating > 1250.0);
    }
}
