//! ELO rating system implementation
//!
//! This module provides the two-team rating update on top of the elo
//! implementation from the skillratings crate, plus the read-only win
//! probability helpers used to show pre-match odds.

use crate::config::rating::RatingConfig;
use crate::error::{LadderError, Result};
use crate::types::{MatchResult, Outcome, RatingState};
use crate::utils::round_to;
use serde::{Deserialize, Serialize};
use skillratings::elo::{elo, expected_score, EloConfig, EloRating};
use skillratings::Outcomes;

/// Skill bracket derived from a raw rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RatingTier {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl RatingTier {
    pub fn from_rating(rating: f64) -> Self {
        if rating < 1200.0 {
            RatingTier::Beginner
        } else if rating < 1600.0 {
            RatingTier::Intermediate
        } else if rating < 2000.0 {
            RatingTier::Advanced
        } else if rating < 2400.0 {
            RatingTier::Expert
        } else {
            RatingTier::Master
        }
    }
}

impl std::fmt::Display for RatingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingTier::Beginner => write!(f, "Beginner"),
            RatingTier::Intermediate => write!(f, "Intermediate"),
            RatingTier::Advanced => write!(f, "Advanced"),
            RatingTier::Expert => write!(f, "Expert"),
            RatingTier::Master => write!(f, "Master"),
        }
    }
}

/// ELO rating calculator for two-team matches
#[derive(Debug, Clone, Default)]
pub struct EloCalculator {
    config: RatingConfig,
}

impl EloCalculator {
    /// Create a new calculator, rejecting invalid parameters
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    fn elo_config(&self) -> EloConfig {
        EloConfig {
            k: self.config.k_factor,
        }
    }

    /// State assigned to a team entering competition
    pub fn initial_state(&self) -> RatingState {
        RatingState {
            rating: self.config.initial_rating,
            wins: 0,
            losses: 0,
        }
    }

    /// Compute both teams' ratings after a decided match
    ///
    /// Each side moves by `K * (actual - expected)` where the winner scores 1
    /// and the loser 0. Results are rounded to 2 decimals.
    pub fn update_ratings(&self, rating_a: f64, rating_b: f64, outcome: Outcome) -> (f64, f64) {
        let outcome = match outcome {
            Outcome::TeamA => Outcomes::WIN,
            Outcome::TeamB => Outcomes::LOSS,
        };

        let (new_a, new_b) = elo(
            &EloRating { rating: rating_a },
            &EloRating { rating: rating_b },
            &outcome,
            &self.elo_config(),
        );

        (round_to(new_a.rating, 2), round_to(new_b.rating, 2))
    }

    /// Same as [`update_ratings`](Self::update_ratings) for a bundled result
    pub fn update(&self, result: &MatchResult) -> (f64, f64) {
        self.update_ratings(result.rating_a, result.rating_b, result.outcome)
    }

    /// Probability that a team rated `rating_a` beats one rated `rating_b`
    pub fn expected_win_probability(&self, rating_a: f64, rating_b: f64) -> f64 {
        let (expected_a, _expected_b) =
            expected_score(&EloRating { rating: rating_a }, &EloRating { rating: rating_b });
        expected_a
    }

    /// Win probability as a percentage rounded to 1 decimal
    pub fn expected_win_percentage(&self, rating_a: f64, rating_b: f64) -> f64 {
        round_to(self.expected_win_probability(rating_a, rating_b) * 100.0, 1)
    }

    /// Apply a decided match to both teams' full rating state
    ///
    /// Ratings move per [`update_ratings`](Self::update_ratings) and the
    /// win/loss counters are incremented. Ratings are not clamped, so a team
    /// near 0 can go negative; callers that persist the result check it with
    /// [`check_rating`](Self::check_rating).
    pub fn apply_outcome(
        &self,
        state_a: &RatingState,
        state_b: &RatingState,
        outcome: Outcome,
    ) -> (RatingState, RatingState) {
        let (rating_a, rating_b) = self.update_ratings(state_a.rating, state_b.rating, outcome);

        let mut new_a = RatingState {
            rating: rating_a,
            ..*state_a
        };
        let mut new_b = RatingState {
            rating: rating_b,
            ..*state_b
        };

        match outcome {
            Outcome::TeamA => {
                new_a.wins += 1;
                new_b.losses += 1;
            }
            Outcome::TeamB => {
                new_a.losses += 1;
                new_b.wins += 1;
            }
        }

        (new_a, new_b)
    }

    /// Whether a rating lies within `[0, max_rating]`
    pub fn validate_rating(&self, rating: f64) -> bool {
        rating >= 0.0 && rating <= self.config.max_rating
    }

    /// Error-returning variant of [`validate_rating`](Self::validate_rating)
    pub fn check_rating(&self, rating: f64) -> Result<()> {
        if self.validate_rating(rating) {
            return Ok(());
        }

        Err(LadderError::InvalidRating {
            rating,
            reason: format!("must lie within [0, {}]", self.config.max_rating),
        }
        .into())
    }

    pub fn rating_config(&self) -> &RatingConfig {
        &self.config
    }

    /// Get current configuration as JSON
    pub fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    /// Update configuration from JSON
    pub fn update_config(&mut self, config: serde_json::Value) -> Result<()> {
        let new_config: RatingConfig =
            serde_json::from_value(config).map_err(|e| LadderError::ConfigurationError {
                message: format!("Invalid rating configuration: {}", e),
            })?;

        new_config.validate()?;
        self.config = new_config;
        Ok(())
    }
}
