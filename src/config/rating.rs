//! Rating system configuration

use crate::error::{LadderError, Result};
use crate::types::BASE_RATING;
use serde::{Deserialize, Serialize};

/// Rating change magnitude per match
pub const K_FACTOR: f64 = 32.0;

/// Highest rating accepted as valid input
pub const MAX_VALID_RATING: f64 = 3000.0;

/// Parameters of the ELO rating update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// K-factor controlling how far a single match moves a rating
    pub k_factor: f64,
    /// Rating for newly registered teams
    pub initial_rating: f64,
    /// Upper bound used when validating ratings
    pub max_rating: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: K_FACTOR,
            initial_rating: BASE_RATING,
            max_rating: MAX_VALID_RATING,
        }
    }
}

impl RatingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.k_factor.is_nan() || self.k_factor <= 0.0 {
            return Err(LadderError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if self.max_rating.is_nan() || self.max_rating <= 0.0 {
            return Err(LadderError::ConfigurationError {
                message: "Maximum rating must be positive".to_string(),
            }
            .into());
        }

        if self.initial_rating < 0.0 || self.initial_rating > self.max_rating {
            return Err(LadderError::ConfigurationError {
                message: format!(
                    "Initial rating {} must lie within [0, {}]",
                    self.initial_rating, self.max_rating
                ),
            }
            .into());
        }

        Ok(())
    }
}
