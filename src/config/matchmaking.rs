//! Matchmaking scorer configuration
//!
//! Defaults reproduce the weights and normalizers the tournament workflow
//! has always used; they are exposed so they can be audited and tuned.

use crate::error::{LadderError, Result};
use serde::{Deserialize, Serialize};

/// Weight of the normalized rating in the strength score
pub const ELO_WEIGHT: f64 = 0.50;
/// Weight of the win rate in the strength score
pub const WIN_RATE_WEIGHT: f64 = 0.30;
/// Weight of the experience term in the strength score
pub const EXPERIENCE_WEIGHT: f64 = 0.20;
/// Rating treated as the top of the scale
pub const RATING_CEILING: f64 = 2000.0;
/// Games needed for full experience
pub const EXPERIENCED_GAMES: f64 = 20.0;
/// Strength gap at which the balance score reaches 0
pub const ZERO_BALANCE_GAP: f64 = 30.0;
/// Strength difference scale of the win prediction curve
pub const PREDICTION_SCALE: f64 = 10.0;

/// Weights of the three strength components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthWeights {
    pub elo: f64,
    pub win_rate: f64,
    pub experience: f64,
}

impl Default for StrengthWeights {
    fn default() -> Self {
        Self {
            elo: ELO_WEIGHT,
            win_rate: WIN_RATE_WEIGHT,
            experience: EXPERIENCE_WEIGHT,
        }
    }
}

impl StrengthWeights {
    pub fn total(&self) -> f64 {
        self.elo + self.win_rate + self.experience
    }
}

/// Parameters of the strength, balance and prediction scorers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingConfig {
    pub weights: StrengthWeights,
    pub rating_ceiling: f64,
    pub experienced_games: f64,
    pub zero_balance_gap: f64,
    pub prediction_scale: f64,
}

impl Default for MatchmakingConfig {
    fn default() -> Self {
        Self {
            weights: StrengthWeights::default(),
            rating_ceiling: RATING_CEILING,
            experienced_games: EXPERIENCED_GAMES,
            zero_balance_gap: ZERO_BALANCE_GAP,
            prediction_scale: PREDICTION_SCALE,
        }
    }
}

impl MatchmakingConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = &self.weights;
        if weights.elo < 0.0 || weights.win_rate < 0.0 || weights.experience < 0.0 {
            return Err(LadderError::ConfigurationError {
                message: "Strength weights must be non-negative".to_string(),
            }
            .into());
        }

        // Weights summing to 1 keep strength within [0, 100]
        if (weights.total() - 1.0).abs() > 1e-9 {
            return Err(LadderError::ConfigurationError {
                message: format!("Strength weights must sum to 1, got {}", weights.total()),
            }
            .into());
        }

        for (name, value) in [
            ("Rating ceiling", self.rating_ceiling),
            ("Experienced games", self.experienced_games),
            ("Zero balance gap", self.zero_balance_gap),
            ("Prediction scale", self.prediction_scale),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(LadderError::ConfigurationError {
                    message: format!("{} must be positive", name),
                }
                .into());
            }
        }

        Ok(())
    }
}
