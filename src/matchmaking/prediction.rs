//! Win prediction from strength differences

use crate::config::matchmaking::{MatchmakingConfig, PREDICTION_SCALE};
use crate::error::Result;
use crate::types::{Prediction, Side};
use crate::utils::{round_to, sigmoid};

/// Predicts match winners with a logistic curve over the strength gap
#[derive(Debug, Clone)]
pub struct WinPredictor {
    scale: f64,
}

impl Default for WinPredictor {
    fn default() -> Self {
        Self {
            scale: PREDICTION_SCALE,
        }
    }
}

impl WinPredictor {
    pub fn new(config: &MatchmakingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scale: config.prediction_scale,
        })
    }

    /// Probability that the side with `strength_a` wins
    pub fn probability(&self, strength_a: f64, strength_b: f64) -> f64 {
        sigmoid((strength_a - strength_b) / self.scale)
    }

    pub fn predict(
        &self,
        strength_a: f64,
        strength_b: f64,
        label_a: &str,
        label_b: &str,
    ) -> Prediction {
        let probability_a = self.probability(strength_a, strength_b);
        let probability_b = 1.0 - probability_a;

        let percent_a = round_to(probability_a * 100.0, 1);
        let percent_b = round_to(probability_b * 100.0, 1);

        // Decided on the unrounded probability; an exactly even matchup goes to B
        let (favorite, favorite_label) = if probability_a * 100.0 > 50.0 {
            (Side::A, label_a)
        } else {
            (Side::B, label_b)
        };

        Prediction {
            probability_a,
            probability_b,
            percent_a,
            percent_b,
            favorite,
            favorite_label: favorite_label.to_string(),
            confidence: percent_a.max(percent_b),
        }
    }
}
