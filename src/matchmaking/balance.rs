//! Match balance scoring and its display bands

use crate::config::matchmaking::{MatchmakingConfig, ZERO_BALANCE_GAP};
use crate::error::Result;
use crate::utils::{round_to, score_difference};
use serde::{Deserialize, Serialize};

/// Balance at or above which a pairing counts as a close match
pub const CLOSE_MATCH_BALANCE: f64 = 80.0;
/// Balance below which an upset is considered likely
pub const UPSET_LIKELY_BALANCE: f64 = 60.0;

/// Converts strength gaps into 0-100 balance scores
#[derive(Debug, Clone)]
pub struct MatchBalanceScorer {
    zero_balance_gap: f64,
}

impl Default for MatchBalanceScorer {
    fn default() -> Self {
        Self {
            zero_balance_gap: ZERO_BALANCE_GAP,
        }
    }
}

impl MatchBalanceScorer {
    pub fn new(config: &MatchmakingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            zero_balance_gap: config.zero_balance_gap,
        })
    }

    /// 100 for identical strengths, falling linearly to 0 at the zero-balance gap
    pub fn balance(&self, strength_a: f64, strength_b: f64) -> f64 {
        let difference = score_difference(strength_a, strength_b);
        let balance = (100.0 - difference * (100.0 / self.zero_balance_gap)).max(0.0);
        round_to(balance, 2)
    }
}

/// Per-matchup balance band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceLabel {
    MirrorMatch,
    VeryBalanced,
    Balanced,
    Unbalanced,
    VeryUnbalanced,
}

impl BalanceLabel {
    pub fn from_balance(balance: f64) -> Self {
        if balance >= 95.0 {
            BalanceLabel::MirrorMatch
        } else if balance >= 85.0 {
            BalanceLabel::VeryBalanced
        } else if balance >= 75.0 {
            BalanceLabel::Balanced
        } else if balance >= 65.0 {
            BalanceLabel::Unbalanced
        } else {
            BalanceLabel::VeryUnbalanced
        }
    }
}

impl std::fmt::Display for BalanceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            BalanceLabel::MirrorMatch => "Mirror Match (Teams are identical strength)",
            BalanceLabel::VeryBalanced => "Very Balanced (Could go either way)",
            BalanceLabel::Balanced => "Balanced (Slight edge to favorite)",
            BalanceLabel::Unbalanced => "Unbalanced (Favorite has advantage)",
            BalanceLabel::VeryUnbalanced => "Very Unbalanced (Strong favorite expected)",
        };
        f.write_str(text)
    }
}

/// Band of an aggregate balance over a whole set of matchups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FairnessRating {
    Perfect,
    Excellent,
    Good,
    Fair,
    Poor,
}

impl FairnessRating {
    pub fn from_average(average_balance: f64) -> Self {
        if average_balance >= 90.0 {
            FairnessRating::Perfect
        } else if average_balance >= 80.0 {
            FairnessRating::Excellent
        } else if average_balance >= 70.0 {
            FairnessRating::Good
        } else if average_balance >= 60.0 {
            FairnessRating::Fair
        } else {
            FairnessRating::Poor
        }
    }
}

impl std::fmt::Display for FairnessRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FairnessRating::Perfect => "Perfect ⭐⭐⭐⭐⭐ (Excellent matchups!)",
            FairnessRating::Excellent => "Excellent ⭐⭐⭐⭐ (Very balanced)",
            FairnessRating::Good => "Good ⭐⭐⭐ (Well balanced)",
            FairnessRating::Fair => "Fair ⭐⭐ (Somewhat balanced)",
            FairnessRating::Poor => "Poor ⭐ (Some lopsided matches)",
        };
        f.write_str(text)
    }
}

/// Coarse kind of match shown next to a pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Competitive,
    Balanced,
    Lopsided,
}

impl MatchType {
    pub fn from_balance(balance: f64) -> Self {
        if balance >= 85.0 {
            MatchType::Competitive
        } else if balance >= 70.0 {
            MatchType::Balanced
        } else {
            MatchType::Lopsided
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MatchType::Competitive => "Competitive Match (High Interest)",
            MatchType::Balanced => "Balanced Match",
            MatchType::Lopsided => "Lopsided Match (Possible Upset)",
        };
        f.write_str(text)
    }
}

/// Quality summary of a single matchup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupQuality {
    pub balance: f64,
    pub balance_label: BalanceLabel,
    pub prediction_confidence: f64,
    pub is_close_match: bool,
    pub is_upset_likely: bool,
}

impl MatchupQuality {
    pub fn new(balance: f64, prediction_confidence: f64) -> Self {
        Self {
            balance,
            balance_label: BalanceLabel::from_balance(balance),
            prediction_confidence,
            is_close_match: balance >= CLOSE_MATCH_BALANCE,
            is_upset_likely: balance < UPSET_LIKELY_BALANCE,
        }
    }
}
