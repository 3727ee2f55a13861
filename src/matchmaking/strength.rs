//! Team strength scoring
//!
//! Strength is a 0-100 composite used only for matchmaking. It blends the
//! normalized rating, the win rate and an experience term as a weighted sum.

use crate::config::matchmaking::MatchmakingConfig;
use crate::error::Result;
use crate::types::{RatingState, Team, TeamStrength};
use crate::utils::round_to;
use serde::{Deserialize, Serialize};

/// Display bracket for a strength score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrengthTier {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Legendary,
}

impl StrengthTier {
    pub fn from_strength(strength: f64) -> Self {
        if strength >= 90.0 {
            StrengthTier::Legendary
        } else if strength >= 80.0 {
            StrengthTier::Expert
        } else if strength >= 70.0 {
            StrengthTier::Advanced
        } else if strength >= 60.0 {
            StrengthTier::Intermediate
        } else {
            StrengthTier::Beginner
        }
    }
}

impl std::fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrengthTier::Legendary => write!(f, "Legendary"),
            StrengthTier::Expert => write!(f, "Expert"),
            StrengthTier::Advanced => write!(f, "Advanced"),
            StrengthTier::Intermediate => write!(f, "Intermediate"),
            StrengthTier::Beginner => write!(f, "Beginner"),
        }
    }
}

/// Computes team strength scores
#[derive(Debug, Clone, Default)]
pub struct TeamStrengthScorer {
    config: MatchmakingConfig,
}

impl TeamStrengthScorer {
    /// Create a scorer, rejecting weights or normalizers that would push
    /// strength outside [0, 100]
    pub fn new(config: MatchmakingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Strength of a rating state, rounded to 2 decimals
    pub fn strength(&self, state: &RatingState) -> f64 {
        let weights = &self.config.weights;

        let elo_score = (state.rating / self.config.rating_ceiling).min(1.0);
        let win_rate_score = state.win_rate();
        let experience_score = (state.total_games() as f64 / self.config.experienced_games).min(1.0);

        let strength = (elo_score * weights.elo
            + win_rate_score * weights.win_rate
            + experience_score * weights.experience)
            * 100.0;

        round_to(strength, 2)
    }

    pub fn team_strength(&self, team: &Team) -> TeamStrength {
        TeamStrength {
            team_id: team.id.clone(),
            strength_score: self.strength(&team.stats),
        }
    }

    /// Strengths of a roster, strongest first; ties keep roster order
    pub fn rank(&self, teams: &[Team]) -> Vec<TeamStrength> {
        let mut strengths: Vec<TeamStrength> =
            teams.iter().map(|team| self.team_strength(team)).collect();
        strengths.sort_by(|a, b| b.strength_score.total_cmp(&a.strength_score));
        strengths
    }
}
