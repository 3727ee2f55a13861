//! Swiss-style matchup generation
//!
//! Teams are ranked by strength and paired with their neighbour in the
//! ranking (1st vs 2nd, 3rd vs 4th, ...), so each pairing is between teams
//! of similar strength.

use crate::config::matchmaking::MatchmakingConfig;
use crate::error::Result;
use crate::matchmaking::balance::{FairnessRating, MatchBalanceScorer, MatchupQuality};
use crate::matchmaking::prediction::WinPredictor;
use crate::matchmaking::strength::TeamStrengthScorer;
use crate::types::{Matchup, Team};
use crate::utils::round_to;
use tracing::debug;

/// Builds balanced pairings from a roster
#[derive(Debug, Clone, Default)]
pub struct MatchupGenerator {
    strength: TeamStrengthScorer,
    balance: MatchBalanceScorer,
    predictor: WinPredictor,
}

impl MatchupGenerator {
    /// Create a generator, rejecting invalid scorer parameters
    pub fn new(config: MatchmakingConfig) -> Result<Self> {
        Ok(Self {
            balance: MatchBalanceScorer::new(&config)?,
            predictor: WinPredictor::new(&config)?,
            strength: TeamStrengthScorer::new(config)?,
        })
    }

    pub fn strength_scorer(&self) -> &TeamStrengthScorer {
        &self.strength
    }

    pub fn balance_scorer(&self) -> &MatchBalanceScorer {
        &self.balance
    }

    pub fn predictor(&self) -> &WinPredictor {
        &self.predictor
    }

    /// Pair the roster by strength
    ///
    /// Equal strengths keep their roster order. With an odd roster the
    /// weakest team is left without a matchup.
    pub fn generate(&self, teams: &[Team]) -> Vec<Matchup> {
        if teams.len() < 2 {
            return Vec::new();
        }

        let mut ranked: Vec<(&Team, f64)> = teams
            .iter()
            .map(|team| (team, self.strength.strength(&team.stats)))
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        if ranked.len() % 2 == 1 {
            if let Some((unpaired, strength)) = ranked.last() {
                debug!(
                    "Team {} (strength {:.2}) left without an opponent",
                    unpaired.id, strength
                );
            }
        }

        ranked
            .chunks_exact(2)
            .map(|pair| {
                let (team_a, strength_a) = pair[0];
                let (team_b, strength_b) = pair[1];

                let balance = self.balance.balance(strength_a, strength_b);
                let prediction =
                    self.predictor
                        .predict(strength_a, strength_b, &team_a.name, &team_b.name);

                debug!(
                    "Paired {} ({:.2}) with {} ({:.2}): balance {:.2}",
                    team_a.id, strength_a, team_b.id, strength_b, balance
                );

                Matchup {
                    team_a: team_a.clone(),
                    team_b: team_b.clone(),
                    strength_a,
                    strength_b,
                    balance,
                    prediction,
                }
            })
            .collect()
    }
}

/// Mean balance of the matchups rounded to 2 decimals, 0 when there are none
pub fn average_balance(matchups: &[Matchup]) -> f64 {
    if matchups.is_empty() {
        return 0.0;
    }

    let total: f64 = matchups.iter().map(|m| m.balance).sum();
    round_to(total / matchups.len() as f64, 2)
}

pub fn fairness_rating(average_balance: f64) -> FairnessRating {
    FairnessRating::from_average(average_balance)
}

/// Matchups ordered most balanced first
pub fn rank_by_balance(mut matchups: Vec<Matchup>) -> Vec<Matchup> {
    matchups.sort_by(|a, b| b.balance.total_cmp(&a.balance));
    matchups
}

pub fn matchup_quality(matchup: &Matchup) -> MatchupQuality {
    MatchupQuality::new(matchup.balance, matchup.prediction.confidence)
}
