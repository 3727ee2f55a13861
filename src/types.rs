//! Common types used throughout the rating and matchmaking engine

use crate::error::{LadderError, Result};
use serde::{Deserialize, Serialize};

/// Unique identifier for teams
pub type TeamId = String;

/// Rating assigned to a team entering competition
pub const BASE_RATING: f64 = 1200.0;

/// Competitive state of a team: rating plus its win/loss record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingState {
    pub rating: f64,
    pub wins: u32,
    pub losses: u32,
}

impl Default for RatingState {
    fn default() -> Self {
        Self {
            rating: BASE_RATING,
            wins: 0,
            losses: 0,
        }
    }
}

impl RatingState {
    pub fn new(rating: f64, wins: u32, losses: u32) -> Self {
        Self {
            rating,
            wins,
            losses,
        }
    }

    /// Number of completed matches
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Fraction of matches won, 0 when no matches were played
    pub fn win_rate(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            return 0.0;
        }
        self.wins as f64 / total as f64
    }
}

/// A team taking part in matchmaking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub stats: RatingState,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>, stats: RatingState) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats,
        }
    }
}

/// Side of a two-team match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Decided result of a match; there is no draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    TeamA,
    TeamB,
}

impl Outcome {
    pub fn winner(&self) -> Side {
        match self {
            Outcome::TeamA => Side::A,
            Outcome::TeamB => Side::B,
        }
    }
}

/// Input of a single rating update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub rating_a: f64,
    pub rating_b: f64,
    pub outcome: Outcome,
}

/// Lifecycle status of a scheduled match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// A match as tracked by the tournament workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub status: MatchStatus,
    pub winner: Option<TeamId>,
    pub round: u32,
}

impl MatchRecord {
    /// A pending match between two teams
    pub fn scheduled(team_a: impl Into<TeamId>, team_b: impl Into<TeamId>, round: u32) -> Self {
        Self {
            team_a: team_a.into(),
            team_b: team_b.into(),
            status: MatchStatus::Pending,
            winner: None,
            round,
        }
    }

    /// Mark the match completed with the given winner
    pub fn complete(mut self, winner: impl Into<TeamId>) -> Self {
        self.status = MatchStatus::Completed;
        self.winner = Some(winner.into());
        self
    }

    pub fn label(&self) -> String {
        format!("{} vs {} (round {})", self.team_a, self.team_b, self.round)
    }

    /// Resolve the decided outcome of this match
    ///
    /// Only completed matches between two distinct teams, with a winner
    /// taken from the two participants, can feed a rating update.
    pub fn outcome(&self) -> Result<Outcome> {
        if self.team_a == self.team_b {
            return Err(LadderError::SelfMatch {
                team_id: self.team_a.clone(),
            }
            .into());
        }

        let winner = match (&self.status, &self.winner) {
            (MatchStatus::Completed, Some(winner)) => winner,
            _ => {
                return Err(LadderError::MatchNotDecided {
                    match_label: self.label(),
                }
                .into())
            }
        };

        if *winner == self.team_a {
            Ok(Outcome::TeamA)
        } else if *winner == self.team_b {
            Ok(Outcome::TeamB)
        } else {
            Err(LadderError::TeamNotInMatch {
                winner: winner.clone(),
                match_label: self.label(),
            }
            .into())
        }
    }
}

/// Derived matchmaking strength of a team, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStrength {
    pub team_id: TeamId,
    pub strength_score: f64,
}

/// Pre-match win probabilities for a pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub probability_a: f64,
    pub probability_b: f64,
    /// Probability of A winning as a percentage, rounded to 1 decimal
    pub percent_a: f64,
    pub percent_b: f64,
    pub favorite: Side,
    pub favorite_label: String,
    /// Percentage of the favorite, always within [50, 100]
    pub confidence: f64,
}

impl Prediction {
    /// Win percentage of the favorite
    pub fn favorite_percent(&self) -> f64 {
        match self.favorite {
            Side::A => self.percent_a,
            Side::B => self.percent_b,
        }
    }
}

/// Suggested pairing produced by the matchup generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub team_a: Team,
    pub team_b: Team,
    pub strength_a: f64,
    pub strength_b: f64,
    pub balance: f64,
    pub prediction: Prediction,
}

impl Matchup {
    /// Turn the suggestion into a pending match for the given round
    pub fn schedule(&self, round: u32) -> MatchRecord {
        MatchRecord::scheduled(self.team_a.id.clone(), self.team_b.id.clone(), round)
    }
}

/// Rating change applied to both teams of a completed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRatingUpdate {
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub outcome: Outcome,
    pub old_a: RatingState,
    pub new_a: RatingState,
    pub old_b: RatingState,
    pub new_b: RatingState,
}

impl MatchRatingUpdate {
    pub fn delta_a(&self) -> f64 {
        self.new_a.rating - self.old_a.rating
    }

    pub fn delta_b(&self) -> f64 {
        self.new_b.rating - self.old_b.rating
    }
}
