//! Team matchmaking: strength scoring, balance, win prediction and pairing
//!
//! All scorers are pure value types; they can be shared freely across
//! threads and invoked concurrently.

pub mod balance;
pub mod generator;
pub mod prediction;
pub mod strength;

// Re-export commonly used types
pub use balance::{BalanceLabel, FairnessRating, MatchBalanceScorer, MatchType, MatchupQuality};
pub use generator::{
    average_balance, fairness_rating, matchup_quality, rank_by_balance, MatchupGenerator,
};
pub use prediction::WinPredictor;
pub use strength::{StrengthTier, TeamStrengthScorer};
