//! Rating system integration using the ELO algorithm
//!
//! This module provides the rating update, storage interfaces, and
//! integration with the skillratings crate for two-team matches.

pub mod elo;
pub mod storage;

// Re-export commonly used types
pub use elo::{EloCalculator, RatingTier};
pub use storage::{InMemoryRatingStorage, RatingEntry, RatingStorage};
