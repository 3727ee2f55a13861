//! Team Ladder - rating and matchmaking engine for team tournaments
//!
//! This crate provides ELO rating updates for completed matches and a
//! Swiss-style matchmaker that pairs teams by a composite strength score,
//! with balance and win prediction for every pairing.

pub mod config;
pub mod error;
pub mod matchmaking;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use matchmaking::MatchupGenerator;
pub use rating::{EloCalculator, InMemoryRatingStorage, RatingStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
