//! Configuration management for the team-ladder engine
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and the default constants of the scorers.

pub mod app;
pub mod matchmaking;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use matchmaking::{MatchmakingConfig, StrengthWeights};
pub use rating::RatingConfig;
