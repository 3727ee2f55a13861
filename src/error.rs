//! Error types for the rating and matchmaking engine
//!
//! Scoring functions are total and never fail; errors only arise at the
//! edges (match records, storage, configuration). They are surfaced through
//! anyhow like the rest of the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Match must be completed with a winner before updating ratings: {match_label}")]
    MatchNotDecided { match_label: String },

    #[error("Winner {winner} did not play in match {match_label}")]
    TeamNotInMatch { winner: String, match_label: String },

    #[error("Team {team_id} cannot play against itself")]
    SelfMatch { team_id: String },

    #[error("Team not found: {team_id}")]
    TeamNotFound { team_id: String },

    #[error("Invalid rating {rating}: {reason}")]
    InvalidRating { rating: f64, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
