//! Main application configuration
//!
//! This module defines the top-level configuration for the team-ladder
//! engine and tool, including environment variable loading, TOML file
//! loading, and validation.

use crate::config::matchmaking::MatchmakingConfig;
use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub matchmaking: MatchmakingConfig,
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "team-ladder".to_string(),
            log_level: "info".to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("Invalid {} value: {}", name, raw)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still win
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Some(k) = parse_var("ELO_K_FACTOR")? {
            self.rating.k_factor = k;
        }
        if let Some(initial) = parse_var("INITIAL_RATING")? {
            self.rating.initial_rating = initial;
        }
        if let Some(max) = parse_var("MAX_RATING")? {
            self.rating.max_rating = max;
        }

        // Matchmaking settings
        if let Some(weight) = parse_var("STRENGTH_ELO_WEIGHT")? {
            self.matchmaking.weights.elo = weight;
        }
        if let Some(weight) = parse_var("STRENGTH_WIN_RATE_WEIGHT")? {
            self.matchmaking.weights.win_rate = weight;
        }
        if let Some(weight) = parse_var("STRENGTH_EXPERIENCE_WEIGHT")? {
            self.matchmaking.weights.experience = weight;
        }
        if let Some(ceiling) = parse_var("RATING_CEILING")? {
            self.matchmaking.rating_ceiling = ceiling;
        }
        if let Some(games) = parse_var("EXPERIENCED_GAMES")? {
            self.matchmaking.experienced_games = games;
        }
        if let Some(gap) = parse_var("ZERO_BALANCE_GAP")? {
            self.matchmaking.zero_balance_gap = gap;
        }
        if let Some(scale) = parse_var("PREDICTION_SCALE")? {
            self.matchmaking.prediction_scale = scale;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()?;
    config.matchmaking.validate()?;

    Ok(())
}
