//! Command-line entry point for the team-ladder engine
//!
//! Exposes rating updates, matchmaking and match recording over JSON roster
//! files so tournament organizers can run them without the web application.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use team_ladder::config::AppConfig;
use team_ladder::matchmaking::{
    average_balance, fairness_rating, matchup_quality, MatchType, MatchupGenerator, StrengthTier,
};
use team_ladder::rating::{EloCalculator, InMemoryRatingStorage, RatingStorage, RatingTier};
use team_ladder::types::{MatchRecord, Outcome, Team};
use tracing::{debug, info};

/// Team Ladder - ELO ratings and Swiss-style matchmaking for team tournaments
#[derive(Parser)]
#[command(
    name = "team-ladder",
    version,
    about = "ELO ratings and Swiss-style matchmaking for team tournaments"
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the rating update for a single decided match
    Elo {
        #[arg(long)]
        rating_a: f64,
        #[arg(long)]
        rating_b: f64,
        #[arg(long, value_enum)]
        winner: Winner,
    },
    /// Suggest pairings for a roster
    Matchmake {
        /// JSON array of teams
        #[arg(long, value_name = "FILE")]
        roster: PathBuf,
        /// Print matchups as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Record a completed match and write back the updated roster
    Record {
        #[arg(long, value_name = "FILE")]
        roster: PathBuf,
        #[arg(long)]
        team_a: String,
        #[arg(long)]
        team_b: String,
        #[arg(long)]
        winner: String,
        #[arg(long, default_value_t = 1)]
        round: u32,
        /// Output file, defaults to overwriting the roster
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Winner {
    A,
    B,
}

impl From<Winner> for Outcome {
    fn from(winner: Winner) -> Self {
        match winner {
            Winner::A => Outcome::TeamA,
            Winner::B => Outcome::TeamB,
        }
    }
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment and apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // from_file and from_env validate; only the override needs a recheck
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
        team_ladder::config::validate_config(&config)?;
    }

    Ok(config)
}

fn read_roster(path: &Path) -> Result<Vec<Team>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;
    let teams: Vec<Team> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse roster {}", path.display()))?;
    debug!("Loaded {} teams from {}", teams.len(), path.display());
    Ok(teams)
}

fn write_roster(path: &Path, teams: &[Team]) -> Result<()> {
    let json = serde_json::to_string_pretty(teams)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write roster {}", path.display()))?;
    Ok(())
}

fn run_elo(calculator: &EloCalculator, rating_a: f64, rating_b: f64, winner: Winner) -> Result<()> {
    calculator.check_rating(rating_a)?;
    calculator.check_rating(rating_b)?;

    let (new_a, new_b) = calculator.update_ratings(rating_a, rating_b, winner.into());

    println!(
        "Pre-match win chance for A: {}%",
        calculator.expected_win_percentage(rating_a, rating_b)
    );
    println!(
        "Team A: {:.2} -> {:.2} ({:+.2}, {})",
        rating_a,
        new_a,
        new_a - rating_a,
        RatingTier::from_rating(new_a)
    );
    println!(
        "Team B: {:.2} -> {:.2} ({:+.2}, {})",
        rating_b,
        new_b,
        new_b - rating_b,
        RatingTier::from_rating(new_b)
    );
    Ok(())
}

fn run_matchmake(generator: &MatchupGenerator, roster: &Path, json: bool) -> Result<()> {
    let teams = read_roster(roster)?;
    let matchups = generator.generate(&teams);
    let average = average_balance(&matchups);
    let fairness = fairness_rating(average);

    info!(
        "Generated {} matchups from {} teams",
        matchups.len(),
        teams.len()
    );

    if json {
        let output = serde_json::json!({
            "matchups": matchups,
            "average_balance": average,
            "fairness_rating": fairness.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Team strengths:");
    for strength in generator.strength_scorer().rank(&teams) {
        println!(
            "  {:<24} {:>6.2}  {}",
            strength.team_id,
            strength.strength_score,
            StrengthTier::from_strength(strength.strength_score)
        );
    }

    println!();
    println!("Tournament fairness: {}", fairness);
    println!("Average balance score: {}%", average);

    for (i, matchup) in matchups.iter().enumerate() {
        let quality = matchup_quality(matchup);
        println!();
        println!("Match {} - balance {}%", i + 1, matchup.balance);
        println!(
            "  {} ({:.2}) vs {} ({:.2})",
            matchup.team_a.name, matchup.strength_a, matchup.team_b.name, matchup.strength_b
        );
        println!(
            "  Prediction: {} has {}% chance to win",
            matchup.prediction.favorite_label,
            matchup.prediction.favorite_percent()
        );
        println!("  Confidence: {}%", matchup.prediction.confidence);
        println!("  {}", quality.balance_label);
        println!("  Match type: {}", MatchType::from_balance(matchup.balance));
    }

    Ok(())
}

fn run_record(
    calculator: &EloCalculator,
    roster: &Path,
    record: MatchRecord,
    output: Option<&Path>,
) -> Result<()> {
    let teams = read_roster(roster)?;
    let storage = InMemoryRatingStorage::with_teams(teams.iter().cloned());

    let update = storage.record_match(&record, calculator)?;
    println!(
        "{}: {:.2} -> {:.2} ({:+.2})",
        update.team_a,
        update.old_a.rating,
        update.new_a.rating,
        update.delta_a()
    );
    println!(
        "{}: {:.2} -> {:.2} ({:+.2})",
        update.team_b,
        update.old_b.rating,
        update.new_b.rating,
        update.delta_b()
    );

    // Keep the roster's original order in the written file
    let ratings = storage.get_all_ratings()?;
    let updated: Vec<Team> = teams
        .iter()
        .map(|team| {
            ratings
                .get(&team.id)
                .map(|entry| entry.to_team())
                .unwrap_or_else(|| team.clone())
        })
        .collect();

    write_roster(output.unwrap_or(roster), &updated)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let calculator = EloCalculator::new(config.rating.clone())?;
    let generator = MatchupGenerator::new(config.matchmaking.clone())?;

    match args.command {
        Command::Elo {
            rating_a,
            rating_b,
            winner,
        } => run_elo(&calculator, rating_a, rating_b, winner),
        Command::Matchmake { roster, json } => run_matchmake(&generator, &roster, json),
        Command::Record {
            roster,
            team_a,
            team_b,
            winner,
            round,
            output,
        } => {
            let record = MatchRecord::scheduled(team_a, team_b, round).complete(winner);
            run_record(&calculator, &roster, record, output.as_deref())
        }
    }
}
