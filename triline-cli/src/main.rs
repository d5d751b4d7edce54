//! TRILINE CLI - Command-line interface
//!
//! Commands:
//! - play: Human vs AI on the console
//! - match: Automated games between AI and random players
//! - values: Print the opening value of every cell

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use triline_core::GameConfig;

mod human;
mod match_cmd;
mod play_cmd;
mod values_cmd;

#[derive(Parser)]
#[command(name = "triline")]
#[command(about = "k-in-a-row on a triangular board")]
struct Cli {
    /// JSON game configuration; flags override its values
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Random seed for reproducible AI and random players
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the AI on the console
    Play(play_cmd::PlayArgs),
    /// Play automated games and report statistics
    Match(match_cmd::MatchArgs),
    /// Print the opening value of every cell
    Values(GameArgs),
}

/// Board and timing parameters shared by all commands
#[derive(Args, Clone, Debug, Default)]
pub struct GameArgs {
    /// Board size (length of the top row)
    #[arg(long)]
    pub size: Option<usize>,

    /// Marks in a line needed to win
    #[arg(long)]
    pub k: Option<usize>,

    /// AI time limit per move in seconds
    #[arg(long)]
    pub time: Option<f64>,
}

impl GameArgs {
    /// Merge flags over the base configuration
    pub fn resolve(&self, base: GameConfig, seed: Option<u64>) -> Result<GameConfig> {
        let config = GameConfig {
            size: self.size.unwrap_or(base.size),
            k: self.k.unwrap_or(base.k),
            time_limit_secs: self.time.unwrap_or(base.time_limit_secs),
            seed: seed.or(base.seed),
        };
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base = load_base_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Play(args) => {
            let config = args.game.resolve(base, cli.seed)?;
            play_cmd::run(args, config)
        }
        Commands::Match(args) => {
            let config = args.game.resolve(base, cli.seed)?;
            match_cmd::run(args, config)
        }
        Commands::Values(args) => {
            let config = args.resolve(base, cli.seed)?;
            values_cmd::run(&config)
        }
    }
}

fn load_base_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let config = GameConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(GameConfig::default()),
    }
}
