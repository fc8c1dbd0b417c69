//! `reelfeedctl`: developer CLI for the reelfeed engine.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use reelfeed_model::CarouselDirection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod fixtures;

#[derive(Parser)]
#[command(name = "reelfeedctl", about = "Drive the reelfeed engine over JSON fixtures")]
struct Cli {
    /// Configuration file (TOML or JSON). Without it the REELFEED_* environment
    /// and default file locations are consulted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Environment file loaded before configuration, when present
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank a video pool into feed order
    Rank {
        #[command(flatten)]
        input: FeedInput,
        /// Include scores and seen flags
        #[arg(long)]
        scores: bool,
    },
    /// Rank a pool and allocate it over the configured layout
    Plan {
        #[command(flatten)]
        input: FeedInput,
    },
    /// Prefetch the leading chunk of the first ranked videos over HTTP
    Warm {
        #[command(flatten)]
        input: FeedInput,
    },
    /// Run a carousel over a pool for a number of autoplay frames
    Carousel {
        /// JSON array of video records
        #[arg(long)]
        pool: PathBuf,
        #[arg(long, default_value_t = 600)]
        frames: usize,
        #[arg(long, value_enum, default_value = "forward")]
        direction: DirectionArg,
        /// Viewport width; defaults to three items
        #[arg(long)]
        viewport: Option<f32>,
    },
    /// Print the effective configuration as TOML
    ShowConfig,
}

#[derive(Args)]
struct FeedInput {
    /// JSON array of video records
    #[arg(long)]
    pool: PathBuf,
    /// JSON interaction state
    #[arg(long)]
    interactions: Option<PathBuf>,
    /// Comma-separated interest categories, strongest first
    #[arg(long, value_delimiter = ',')]
    interests: Vec<String>,
    /// Shuffle the unseen partition (also enabled by shuffle_on_start)
    #[arg(long)]
    shuffle: bool,
    /// Seed for every random choice
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Forward,
    Backward,
}

impl From<DirectionArg> for CarouselDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Forward => CarouselDirection::Forward,
            DirectionArg::Backward => CarouselDirection::Backward,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.env_file.exists() {
        dotenvy::from_path(&cli.env_file).with_context(|| {
            format!("failed to load env file {}", cli.env_file.display())
        })?;
    }

    let load = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Rank { input, scores } => commands::rank(&load.config, &input, scores),
        Command::Plan { input } => commands::plan(&load.config, &input),
        Command::Warm { input } => commands::warm(&load.config, &input).await,
        Command::Carousel {
            pool,
            frames,
            direction,
            viewport,
        } => commands::carousel(&load.config, &pool, frames, direction.into(), viewport),
        Command::ShowConfig => commands::show_config(&load),
    }
}
