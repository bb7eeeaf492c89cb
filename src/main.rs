use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wonsz::game::GameConfig;
use wonsz::modes::ArcadeMode;

#[derive(Parser)]
#[command(name = "wonsz")]
#[command(version, about = "Arcade snake with a persistent leaderboard")]
struct Cli {
    /// Path of the persistent high-score region
    #[arg(long, default_value = "wonsz_scores.bin")]
    scores: PathBuf,

    /// JSON game configuration overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append tracing output to this file (the terminal itself is the
    /// display, so there is no console logging)
    #[arg(long)]
    log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        init_tracing(path)?;
    }

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };

    let mut arcade = ArcadeMode::new(config, &cli.scores)?;
    arcade.run().await
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))
}
