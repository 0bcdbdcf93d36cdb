use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use signal_snake::game::GameConfig;
use signal_snake::logging::init_file_logger;
use signal_snake::modes::HumanMode;
use simplelog::LevelFilter;

#[derive(Parser)]
#[command(name = "signal_snake")]
#[command(version, about = "Snake on a grid, in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between game ticks
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Points per item eaten
    #[arg(long)]
    points: Option<u32>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Seed for item placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "signal_snake.log")]
    log_file: PathBuf,

    /// Log per-tick detail
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(points) = self.points {
            config.points_per_item = points;
        }
        if self.mute {
            config.sound = false;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_file_logger(&cli.log_file, level)?;

    let config = cli.resolve_config()?;
    info!("config: {:?}", config);

    let mut human_mode = HumanMode::new(config, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}
