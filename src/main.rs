use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, GameEngine, Topology};
use grid_snake::modes::{HeadlessMode, HumanMode, Unpaced};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid, in your terminal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Edge behaviour
    #[arg(long)]
    topology: Option<TopologyArg>,

    /// Seed for apple placement (and steering in headless mode)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate in headless mode
    #[arg(long, default_value = "10000")]
    ticks: u64,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Simulate random play without a terminal and print a summary
    Headless,
}

#[derive(Clone, Copy, ValueEnum)]
enum TopologyArg {
    /// Leaving one edge re-enters at the opposite edge
    Wrap,
    /// Leaving the board resets the snake
    Wall,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Wrap => Topology::Wrap,
            TopologyArg::Wall => Topology::Wall,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.screen_width = width;
        }
        if let Some(height) = self.height {
            config.screen_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_hz = tick_rate;
        }
        if let Some(topology) = self.topology {
            config.topology = topology.into();
        }

        config.validate()?;
        Ok(config)
    }
}

/// The TUI owns the terminal, so in human mode logs only go to a file.
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if cli.mode == Mode::Headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;
    tracing::info!(
        grid_width = config.grid_width(),
        grid_height = config.grid_height(),
        topology = ?config.topology,
        "configuration loaded"
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    };

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(engine)?;
            human_mode.run().await?;
        }
        Mode::Headless => {
            let steering_seed = cli.seed.unwrap_or_else(rand::random);
            let mut headless_mode = HeadlessMode::new(engine, steering_seed)?;
            let report = headless_mode.run(cli.ticks, &mut Unpaced).await?;
            println!("{}", report.format_summary());
        }
    }

    Ok(())
}
