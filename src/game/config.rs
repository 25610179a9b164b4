use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::board::Board;
use super::error::GameError;

/// Largest number of cells allowed along either axis of the grid
pub const MAX_GRID_SIDE: u32 = 1_000;

/// What happens when the head leaves the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Edges are periodic; the head re-enters on the opposite side
    #[default]
    Wrap,
    /// Edges are solid; leaving the board resets the snake
    Wall,
}

/// Configuration for the game
///
/// Geometry is given in pixels, the way the board is laid out on screen; the
/// grid dimensions are derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playing surface in pixels
    pub screen_width: u32,
    /// Height of the playing surface in pixels
    pub screen_height: u32,
    /// Side of one grid cell in pixels
    pub cell_size: u32,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// Edge behaviour
    pub topology: Topology,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            cell_size: 20,
            tick_rate_hz: 20,
            topology: Topology::Wrap,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom surface size in pixels
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Default::default()
        }
    }

    /// A 10x10 grid for testing
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Load a JSON configuration file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn grid_width(&self) -> u32 {
        self.screen_width / self.cell_size.max(1)
    }

    pub fn grid_height(&self) -> u32 {
        self.screen_height / self.cell_size.max(1)
    }

    /// Time between two ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }

    pub fn board(&self) -> Board {
        Board::new(self.grid_width(), self.grid_height(), self.cell_size)
    }

    /// Reject geometry the grid arithmetic cannot represent
    pub fn validate(&self) -> Result<(), GameError> {
        if self.cell_size == 0 {
            return Err(GameError::InvalidConfig("cell_size must be positive".into()));
        }
        if self.tick_rate_hz == 0 {
            return Err(GameError::InvalidConfig(
                "tick_rate_hz must be positive".into(),
            ));
        }
        for (name, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
        ] {
            if value == 0 || value % self.cell_size != 0 {
                return Err(GameError::InvalidConfig(format!(
                    "{name} ({value}) must be a positive multiple of cell_size ({})",
                    self.cell_size
                )));
            }
        }
        for (name, cells) in [
            ("grid width", self.grid_width()),
            ("grid height", self.grid_height()),
        ] {
            if cells > MAX_GRID_SIDE {
                return Err(GameError::InvalidConfig(format!(
                    "{name} ({cells} cells) exceeds the maximum of {MAX_GRID_SIDE}"
                )));
            }
        }
        Ok(())
    }
}
