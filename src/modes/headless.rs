//! Headless mode: play without a terminal
//!
//! Steering is random but seeded, so a run with the same seeds and
//! configuration always produces the same report. Handy for soak-testing the
//! game rules and for profiling.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::clock::Clock;
use crate::game::{Direction, GameEngine, GameState};
use crate::metrics::GameMetrics;

/// Chance per tick that the simulated player asks for a turn
const TURN_CHANCE: f64 = 0.2;

/// Summary of a headless run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessReport {
    pub ticks: u64,
    pub apples_eaten: u32,
    pub resets: u32,
    pub high_score: u32,
    pub longest_snake: usize,
}

impl HeadlessReport {
    pub fn format_summary(&self) -> String {
        format!(
            "Ticks: {}\nApples eaten: {}\nResets: {}\nHigh score: {}\nLongest snake: {}",
            self.ticks, self.apples_eaten, self.resets, self.high_score, self.longest_snake
        )
    }
}

pub struct HeadlessMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    steering: StdRng,
}

impl HeadlessMode {
    pub fn new(mut engine: GameEngine, steering_seed: u64) -> Result<Self> {
        let state = engine.new_game().context("Failed to start a game")?;
        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            steering: StdRng::seed_from_u64(steering_seed),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Play `ticks` ticks, waiting on `clock` before each one
    pub async fn run<C: Clock>(&mut self, ticks: u64, clock: &mut C) -> Result<HeadlessReport> {
        info!(ticks, "headless run started");

        for _ in 0..ticks {
            clock.tick().await;

            if self.steering.gen_bool(TURN_CHANCE) {
                let direction = Direction::ALL[self.steering.gen_range(0..Direction::ALL.len())];
                self.engine.request(&mut self.state, direction);
            }

            let result = self
                .engine
                .step(&mut self.state)
                .with_context(|| format!("Failed at tick {}", self.state.ticks))?;
            self.metrics.record_step(&result, &self.state);

            if let Some(collision) = result.info.collision_type {
                debug!(?collision, tick = self.state.ticks, "run ended");
            }
        }

        let report = HeadlessReport {
            ticks: self.state.ticks,
            apples_eaten: self.metrics.apples_eaten,
            resets: self.state.resets,
            high_score: self.metrics.high_score.max(self.state.score),
            longest_snake: self.metrics.longest_snake,
        };
        info!(?report, "headless run finished");
        Ok(report)
    }
}
