use std::time::{Duration, Instant};

use crate::game::{GameState, StepResult};

/// Session statistics shown next to the board
///
/// A "run" lasts from one reset of the snake to the next.
#[derive(Debug, Clone)]
pub struct GameMetrics {
    pub run_started: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub runs_ended: u32,
    pub apples_eaten: u32,
    pub longest_snake: usize,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            runs_ended: 0,
            apples_eaten: 0,
            longest_snake: 1,
        }
    }

    /// Refresh the run clock
    pub fn update(&mut self) {
        self.elapsed_time = self.run_started.elapsed();
    }

    /// Fold one tick's outcome into the totals
    pub fn record_step(&mut self, result: &StepResult, state: &GameState) {
        if result.info.ate_apple {
            self.apples_eaten += 1;
        }
        self.longest_snake = self.longest_snake.max(state.snake.len());
        if let Some(score) = result.ended_run {
            self.end_run(score);
        }
    }

    /// Close the current run and start timing the next one
    pub fn end_run(&mut self, final_score: u32) {
        self.runs_ended += 1;
        self.high_score = self.high_score.max(final_score);
        self.run_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
