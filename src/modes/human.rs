use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tracing::{debug, info};

use super::clock::{Clock, IntervalClock};
use crate::game::{GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Canvas, CellGrid, Paint, Renderer, draw_scene};

/// Keyboard-driven play in the terminal
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    canvas: CellGrid,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(mut engine: GameEngine) -> Result<Self> {
        let state = engine.new_game().context("Failed to start a game")?;
        let mut canvas = CellGrid::new(engine.board());
        draw_scene(&mut canvas, &state.view());

        Ok(Self {
            engine,
            state,
            canvas,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let mut clock = IntervalClock::new(self.engine.config().tick_interval());
        info!(
            tick_interval = ?self.engine.config().tick_interval(),
            topology = ?self.engine.config().topology,
            "game started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal, &mut clock).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;
        info!(
            high_score = self.metrics.high_score.max(self.state.score),
            runs = self.metrics.runs_ended,
            "game finished"
        );

        result
    }

    /// Input is queued as it arrives; each clock tick advances the game and
    /// then redraws, so a tick always sees the input gathered before it.
    async fn run_game_loop<C: Clock>(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        clock: &mut C,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = clock.tick() => {
                    self.update_game()?;
                    self.draw(terminal)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };

        match self.input_handler.handle_key_event(key) {
            KeyAction::Move(direction) => self.engine.request(&mut self.state, direction),
            KeyAction::Restart => self.restart_game()?,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let result = self
            .engine
            .step(&mut self.state)
            .context("Failed to advance the game")?;
        self.metrics.record_step(&result, &self.state);
        self.metrics.update();

        if result.ended_run.is_some() {
            self.canvas.fill(Paint::Background);
        }
        draw_scene(&mut self.canvas, &self.state.view());
        Ok(())
    }

    fn restart_game(&mut self) -> Result<()> {
        let score = self
            .engine
            .restart(&mut self.state)
            .context("Failed to restart the game")?;
        self.metrics.end_run(score);
        self.canvas.fill(Paint::Background);
        draw_scene(&mut self.canvas, &self.state.view());
        debug!(score, "restart requested");
        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, &self.canvas, &self.state, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
