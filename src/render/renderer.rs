use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::canvas::{BACKGROUND, BORDER, CellGrid, Paint};
use crate::game::GameState;
use crate::metrics::GameMetrics;

/// Terminal columns used per board cell
const CELL_COLUMNS: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        canvas: &CellGrid,
        state: &GameState,
        metrics: &GameMetrics,
    ) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(state, metrics), header);

        // Board plus its frame, centered in the body
        let board_width = Self::span(canvas.width(), CELL_COLUMNS);
        let board_height = Self::span(canvas.height(), 1);
        let [column] = Layout::horizontal([Constraint::Length(board_width)])
            .flex(Flex::Center)
            .areas(body);
        let [board] = Layout::vertical([Constraint::Length(board_height)])
            .flex(Flex::Center)
            .areas(column);
        frame.render_widget(self.render_grid(canvas), board);

        frame.render_widget(self.render_controls(), footer);
    }

    /// Terminal extent of `cells` cells plus the frame, clamped to what a
    /// layout constraint can hold
    fn span(cells: u32, columns_per_cell: u16) -> u16 {
        u16::try_from(cells)
            .unwrap_or(u16::MAX)
            .saturating_mul(columns_per_cell)
            .saturating_add(2)
    }

    fn render_grid(&self, canvas: &CellGrid) -> Paragraph<'static> {
        let lines: Vec<Line> = canvas
            .rows()
            .map(|row| Line::from(row.iter().map(|&paint| Self::cell_span(paint)).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn cell_span(paint: Paint) -> Span<'static> {
        match paint {
            Paint::Background => Span::styled("  ", Style::default().bg(BACKGROUND)),
            Paint::Bordered(fill) => Span::styled("[]", Style::default().fg(BORDER).bg(fill)),
        }
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.max(state.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Resets: ", label),
            Span::styled(state.resets.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
