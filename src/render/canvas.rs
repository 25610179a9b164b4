//! Cell-level drawing surface
//!
//! Drawing is incremental: each tick paints the snake and the apple and
//! erases the cell the tail just left. Clear the canvas after a reset.

use ratatui::style::Color;

use crate::game::{Board, Position, RenderView};

pub const BACKGROUND: Color = Color::Rgb(0, 0, 0);
pub const BORDER: Color = Color::Rgb(93, 216, 228);
pub const APPLE: Color = Color::Rgb(255, 0, 0);
pub const SNAKE: Color = Color::Rgb(0, 255, 0);

/// What a cell looks like
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Paint {
    #[default]
    Background,
    /// Filled square with a border
    Bordered(Color),
}

/// Anything cells can be painted onto
pub trait Canvas {
    fn paint(&mut self, cell: Position, paint: Paint);
    fn fill(&mut self, paint: Paint);
}

pub fn draw_cell<C: Canvas + ?Sized>(canvas: &mut C, cell: Position, color: Color) {
    canvas.paint(cell, Paint::Bordered(color));
}

pub fn erase_cell<C: Canvas + ?Sized>(canvas: &mut C, cell: Position) {
    canvas.paint(cell, Paint::Background);
}

/// Paint one tick's worth of changes
pub fn draw_scene<C: Canvas + ?Sized>(canvas: &mut C, view: &RenderView<'_>) {
    for &cell in view.positions {
        draw_cell(canvas, cell, SNAKE);
    }
    if let Some(cell) = view.last_vacated {
        erase_cell(canvas, cell);
    }
    draw_cell(canvas, view.apple, APPLE);
}

/// In-memory canvas, one [`Paint`] per board cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    width: u32,
    height: u32,
    cells: Vec<Paint>,
}

impl CellGrid {
    pub fn new(board: &Board) -> Self {
        Self {
            width: board.width,
            height: board.height,
            cells: vec![Paint::Background; board.cell_count()],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, cell: Position) -> Option<Paint> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Paint]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    fn index(&self, cell: Position) -> Option<usize> {
        let in_bounds = cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height;
        in_bounds.then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }
}

impl Canvas for CellGrid {
    fn paint(&mut self, cell: Position, paint: Paint) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = paint;
        }
    }

    fn fill(&mut self, paint: Paint) {
        self.cells.fill(paint);
    }
}
