//! Apple placement
//!
//! Placement is rejection sampling: draw a cell, keep it if the snake is not
//! on it. Where the draws come from is abstracted behind [`CellSource`] so
//! tests can replay a fixed sequence.

use rand::Rng;
use std::collections::HashSet;

use super::board::Board;
use super::error::GameError;
use super::state::Position;

/// Supplies candidate cells for the apple
pub trait CellSource {
    /// Draw one cell inside `board`
    fn sample(&mut self, board: &Board) -> Position;
}

/// Uniform draws from any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomCells<R> {
    rng: R,
}

impl<R: Rng> RandomCells<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CellSource for RandomCells<R> {
    fn sample(&mut self, board: &Board) -> Position {
        let x = self.rng.gen_range(0..board.width) as i32;
        let y = self.rng.gen_range(0..board.height) as i32;
        Position::new(x, y)
    }
}

/// Draw cells until one falls outside `occupied`
///
/// Fails with [`GameError::BoardFull`] instead of spinning forever when
/// `occupied` already covers every cell of the board.
pub fn random_free_cell<S: CellSource + ?Sized>(
    board: &Board,
    occupied: &HashSet<Position>,
    source: &mut S,
) -> Result<Position, GameError> {
    let taken = occupied.iter().filter(|&&pos| board.contains(pos)).count();
    if taken >= board.cell_count() {
        return Err(GameError::BoardFull {
            cells: board.cell_count(),
        });
    }

    loop {
        let pos = source.sample(board);
        if !occupied.contains(&pos) {
            return Ok(pos);
        }
    }
}

/// Cycles through a fixed list of cells
#[cfg(test)]
pub(crate) struct CycleCells {
    cells: Vec<Position>,
    next: usize,
}

#[cfg(test)]
impl CycleCells {
    pub(crate) fn new(cells: &[(i32, i32)]) -> Self {
        Self {
            cells: cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            next: 0,
        }
    }
}

#[cfg(test)]
impl CellSource for CycleCells {
    fn sample(&mut self, _board: &Board) -> Position {
        let pos = self.cells[self.next % self.cells.len()];
        self.next += 1;
        pos
    }
}
