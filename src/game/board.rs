use super::state::Position;

/// Fixed geometry of the playing field
///
/// The board holds no mutable state. Cells are addressed by column and row;
/// `cell_size` only matters when mapping a cell onto the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
    /// Side of one cell in pixels
    pub cell_size: u32,
}

impl Board {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// The cell containing the middle pixel of the surface
    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Fold a position back onto the board, treating both axes as periodic
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(
            pos.x.rem_euclid(self.width as i32),
            pos.y.rem_euclid(self.height as i32),
        )
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Top-left pixel of a cell
    pub fn pixel_origin(&self, pos: Position) -> (i64, i64) {
        let size = self.cell_size as i64;
        (pos.x as i64 * size, pos.y as i64 * size)
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_of_default_surface() {
        let board = Board::new(32, 24, 20);
        assert_eq!(board.center(), Position::new(16, 12));
        assert_eq!(board.pixel_origin(board.center()), (320, 240));
    }

    #[test]
    fn test_wrap_both_edges() {
        let board = Board::new(32, 24, 20);
        assert_eq!(board.wrap(Position::new(32, 5)), Position::new(0, 5));
        assert_eq!(board.wrap(Position::new(-1, 5)), Position::new(31, 5));
        assert_eq!(board.wrap(Position::new(7, -1)), Position::new(7, 23));
        assert_eq!(board.wrap(Position::new(7, 24)), Position::new(7, 0));
        assert_eq!(board.wrap(Position::new(3, 4)), Position::new(3, 4));
    }

    #[test]
    fn test_bounds_checking() {
        let board = Board::new(20, 20, 1);
        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(19, 19)));
        assert!(!board.contains(Position::new(-1, 0)));
        assert!(!board.contains(Position::new(20, 0)));
        assert!(!board.contains(Position::new(0, 20)));
    }

    #[test]
    fn test_cells_cover_board_once() {
        let board = Board::new(4, 3, 10);
        let cells: Vec<_> = board.cells().collect();
        assert_eq!(cells.len(), board.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[4], Position::new(0, 1));
        assert!(cells.iter().all(|&c| board.contains(c)));
    }
}
