use thiserror::Error;

/// Errors raised by the game core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Every cell of the board is occupied, so there is nowhere to put the apple
    #[error("no free cell left for the apple: all {cells} cells are occupied")]
    BoardFull { cells: usize },

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}
