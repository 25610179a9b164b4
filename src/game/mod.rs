//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A tick is driven from outside: queue input with [`GameEngine::request`], then
//! call [`GameEngine::step`] once per clock tick and hand [`GameState::view`] to
//! a renderer.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod spawn;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use board::Board;
pub use config::{GameConfig, MAX_GRID_SIDE, Topology};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::GameError;
pub use spawn::{CellSource, RandomCells, random_free_cell};
pub use state::{Advance, Apple, CollisionType, GameState, Position, RenderView, Snake};
