//! Grid Snake - the classic Snake game on a fixed grid, played in the terminal
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Keyboard mapping (input module)
//! - Cell canvas and TUI rendering (render module)
//! - Session statistics (metrics module)
//! - Interactive and headless game loops (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
