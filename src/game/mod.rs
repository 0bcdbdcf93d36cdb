//! Core game logic module for Snake
//!
//! This module contains all the game rules without any I/O or rendering dependencies.
//! Drivers call [`GameSession::tick`] once per timer fire and read the session back
//! through its accessors.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod grid;
pub mod point;
pub mod score;
pub mod snake;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{CellView, EndReason, GameSession, INITIAL_LENGTH, TickOutcome};
pub use error::GameError;
pub use grid::{Cell, Grid};
pub use point::Point;
pub use score::Score;
pub use snake::Snake;
