use thiserror::Error;

use super::point::Point;

/// Errors raised by the game engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A grid accessor was handed a point outside the board.
    #[error("point ({}, {}) is outside the {width}x{height} board", point.x, point.y)]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },
    /// No free cell is left to place an item in.
    #[error("board is full, no free cell for a new item")]
    BoardFull,
    /// The configuration cannot describe a playable game.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
