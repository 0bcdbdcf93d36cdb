//! Signal Snake - a grid-based Snake game
//!
//! This library provides:
//! - Core game rules: board, snake, item spawning, scoring (game module)
//! - Key translation (input module)
//! - The tick observer seam and TUI rendering (render module)
//! - In-process play statistics (metrics module)
//! - The controller and the terminal timer driver (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
