pub mod controller;
pub mod human;

pub use controller::GameController;
pub use human::{HumanMode, TerminalFeedback};
