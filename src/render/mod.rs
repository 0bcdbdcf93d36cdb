//! Rendering side of the engine boundary.
//!
//! The engine never draws. Drivers hand every tick outcome to a
//! [`TickObserver`], and a [`Renderer`] paints the session's read-only view.

pub mod renderer;

pub use renderer::Renderer;

use crate::game::{GameSession, TickOutcome};

/// Receives what each tick did, for redraws, score updates and sound cues
pub trait TickObserver {
    fn on_tick(&mut self, session: &GameSession, outcome: TickOutcome);

    fn on_restart(&mut self, _session: &GameSession) {}
}
