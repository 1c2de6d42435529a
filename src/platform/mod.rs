//! Platform abstraction layer
//!
//! Seams between the simulation and whatever hosts it:
//! - Input polling and frame presentation (`Frontend`)
//! - Real-time pacing (`Pacer`)
//! - The session loop that ties them to the tick

pub mod clock;
pub mod session;

use std::time::Duration;

use crate::sim::{FrameSnapshot, GameState, TickInput};

pub use clock::{FixedRateClock, Unpaced};
pub use session::{Outcome, RunSummary, Session};

/// Rendering/input engine as seen from the loop
pub trait Frontend {
    /// Collect this tick's input. The state is read-only context (e.g. for
    /// a frontend that wants to show something on key press).
    fn poll_input(&mut self, state: &GameState) -> TickInput;

    /// Draw one frame
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Wall-clock pacing for the loop
pub trait Pacer {
    /// Block until the next tick is due
    fn wait_for_next_tick(&mut self);

    /// Stall the loop (EMP flash, game over hold)
    fn pause(&mut self, duration: Duration);
}
