//! Runtime: frame clock, frame scheduling and the render loop.
//!
//! # Invariants
//! - The loop moves from not-started to running exactly once.
//! - Elapsed time never decreases.
//! - Each tick draws exactly once and re-arms the scheduler exactly once,
//!   unless the loop token has been cancelled.
//! - Scheduling and time are injected, so tests step frames by hand.

mod app;
mod clock;
mod render_loop;
mod schedule;

pub use app::Showroom;
pub use clock::{FrameClock, ManualClock, SystemClock};
pub use render_loop::{LoopError, LoopState, RenderLoop};
pub use schedule::{CancellationToken, FrameScheduler, ManualScheduler};
