//! Viewport reactivity: drawable size, capped pixel density, fullscreen toggling.
//!
//! # Invariants
//! - Width and height are never zero; aspect division is always defined.
//! - The pixel ratio handed to the drawing surface never exceeds the cap.
//! - Fullscreen toggling is best-effort and never surfaces an error.

mod click;
mod controller;
mod state;

pub use click::DoubleClickDetector;
pub use controller::{DrawingSurface, FullscreenError, FullscreenShell, ViewportController};
pub use state::{DEFAULT_PIXEL_RATIO_CAP, ResizeEvent, ViewportState};
