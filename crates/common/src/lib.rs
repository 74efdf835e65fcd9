//! Shared types and configuration for the material showroom.
//!
//! # Invariants
//! - Rotations are stored as Euler angles (XYZ order) so per-axis spin can be
//!   assigned directly from elapsed time.
//! - Every configuration field has a default; a config file only overrides.

pub mod config;
pub mod types;

pub use config::{CameraConfig, ConfigError, ShowroomConfig, SpinConfig, WindowConfig};
pub use types::{Color, Transform};
