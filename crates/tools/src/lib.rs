//! Developer Tooling: debug parameter bindings and a scene inspector.
//!
//! # Invariants
//! - Bindings never write a value outside the declared range.
//! - The binding layer knows nothing about the UI that drives it.

mod inspector;
mod params;

pub use inspector::{SceneInspector, SceneSummary};
pub use params::{BindingError, NumericField, ParamPanel, material_panel};

pub fn crate_info() -> &'static str {
    "showroom-tools v0.1.0"
}
