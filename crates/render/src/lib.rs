//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene snapshot; they never mutate it.
//! - One `render` call draws exactly one frame.
//!
//! The debug text renderer stands in for the GPU backend in the CLI and in
//! tests. The trait is stable; the wgpu backend implements it too.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "showroom-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
