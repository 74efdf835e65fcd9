//! wgpu render backend for the showroom.
//!
//! Draws the scene meshes with a metalness/roughness shader lit by the
//! ambient and directional lights plus an environment cubemap reflection.
//! The scene is rendered into an offscreen target sized by the logical
//! viewport times the capped pixel ratio, then scaled onto the swapchain.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Until the environment cubemap is decoded a neutral 1x1 cube stands in.
//! - Offscreen targets are rebuilt lazily, at most once per frame.

mod gpu;
mod shaders;

pub use gpu::{GpuFrame, WgpuRenderer, target_size};
