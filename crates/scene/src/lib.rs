//! Scene snapshot for the showroom: camera, damped orbit controls, lights,
//! the shared standard material and the procedural meshes it is applied to.
//!
//! # Invariants
//! - Structure is fixed after construction; only object rotations, camera
//!   pose and material parameters change at runtime.
//! - Spin is a pure function of elapsed time (no per-frame accumulation).

mod camera;
mod controls;
pub mod geometry;
mod light;
mod material;
mod snapshot;

pub use camera::PerspectiveCamera;
pub use controls::OrbitControls;
pub use geometry::{MeshData, MeshKind, MeshVertex};
pub use light::{AmbientLight, DirectionalLight, Lights};
pub use material::{MaterialMaps, Side, StandardMaterial, TextureHandle};
pub use snapshot::{SceneObject, SceneSnapshot, Spin};
