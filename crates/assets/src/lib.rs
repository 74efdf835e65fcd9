//! Texture loading: images and cubemaps decoded off the frame thread.
//!
//! Requests return a handle immediately; pixels arrive later through `poll`.
//! The renderer consumes textures by handle, never by raw file paths.
//!
//! # Invariants
//! - Handles are content-addressed from the source path(s); repeated requests
//!   for the same source share one handle and one decode.
//! - Failed loads count towards completion and are only reported.

mod loader;
mod manifest;
mod texture;

pub use loader::{AssetLoader, LoadEvent, TextureStore};
pub use manifest::{ManifestHandles, TextureManifest};
pub use texture::{CUBE_FACES, TextureData, TextureKind, TextureSource};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("cube face {face} is {actual:?}, expected {expected:?}")]
    CubeFaceMismatch {
        face: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("asset loader worker has shut down")]
    WorkerGone,
}

pub fn crate_info() -> &'static str {
    "showroom-assets v0.1.0"
}
