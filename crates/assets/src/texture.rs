use crate::AssetError;
use sha2::{Digest, Sha256};
use showroom_scene::TextureHandle;
use std::path::{Path, PathBuf};

/// Cube face order: +X, -X, +Y, -Y, +Z, -Z.
pub const CUBE_FACES: [&str; 6] = ["px", "nx", "py", "ny", "pz", "nz"];

/// Where a texture's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    Image(PathBuf),
    Cube(Box<[PathBuf; 6]>),
}

impl TextureSource {
    /// Six faces named `px.jpg`, `nx.jpg`, ... inside `dir`.
    pub fn cube_in(dir: impl AsRef<Path>, extension: &str) -> Self {
        let dir = dir.as_ref();
        Self::Cube(Box::new(
            CUBE_FACES.map(|face| dir.join(format!("{face}.{extension}"))),
        ))
    }

    /// Resolve relative paths against `root`.
    pub fn resolve(&self, root: &Path) -> Self {
        match self {
            Self::Image(p) => Self::Image(root.join(p)),
            Self::Cube(faces) => {
                let faces: &[PathBuf; 6] = faces;
                Self::Cube(Box::new(faces.clone().map(|p| root.join(p))))
            }
        }
    }

    /// Display label used in lifecycle notifications.
    pub fn url(&self) -> String {
        match self {
            Self::Image(p) => p.display().to_string(),
            Self::Cube(faces) => faces[0]
                .parent()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| faces[0].display().to_string()),
        }
    }

    /// Content-addressed handle derived from the source paths.
    pub fn handle(&self) -> TextureHandle {
        let mut hasher = Sha256::new();
        match self {
            Self::Image(p) => {
                hasher.update(b"image:");
                hasher.update(p.to_string_lossy().as_bytes());
            }
            Self::Cube(faces) => {
                hasher.update(b"cube:");
                for p in faces.iter() {
                    hasher.update(p.to_string_lossy().as_bytes());
                    hasher.update([0u8]);
                }
            }
        }
        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        TextureHandle(u64::from_le_bytes(bytes))
    }

    /// Read and decode the source into RGBA8 layers.
    pub fn decode(&self) -> Result<TextureData, AssetError> {
        match self {
            Self::Image(p) => {
                let img = image::open(p)?.to_rgba8();
                Ok(TextureData {
                    kind: TextureKind::Flat,
                    width: img.width(),
                    height: img.height(),
                    layers: vec![img.into_raw()],
                })
            }
            Self::Cube(faces) => {
                let mut layers = Vec::with_capacity(6);
                let mut expected = None;
                for (face, p) in faces.iter().enumerate() {
                    let img = image::open(p)?.to_rgba8();
                    let dims = img.dimensions();
                    match expected {
                        None => expected = Some(dims),
                        Some(e) if e != dims => {
                            return Err(AssetError::CubeFaceMismatch {
                                face,
                                expected: e,
                                actual: dims,
                            });
                        }
                        Some(_) => {}
                    }
                    layers.push(img.into_raw());
                }
                let (width, height) = expected.unwrap_or((0, 0));
                Ok(TextureData {
                    kind: TextureKind::Cube,
                    width,
                    height,
                    layers,
                })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    Flat,
    Cube,
}

/// Decoded RGBA8 pixels. Flat textures have one layer, cubemaps six.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub kind: TextureKind,
    pub width: u32,
    pub height: u32,
    pub layers: Vec<Vec<u8>>,
}

impl TextureData {
    pub fn byte_len(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }
}
