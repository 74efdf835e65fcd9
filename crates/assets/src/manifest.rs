use crate::loader::AssetLoader;
use crate::texture::TextureSource;
use showroom_scene::TextureHandle;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Named texture sources plus the environment cubemap.
#[derive(Debug, Clone)]
pub struct TextureManifest {
    pub textures: Vec<(String, TextureSource)>,
    pub environment: TextureSource,
}

/// Handles returned by queueing a manifest.
#[derive(Debug, Clone)]
pub struct ManifestHandles {
    pub textures: BTreeMap<String, TextureHandle>,
    pub environment: TextureHandle,
}

impl TextureManifest {
    /// Crate, matcap and door texture set, with environment map `0`.
    pub fn showcase() -> Self {
        let image = |name: &str, path: &str| (name.to_string(), TextureSource::Image(PathBuf::from(path)));
        Self {
            textures: vec![
                image("crate", "Crate.webp"),
                image("matcap", "matcaps/3.png"),
                image("door_color", "door/color.jpg"),
                image("door_height", "door/height.jpg"),
                image("door_normal", "door/normal.jpg"),
                image("door_alpha", "door/alpha.jpg"),
                image("door_metalness", "door/metalness.jpg"),
                image("door_roughness", "door/roughness.jpg"),
                image("door_ambient_occlusion", "door/ambientOcclusion.jpg"),
            ],
            environment: TextureSource::cube_in("environmentMaps/0", "jpg"),
        }
    }

    /// Number of load requests the manifest issues.
    pub fn count(&self) -> usize {
        self.textures.len() + 1
    }

    /// Queue every entry on `loader`.
    pub fn queue(&self, loader: &mut AssetLoader) -> ManifestHandles {
        let textures = self
            .textures
            .iter()
            .map(|(name, source)| (name.clone(), loader.load(source.clone())))
            .collect();
        let environment = loader.load(self.environment.clone());
        tracing::info!(count = self.count(), root = %loader.root().display(), "textures queued");
        ManifestHandles {
            textures,
            environment,
        }
    }
}
