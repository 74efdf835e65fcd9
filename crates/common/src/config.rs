use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading a showroom configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level showroom configuration.
///
/// Missing fields fall back to the defaults below, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowroomConfig {
    /// Upper bound for the drawing surface pixel ratio.
    pub pixel_ratio_cap: f64,
    pub spin: SpinConfig,
    pub camera: CameraConfig,
    pub window: WindowConfig,
    /// Root directory that texture paths are resolved against.
    pub textures_dir: PathBuf,
}

impl Default for ShowroomConfig {
    fn default() -> Self {
        Self {
            pixel_ratio_cap: 2.0,
            spin: SpinConfig::default(),
            camera: CameraConfig::default(),
            window: WindowConfig::default(),
            textures_dir: PathBuf::from("./textures"),
        }
    }
}

/// Angular velocities (radians per second) applied to every spinning mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub x: f32,
    pub y: f32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self { x: 0.15, y: 0.10 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial distance from the orbit target along +Z.
    pub distance: f32,
    pub damping_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
            damping_factor: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Showroom".into(),
            width: 1280,
            height: 720,
        }
    }
}

impl ShowroomConfig {
    /// Load a config from a YAML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pixel_ratio_cap.is_finite() && self.pixel_ratio_cap > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pixel_ratio_cap must be positive, got {}",
                self.pixel_ratio_cap
            )));
        }
        let cam = &self.camera;
        if cam.near <= 0.0 || cam.far <= cam.near {
            return Err(ConfigError::Invalid(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                cam.near, cam.far
            )));
        }
        if !(0.0..=1.0).contains(&cam.damping_factor) {
            return Err(ConfigError::Invalid(format!(
                "damping_factor must be within [0, 1], got {}",
                cam.damping_factor
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ShowroomConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pixel_ratio_cap, 2.0);
        assert_eq!(config.spin, SpinConfig { x: 0.15, y: 0.10 });
        assert_eq!(config.camera.fov_degrees, 75.0);
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = ShowroomConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ShowroomConfig::default());
    }

    #[test]
    fn partial_yaml_overrides() {
        let config = ShowroomConfig::from_yaml("pixel_ratio_cap: 1.5\nspin:\n  y: 0.3\n").unwrap();
        assert_eq!(config.pixel_ratio_cap, 1.5);
        assert_eq!(config.spin.x, 0.15);
        assert_eq!(config.spin.y, 0.3);
    }

    #[test]
    fn rejects_non_positive_cap() {
        let err = ShowroomConfig::from_yaml("pixel_ratio_cap: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let err = ShowroomConfig::from_yaml("camera:\n  near: 10\n  far: 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "textures_dir: /srv/textures").unwrap();
        let config = ShowroomConfig::load(tmp.path()).unwrap();
        assert_eq!(config.textures_dir, PathBuf::from("/srv/textures"));
    }

    #[test]
    fn load_or_default_without_path() {
        let config = ShowroomConfig::load_or_default(None).unwrap();
        assert_eq!(config, ShowroomConfig::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ShowroomConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
