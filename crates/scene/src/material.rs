use serde::{Deserialize, Serialize};
use showroom_common::Color;

/// Opaque handle to a texture owned by the asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

/// Which faces of a mesh are shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Optional texture slots of the standard material.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialMaps {
    pub color: Option<TextureHandle>,
    pub ambient_occlusion: Option<TextureHandle>,
    pub displacement: Option<TextureHandle>,
    pub normal: Option<TextureHandle>,
    pub metalness: Option<TextureHandle>,
    pub roughness: Option<TextureHandle>,
    pub alpha: Option<TextureHandle>,
}

/// Metalness/roughness material shared by every showroom mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardMaterial {
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
    /// Strength of the ambient occlusion map; no effect without one.
    pub ao_map_intensity: f32,
    /// World-space scale of the displacement map; no effect without one.
    pub displacement_scale: f32,
    pub side: Side,
    pub env_map: Option<TextureHandle>,
    pub maps: MaterialMaps,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            ao_map_intensity: 1.0,
            displacement_scale: 1.0,
            side: Side::Front,
            env_map: None,
            maps: MaterialMaps::default(),
        }
    }
}

impl StandardMaterial {
    /// The polished, double-sided look used by the showroom.
    pub fn showroom(env_map: Option<TextureHandle>) -> Self {
        Self {
            metalness: 0.7,
            roughness: 0.2,
            side: Side::Double,
            env_map,
            ..Self::default()
        }
    }

    pub fn is_double_sided(&self) -> bool {
        self.side == Side::Double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showroom_material() {
        let m = StandardMaterial::showroom(Some(TextureHandle(7)));
        assert_eq!(m.metalness, 0.7);
        assert_eq!(m.roughness, 0.2);
        assert!(m.is_double_sided());
        assert_eq!(m.env_map, Some(TextureHandle(7)));
        assert_eq!(m.maps, MaterialMaps::default());
    }

    #[test]
    fn default_is_rough_dielectric() {
        let m = StandardMaterial::default();
        assert_eq!(m.metalness, 0.0);
        assert_eq!(m.roughness, 1.0);
        assert!(!m.is_double_sided());
    }
}
