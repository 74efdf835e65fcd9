use glam::Vec3;
use showroom_common::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Light arriving from `position` towards the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface towards the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or(Vec3::Y)
    }
}

/// Static light rig, fixed after scene construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Lights {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Color::from_hex(0xffffff),
                intensity: 0.5,
            },
            directional: DirectionalLight {
                color: Color::from_hex(0xffffff),
                intensity: 0.5,
                position: Vec3::new(2.0, 3.0, 4.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rig() {
        let lights = Lights::default();
        assert_eq!(lights.ambient.intensity, 0.5);
        assert_eq!(lights.directional.position, Vec3::new(2.0, 3.0, 4.0));
        assert!((lights.directional.direction().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn light_at_origin_points_up() {
        let light = DirectionalLight {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::ZERO,
        };
        assert_eq!(light.direction(), Vec3::Y);
    }
}
