use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, Euler rotation (radians, XYZ order), scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix: scale, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Premultiply by an intensity and pad to four components for GPU upload.
    pub fn scaled(&self, intensity: f32) -> [f32; 4] {
        [self.r * intensity, self.g * intensity, self.b * intensity, 1.0]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn matrix_carries_translation() {
        let t = Transform::at(Vec3::new(-1.5, 0.0, 0.0));
        let origin = t.matrix().transform_point3(Vec3::ZERO);
        assert_eq!(origin, Vec3::new(-1.5, 0.0, 0.0));
    }

    #[test]
    fn rotation_about_y() {
        let t = Transform {
            rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            ..Transform::default()
        };
        let x = t.matrix().transform_vector3(Vec3::X);
        assert!((x - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn color_from_hex() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        let c = Color::from_hex(0xff0000);
        assert_eq!(c, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn color_scaled() {
        assert_eq!(Color::WHITE.scaled(0.5), [0.5, 0.5, 0.5, 1.0]);
    }
}
