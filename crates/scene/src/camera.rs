use glam::{Mat4, Vec3};
use showroom_common::CameraConfig;

/// Perspective camera looking at a target point.
///
/// Changing any projection parameter through the setters marks the cached
/// projection matrix dirty; it is recomputed by `update_projection_matrix`.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
    projection_dirty: bool,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 1.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            fov,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
            projection_dirty: true,
        }
    }

    /// Camera placed `config.distance` units along +Z, looking at the origin.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.fov_degrees, aspect, config.near, config.far);
        camera.position = Vec3::new(0.0, 0.0, config.distance);
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.projection_dirty = true;
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.projection_dirty = true;
    }

    pub fn projection_dirty(&self) -> bool {
        self.projection_dirty
    }

    /// Recompute the projection matrix from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
        self.projection_dirty = false;
    }

    /// Cached projection. Stale until `update_projection_matrix` runs after a change.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}
