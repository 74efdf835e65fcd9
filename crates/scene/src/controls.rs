use crate::camera::PerspectiveCamera;
use glam::Vec3;
use std::f32::consts::PI;

const EPS: f32 = 1e-6;
const MIN_DELTA: f32 = 1e-6;

/// Spherical coordinates around the orbit target, Y up.
/// `theta` is the azimuth around Y measured from +Z, `phi` the polar angle from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Orbit camera controls with optional damping.
///
/// Input accumulates a pending spherical delta; `update` applies it to the
/// camera. With damping enabled only `damping_factor` of the pending delta is
/// applied per update and the remainder decays, so motion eases out over
/// several frames.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn damped(damping_factor: f32) -> Self {
        Self {
            enable_damping: true,
            damping_factor,
            ..Self::default()
        }
    }

    /// Rotate from a pointer drag of `(dx, dy)` pixels in a viewport
    /// `viewport_height` pixels tall. A drag of the full height is one turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.delta_theta -= 2.0 * PI * dx * self.rotate_speed / height;
        self.delta_phi -= 2.0 * PI * dy * self.rotate_speed / height;
    }

    /// Dolly from a wheel step. Negative `delta` (scroll up) moves closer.
    pub fn zoom(&mut self, delta: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if delta < 0.0 {
            self.scale *= step;
        } else if delta > 0.0 {
            self.scale /= step;
        }
    }

    /// Translate the target in the camera's view plane from a drag of
    /// `(dx, dy)` pixels, so the point under the cursor follows it.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32, camera: &PerspectiveCamera) {
        let height = viewport_height.max(1.0);
        let forward = camera.target - camera.position;
        let target_distance = forward.length() * (camera.fov.to_radians() / 2.0).tan();
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward).try_normalize().unwrap_or(Vec3::Y);

        let scale = 2.0 * target_distance * self.pan_speed / height;
        self.pan_offset += -right * dx * scale + up * dy * scale;
    }

    /// True while damped motion is still settling.
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > MIN_DELTA
            || self.delta_phi.abs() > MIN_DELTA
            || (self.scale - 1.0).abs() > MIN_DELTA
            || self.pan_offset.length() > MIN_DELTA
    }

    /// Advance one step and reposition the camera. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(offset);

        let weight = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.delta_theta * weight;
        spherical.phi += self.delta_phi * weight;
        spherical.phi = spherical.phi.clamp(EPS, PI - EPS);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * weight;

        let position = self.target + spherical.to_offset();
        let moved = position.distance_squared(camera.position) > EPS * EPS;
        camera.position = position;
        camera.target = self.target;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
            if !self.is_moving() {
                self.delta_theta = 0.0;
                self.delta_phi = 0.0;
                self.pan_offset = Vec3::ZERO;
            }
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::default()
    }

    #[test]
    fn spherical_round_trip() {
        let v = Vec3::new(2.0, 3.0, 4.0);
        let back = Spherical::from_offset(v).to_offset();
        assert!((back - v).length() < 1e-5);
    }

    #[test]
    fn idle_update_keeps_position() {
        let mut cam = camera();
        let mut controls = OrbitControls::damped(0.05);
        let start = cam.position;
        assert!(!controls.update(&mut cam));
        assert!((cam.position - start).length() < 1e-5);
    }

    #[test]
    fn undamped_rotation_applies_at_once() {
        let mut cam = camera();
        let mut controls = OrbitControls::default();
        // Quarter of the viewport height is a quarter turn
        controls.rotate(-100.0, 0.0, 400.0);
        assert!(controls.update(&mut cam));
        assert!((cam.position - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
        assert!(!controls.is_moving());
    }

    #[test]
    fn damping_eases_over_several_frames() {
        let mut cam = camera();
        let mut controls = OrbitControls::damped(0.05);
        controls.rotate(-100.0, 0.0, 400.0);

        controls.update(&mut cam);
        let first = cam.position;
        // Only a fraction of the quarter turn is applied on the first step
        assert!(first.x > 0.0 && first.x < 1.0);
        assert!(controls.is_moving());

        for _ in 0..500 {
            controls.update(&mut cam);
        }
        assert!(!controls.is_moving());
        // Geometric series converges to the full quarter turn
        assert!((cam.position - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-2);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut cam = camera();
        let mut controls = OrbitControls::default();
        controls.rotate(0.0, 10_000.0, 100.0);
        controls.update(&mut cam);
        assert!(cam.position.is_finite());
        assert!(cam.position.y > 4.99);
    }

    #[test]
    fn zoom_in_moves_closer() {
        let mut cam = camera();
        let mut controls = OrbitControls::default();
        controls.zoom(-1.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 4.75).abs() < 1e-4);

        controls.zoom(1.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn pan_translates_target_and_camera_together() {
        let mut cam = camera();
        let mut controls = OrbitControls::default();
        controls.pan(100.0, 0.0, 400.0, &cam);
        assert!(controls.is_moving());
        assert!(controls.update(&mut cam));

        // Dragging right moves the view plane left by the visible share of the height
        let expected = 2.0 * 5.0 * (cam.fov.to_radians() / 2.0).tan() * 100.0 / 400.0;
        assert!((controls.target - Vec3::new(-expected, 0.0, 0.0)).length() < 1e-4);
        assert!((cam.position - controls.target - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
        assert_eq!(cam.target, controls.target);
        assert!(!controls.is_moving());
    }

    #[test]
    fn vertical_pan_moves_up() {
        let mut cam = camera();
        let mut controls = OrbitControls::default();
        controls.pan(0.0, 50.0, 400.0, &cam);
        controls.update(&mut cam);
        assert!(controls.target.y > 0.0);
        assert!(controls.target.x.abs() < 1e-5 && controls.target.z.abs() < 1e-5);
    }

    #[test]
    fn damped_pan_settles_at_full_offset() {
        let mut cam = camera();
        let mut controls = OrbitControls::damped(0.05);
        controls.pan(-100.0, 0.0, 400.0, &cam);
        let expected = 2.0 * 5.0 * (cam.fov.to_radians() / 2.0).tan() * 100.0 / 400.0;

        controls.update(&mut cam);
        assert!(controls.target.x > 0.0 && controls.target.x < expected);

        for _ in 0..500 {
            controls.update(&mut cam);
        }
        assert!(!controls.is_moving());
        assert!((controls.target.x - expected).abs() < 1e-2);
        assert!((cam.position.distance(controls.target) - 5.0).abs() < 1e-3);
    }

    #[test]
    fn distance_limits_hold() {
        let mut cam = camera();
        let mut controls = OrbitControls {
            max_distance: 6.0,
            ..OrbitControls::default()
        };
        for _ in 0..20 {
            controls.zoom(1.0);
            controls.update(&mut cam);
        }
        assert!((cam.position.length() - 6.0).abs() < 1e-4);
    }
}
