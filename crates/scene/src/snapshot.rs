use crate::camera::PerspectiveCamera;
use crate::controls::OrbitControls;
use crate::geometry::MeshKind;
use crate::light::Lights;
use crate::material::{StandardMaterial, TextureHandle};
use glam::Vec3;
use showroom_common::{ShowroomConfig, SpinConfig, Transform};

/// Angular velocities (radians per second) about X and Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub x: f32,
    pub y: f32,
}

impl From<SpinConfig> for Spin {
    fn from(c: SpinConfig) -> Self {
        Self { x: c.x, y: c.y }
    }
}

/// A mesh placed in the scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub mesh: MeshKind,
    pub transform: Transform,
    pub spin: Option<Spin>,
}

/// Everything drawn each frame. Built once; only rotations, the camera pose
/// and material parameters change afterwards.
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub objects: Vec<SceneObject>,
    pub lights: Lights,
    pub material: StandardMaterial,
}

impl SceneSnapshot {
    /// Plane, sphere and torus in a row under the showroom material.
    pub fn showcase(config: &ShowroomConfig, env_map: Option<TextureHandle>) -> Self {
        let spin = Some(Spin::from(config.spin));
        let objects = vec![
            SceneObject {
                name: "plane".into(),
                mesh: MeshKind::Plane {
                    width: 1.0,
                    height: 1.0,
                    width_segments: 100,
                    height_segments: 100,
                },
                transform: Transform::default(),
                spin,
            },
            SceneObject {
                name: "sphere".into(),
                mesh: MeshKind::Sphere {
                    radius: 0.5,
                    width_segments: 64,
                    height_segments: 64,
                },
                transform: Transform::at(Vec3::new(-1.5, 0.0, 0.0)),
                spin,
            },
            SceneObject {
                name: "torus".into(),
                mesh: MeshKind::Torus {
                    radius: 0.3,
                    tube: 0.2,
                    radial_segments: 64,
                    tubular_segments: 128,
                },
                transform: Transform::at(Vec3::new(1.5, 0.0, 0.0)),
                spin,
            },
        ];

        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let mut camera = PerspectiveCamera::from_config(&config.camera, aspect);
        camera.update_projection_matrix();

        tracing::debug!(objects = objects.len(), "showcase scene built");

        Self {
            camera,
            controls: OrbitControls::damped(config.camera.damping_factor),
            objects,
            lights: Lights::default(),
            material: StandardMaterial::showroom(env_map),
        }
    }

    /// Set every spinning object's rotation from elapsed seconds.
    pub fn animate(&mut self, elapsed: f32) {
        for object in &mut self.objects {
            if let Some(spin) = object.spin {
                object.transform.rotation.x = spin.x * elapsed;
                object.transform.rotation.y = spin.y * elapsed;
            }
        }
    }

    /// One damped controls step, then refresh the projection if it went stale.
    pub fn update_camera(&mut self) -> bool {
        let moved = self.controls.update(&mut self.camera);
        if self.camera.projection_dirty() {
            self.camera.update_projection_matrix();
        }
        moved
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}
