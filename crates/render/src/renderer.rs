use showroom_scene::SceneSnapshot;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene snapshot through its camera and produces
/// output. It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the given scene.
    fn render(&mut self, scene: &SceneSnapshot) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable dump of the scene as seen by the camera.
/// Useful for CLI output, logging, and testing the render loop.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &SceneSnapshot) -> String {
        self.frames += 1;
        let cam = &scene.camera;
        let mut out = String::new();
        out.push_str(&format!("=== Frame {} ===\n", self.frames));
        out.push_str(&format!(
            "Camera: pos=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}\n",
            cam.position.x, cam.position.y, cam.position.z, cam.fov, cam.aspect
        ));
        let m = &scene.material;
        out.push_str(&format!(
            "Material: metalness={:.3} roughness={:.3} ao={:.3} displacement={:.4}\n",
            m.metalness, m.roughness, m.ao_map_intensity, m.displacement_scale
        ));
        out.push_str(&format!("Objects: {}\n", scene.objects.len()));

        for object in &scene.objects {
            let p = object.transform.position;
            let r = object.transform.rotation;
            out.push_str(&format!(
                "  [{}] pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3})\n",
                object.name, p.x, p.y, p.z, r.x, r.y, r.z
            ));
        }

        tracing::trace!(frame = self.frames, "debug frame rendered");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_common::ShowroomConfig;

    fn scene() -> SceneSnapshot {
        SceneSnapshot::showcase(&ShowroomConfig::default(), None)
    }

    #[test]
    fn debug_renderer_lists_objects() {
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene());

        assert!(output.contains("Frame 1"));
        assert!(output.contains("Objects: 3"));
        assert!(output.contains("[sphere] pos=(-1.50, 0.00, 0.00)"));
        assert!(output.contains("metalness=0.700"));
    }

    #[test]
    fn debug_renderer_shows_rotation() {
        let mut s = scene();
        s.animate(10.0);
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&s);
        assert!(output.contains("rot=(1.500, 1.000, 0.000)"));
    }

    #[test]
    fn frame_counter_advances() {
        let s = scene();
        let mut renderer = DebugTextRenderer::new();
        renderer.render(&s);
        let output = renderer.render(&s);
        assert_eq!(renderer.frames(), 2);
        assert!(output.contains("Frame 2"));
    }
}
