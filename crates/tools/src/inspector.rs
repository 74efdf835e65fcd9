use showroom_scene::SceneSnapshot;
use showroom_viewport::ViewportState;
use std::time::Duration;

/// Read-only queries against the running scene for the debug UI and CLI.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(
        scene: &SceneSnapshot,
        viewport: &ViewportState,
        frames: u64,
        elapsed: Duration,
    ) -> SceneSummary {
        let secs = elapsed.as_secs_f64();
        SceneSummary {
            frames,
            elapsed_secs: secs,
            average_fps: if secs > 0.0 { frames as f64 / secs } else { 0.0 },
            object_count: scene.objects.len(),
            viewport: (viewport.width(), viewport.height()),
            pixel_ratio: viewport.pixel_ratio(),
            camera_distance: scene.camera.position.distance(scene.controls.target),
        }
    }
}

/// Snapshot of runtime statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub frames: u64,
    pub elapsed_secs: f64,
    pub average_fps: f64,
    pub object_count: usize,
    pub viewport: (u32, u32),
    pub pixel_ratio: f64,
    pub camera_distance: f32,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frames={} elapsed={:.2}s fps={:.1} objects={} viewport={}x{}@{} distance={:.2}",
            self.frames,
            self.elapsed_secs,
            self.average_fps,
            self.object_count,
            self.viewport.0,
            self.viewport.1,
            self.pixel_ratio,
            self.camera_distance,
        )
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
    fn summary_at_start() {
        let summary =
            SceneInspector::summary(&scene(), &ViewportState::default(), 0, Duration::ZERO);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.average_fps, 0.0);
        assert_eq!(summary.object_count, 3);
        assert!((summary.camera_distance - 5.0).abs() < 1e-6);
    }

    #[test]
    fn summary_fps() {
        let viewport = ViewportState::observe(1920, 1080, 3.0, 2.0);
        let summary = SceneInspector::summary(&scene(), &viewport, 600, Duration::from_secs(10));
        assert_eq!(summary.average_fps, 60.0);
        assert_eq!(summary.viewport, (1920, 1080));
        assert_eq!(summary.pixel_ratio, 2.0);
    }

    #[test]
    fn summary_display() {
        let summary =
            SceneInspector::summary(&scene(), &ViewportState::default(), 0, Duration::ZERO);
        let s = format!("{summary}");
        assert!(s.contains("frames=0"));
        assert!(s.contains("objects=3"));
    }
}
