use crate::clock::FrameClock;
use crate::render_loop::{LoopError, RenderLoop};
use crate::schedule::{CancellationToken, FrameScheduler};
use showroom_common::ShowroomConfig;
use showroom_render::Renderer;
use showroom_scene::{SceneSnapshot, TextureHandle};
use showroom_viewport::{DrawingSurface, FullscreenShell, ResizeEvent, ViewportController};

/// Application context: owns the scene, the viewport controller and the
/// render loop. Hosts feed it platform events and frame callbacks.
pub struct Showroom<C, S> {
    scene: SceneSnapshot,
    viewport: ViewportController,
    render_loop: RenderLoop<C, S>,
    token: Option<CancellationToken>,
}

impl<C: FrameClock, S: FrameScheduler> Showroom<C, S> {
    pub fn new(
        config: &ShowroomConfig,
        env_map: Option<TextureHandle>,
        clock: C,
        scheduler: S,
    ) -> Self {
        Self {
            scene: SceneSnapshot::showcase(config, env_map),
            viewport: ViewportController::new(config.pixel_ratio_cap),
            render_loop: RenderLoop::new(clock, scheduler),
            token: None,
        }
    }

    /// Start the render loop. Fails if it is already running.
    pub fn start(&mut self) -> Result<(), LoopError> {
        let token = self.render_loop.start()?;
        self.token = Some(token);
        Ok(())
    }

    pub fn resize<D: DrawingSurface + ?Sized>(&mut self, event: ResizeEvent, surface: &mut D) {
        self.viewport
            .on_resize(event, &mut self.scene.camera, surface);
    }

    pub fn toggle_fullscreen<F: FullscreenShell + ?Sized>(&self, shell: &mut F) {
        self.viewport.on_toggle(shell);
    }

    /// Run one frame callback.
    pub fn frame<R: Renderer>(&mut self, renderer: &mut R) -> Option<R::Output> {
        self.render_loop.tick(&mut self.scene, renderer)
    }

    /// Stop rescheduling. The scene stays alive until the context is dropped.
    pub fn teardown(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
            tracing::info!(frames = self.render_loop.frames(), "render loop stopped");
        }
    }

    pub fn scene(&self) -> &SceneSnapshot {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneSnapshot {
        &mut self.scene
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn render_loop(&self) -> &RenderLoop<C, S> {
        &self.render_loop
    }

    pub fn render_loop_mut(&mut self) -> &mut RenderLoop<C, S> {
        &mut self.render_loop
    }
}

impl<C, S> Drop for Showroom<C, S> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::schedule::ManualScheduler;
    use showroom_render::DebugTextRenderer;
    use std::time::Duration;

    #[derive(Default)]
    struct NullSurface {
        resizes: usize,
    }

    impl DrawingSurface for NullSurface {
        fn set_size(&mut self, _width: u32, _height: u32) {
            self.resizes += 1;
        }

        fn set_pixel_ratio(&mut self, _ratio: f64) {}
    }

    fn showroom() -> Showroom<ManualClock, ManualScheduler> {
        Showroom::new(
            &ShowroomConfig::default(),
            None,
            ManualClock::new(),
            ManualScheduler::new(),
        )
    }

    #[test]
    fn resize_then_frame() {
        let mut app = showroom();
        let mut surface = NullSurface::default();
        app.start().unwrap();
        app.resize(ResizeEvent::new(1920, 1080, 3.0), &mut surface);
        assert_eq!(surface.resizes, 1);
        assert!(app.scene().camera.projection_dirty());

        app.render_loop_mut()
            .clock_mut()
            .advance(Duration::from_secs(10));
        let out = app.frame(&mut DebugTextRenderer::new()).unwrap();
        assert!(out.contains("aspect=1.778"));
        assert!(out.contains("rot=(1.500, 1.000, 0.000)"));
        assert!(!app.scene().camera.projection_dirty());
        assert_eq!(app.viewport().state().pixel_ratio(), 2.0);
    }

    #[test]
    fn teardown_cancels_loop() {
        let mut app = showroom();
        app.start().unwrap();
        let token = app.render_loop().token().clone();
        app.teardown();
        assert!(token.is_cancelled());
        assert!(app.frame(&mut DebugTextRenderer::new()).is_none());
    }

    #[test]
    fn frame_before_start_is_noop() {
        let mut app = showroom();
        assert!(app.frame(&mut DebugTextRenderer::new()).is_none());
    }
}
