use crate::state::{DEFAULT_PIXEL_RATIO_CAP, ResizeEvent, ViewportState, sanitize_ratio};
use showroom_scene::PerspectiveCamera;

/// The platform region rendered pixels are written into.
pub trait DrawingSurface {
    /// Resize to the given logical dimensions.
    fn set_size(&mut self, width: u32, height: u32);
    /// Set the framebuffer density relative to the logical size.
    fn set_pixel_ratio(&mut self, ratio: f64);
}

/// Errors a platform shell may report when changing fullscreen state.
#[derive(Debug, thiserror::Error)]
pub enum FullscreenError {
    #[error("fullscreen is not supported on this platform")]
    Unsupported,
    #[error("fullscreen request rejected: {0}")]
    Rejected(String),
}

/// Host shell that can place the drawing surface into fullscreen.
pub trait FullscreenShell {
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<(), FullscreenError>;
    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError>;
}

/// Reacts to resize and toggle input, keeping viewport, camera and surface in step.
#[derive(Debug, Clone)]
pub struct ViewportController {
    state: ViewportState,
    pixel_ratio_cap: f64,
}

impl ViewportController {
    /// A non-finite or non-positive cap is treated as 1.0.
    pub fn new(pixel_ratio_cap: f64) -> Self {
        let pixel_ratio_cap = sanitize_ratio(pixel_ratio_cap);
        Self {
            state: ViewportState::observe(1, 1, 1.0, pixel_ratio_cap),
            pixel_ratio_cap,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn pixel_ratio_cap(&self) -> f64 {
        self.pixel_ratio_cap
    }

    /// Apply a resize: update state, camera aspect (projection marked dirty),
    /// then the drawing surface size and pixel ratio.
    pub fn on_resize<S: DrawingSurface + ?Sized>(
        &mut self,
        event: ResizeEvent,
        camera: &mut PerspectiveCamera,
        surface: &mut S,
    ) {
        if event.width == 0 || event.height == 0 {
            tracing::debug!(
                width = event.width,
                height = event.height,
                "zero-sized viewport clamped to 1"
            );
        }
        self.state = ViewportState::observe(
            event.width,
            event.height,
            event.device_pixel_ratio,
            self.pixel_ratio_cap,
        );

        camera.set_aspect(self.state.aspect());

        surface.set_size(self.state.width(), self.state.height());
        surface.set_pixel_ratio(self.state.pixel_ratio());

        tracing::debug!(
            width = self.state.width(),
            height = self.state.height(),
            pixel_ratio = self.state.pixel_ratio(),
            "viewport resized"
        );
    }

    /// Enter fullscreen when nothing is fullscreen, otherwise leave it.
    /// Failures are logged and otherwise ignored.
    pub fn on_toggle<F: FullscreenShell + ?Sized>(&self, shell: &mut F) {
        let result = if shell.is_fullscreen() {
            shell.exit_fullscreen()
        } else {
            shell.request_fullscreen()
        };
        if let Err(e) = result {
            tracing::debug!("fullscreen toggle ignored: {e}");
        }
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(DEFAULT_PIXEL_RATIO_CAP)
    }
}
