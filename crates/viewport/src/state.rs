/// Default upper bound for the pixel ratio. Keeps framebuffers on high-density
/// displays at a manageable resolution.
pub const DEFAULT_PIXEL_RATIO_CAP: f64 = 2.0;

/// A resize observation from the host window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    /// Drawable width in logical pixels.
    pub width: u32,
    /// Drawable height in logical pixels.
    pub height: u32,
    /// Device pixels per logical pixel.
    pub device_pixel_ratio: f64,
}

impl ResizeEvent {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Build from a physical size and the window scale factor.
    pub fn from_physical(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        let scale = sanitize_ratio(scale_factor);
        Self {
            width: (physical_width as f64 / scale).round() as u32,
            height: (physical_height as f64 / scale).round() as u32,
            device_pixel_ratio: scale,
        }
    }
}

/// Current drawable size and pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    width: u32,
    height: u32,
    pixel_ratio: f64,
}

impl ViewportState {
    /// Build a state from raw observations, applying the zero-size and cap rules.
    /// A non-finite or non-positive ratio or cap counts as 1.0.
    pub fn observe(width: u32, height: u32, device_pixel_ratio: f64, cap: f64) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio: sanitize_ratio(device_pixel_ratio).min(sanitize_ratio(cap)),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Framebuffer size after applying the pixel ratio.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f64 * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::observe(1, 1, 1.0, DEFAULT_PIXEL_RATIO_CAP)
    }
}

pub(crate) fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_below_cap_passes_through() {
        let state = ViewportState::observe(800, 600, 1.0, 2.0);
        assert_eq!(state.pixel_ratio(), 1.0);
    }

    #[test]
    fn ratio_above_cap_is_clamped() {
        let state = ViewportState::observe(800, 600, 3.0, 2.0);
        assert_eq!(state.pixel_ratio(), 2.0);
    }

    #[test]
    fn zero_dimensions_become_one() {
        let state = ViewportState::observe(0, 0, 1.0, 2.0);
        assert_eq!((state.width(), state.height()), (1, 1));
        assert!(state.aspect().is_finite());
    }

    #[test]
    fn bogus_ratio_falls_back_to_one() {
        assert_eq!(ViewportState::observe(10, 10, f64::NAN, 2.0).pixel_ratio(), 1.0);
        assert_eq!(ViewportState::observe(10, 10, -2.0, 2.0).pixel_ratio(), 1.0);
    }

    #[test]
    fn bogus_cap_falls_back_to_one() {
        for cap in [0.0, -1.0, f64::NAN, f64::NEG_INFINITY] {
            let state = ViewportState::observe(800, 600, 2.0, cap);
            assert_eq!(state.pixel_ratio(), 1.0, "cap {cap}");
            assert_eq!(state.framebuffer_size(), (800, 600));
        }
        assert_eq!(ViewportState::observe(800, 600, 0.5, 0.0).pixel_ratio(), 0.5);
    }

    #[test]
    fn framebuffer_applies_ratio() {
        let state = ViewportState::observe(1920, 1080, 3.0, 2.0);
        assert_eq!(state.framebuffer_size(), (3840, 2160));
    }

    #[test]
    fn from_physical_divides_scale() {
        let event = ResizeEvent::from_physical(2560, 1440, 2.0);
        assert_eq!(event, ResizeEvent::new(1280, 720, 2.0));
    }
}
