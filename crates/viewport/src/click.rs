use std::time::{Duration, Instant};

/// Turns primary-button presses into double-click gestures.
///
/// Two presses within the interval count as one double click. The detector
/// resets after a hit, so a triple click yields a single gesture.
#[derive(Debug, Clone)]
pub struct DoubleClickDetector {
    interval: Duration,
    last_press: Option<Instant>,
}

impl DoubleClickDetector {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_press: None,
        }
    }

    /// Record a press at `at`. Returns true when it completes a double click.
    pub fn press(&mut self, at: Instant) -> bool {
        match self.last_press {
            Some(prev) if at.saturating_duration_since(prev) <= self.interval => {
                self.last_press = None;
                true
            }
            _ => {
                self.last_press = Some(at);
                false
            }
        }
    }
}

impl Default for DoubleClickDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
