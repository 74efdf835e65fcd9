use std::time::{Duration, Instant};

/// Monotonic source of elapsed time since the loop started.
pub trait FrameClock {
    /// Reset elapsed time to zero.
    fn start(&mut self);
    /// Time since `start`. Zero before the clock is started.
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by `Instant`.
#[derive(Debug, Default)]
pub struct SystemClock {
    started: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for SystemClock {
    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn elapsed(&self) -> Duration {
        self.started.map(|t| t.elapsed()).unwrap_or_default()
    }
}

/// Hand-stepped clock for tests and headless simulation.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    elapsed: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
    }

    /// Jump to `to`. Earlier times are ignored so elapsed time never decreases.
    pub fn set(&mut self, to: Duration) {
        self.elapsed = self.elapsed.max(to);
    }
}

impl FrameClock for ManualClock {
    fn start(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_zero_before_start() {
        let clock = SystemClock::new();
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        clock.start();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
    }

    #[test]
    fn manual_clock_advances() {
        let mut clock = ManualClock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(16));
        assert_eq!(clock.elapsed(), Duration::from_millis(32));
    }

    #[test]
    fn manual_clock_never_goes_back() {
        let mut clock = ManualClock::new();
        clock.set(Duration::from_secs(10));
        clock.set(Duration::from_secs(3));
        assert_eq!(clock.elapsed(), Duration::from_secs(10));
    }

    #[test]
    fn start_resets() {
        let mut clock = ManualClock::new();
        clock.advance(Duration::from_secs(1));
        clock.start();
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }
}
