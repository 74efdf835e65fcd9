use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that stops the loop from re-arming itself.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Host primitive that invokes the loop once per display refresh.
pub trait FrameScheduler {
    /// Ask for one more frame callback.
    fn request_frame(&mut self);
}

/// Scheduler that only counts requests. Tests and the headless CLI drain
/// requests by hand to decide when the next frame runs.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: u64,
    total: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one pending request. Returns false if none was outstanding.
    pub fn take(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    pub fn pending(&self) -> u64 {
        self.pending
    }

    /// Requests received over the scheduler's lifetime.
    pub fn total_requests(&self) -> u64 {
        self.total
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending += 1;
        self.total += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_state() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn manual_scheduler_counts() {
        let mut s = ManualScheduler::new();
        assert!(!s.take());
        s.request_frame();
        s.request_frame();
        assert_eq!(s.pending(), 2);
        assert!(s.take());
        assert_eq!(s.pending(), 1);
        assert_eq!(s.total_requests(), 2);
    }
}
