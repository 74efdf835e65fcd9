use crate::clock::FrameClock;
use crate::schedule::{CancellationToken, FrameScheduler};
use showroom_render::Renderer;
use showroom_scene::SceneSnapshot;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    NotStarted,
    Running,
}

#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    #[error("render loop already started")]
    AlreadyStarted,
}

/// Self-rescheduling per-frame unit of work.
///
/// Each tick reads the clock, spins the scene objects, steps the camera
/// controls, draws once and asks the scheduler for the next frame.
#[derive(Debug)]
pub struct RenderLoop<C, S> {
    clock: C,
    scheduler: S,
    state: LoopState,
    token: CancellationToken,
    frames: u64,
    last_elapsed: Duration,
}

impl<C: FrameClock, S: FrameScheduler> RenderLoop<C, S> {
    pub fn new(clock: C, scheduler: S) -> Self {
        Self {
            clock,
            scheduler,
            state: LoopState::NotStarted,
            token: CancellationToken::new(),
            frames: 0,
            last_elapsed: Duration::ZERO,
        }
    }

    /// Start the clock and arm the first frame. Returns the handle that stops
    /// further rescheduling.
    pub fn start(&mut self) -> Result<CancellationToken, LoopError> {
        if self.state != LoopState::NotStarted {
            return Err(LoopError::AlreadyStarted);
        }
        self.state = LoopState::Running;
        self.clock.start();
        self.scheduler.request_frame();
        tracing::info!("render loop started");
        Ok(self.token.clone())
    }

    /// Run one frame. Returns `None` without drawing when the loop is not
    /// running or has been cancelled.
    pub fn tick<R: Renderer>(
        &mut self,
        scene: &mut SceneSnapshot,
        renderer: &mut R,
    ) -> Option<R::Output> {
        if self.state != LoopState::Running || self.token.is_cancelled() {
            return None;
        }
        let _span = tracing::trace_span!("frame", n = self.frames).entered();

        let elapsed = self.clock.elapsed();
        self.last_elapsed = elapsed;
        scene.animate(elapsed.as_secs_f32());
        scene.update_camera();

        let output = renderer.render(scene);
        self.frames += 1;

        self.scheduler.request_frame();
        Some(output)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Elapsed time read by the most recent tick.
    pub fn last_elapsed(&self) -> Duration {
        self.last_elapsed
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
