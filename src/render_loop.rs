//! Explicit render loop.
//!
//! The display drives frames (an animation frame callback on the web, redraw
//! requests in the viewer); the loop only decides whether a frame runs. The
//! [`LoopHandle`] is shared with whatever schedules frames so either side
//! can stop it, and tests call [`RenderLoop::step`] directly to advance one
//! frame at a time.

use std::cell::Cell;
use std::rc::Rc;

use crate::controller::SceneController;
use crate::error::SceneError;
use crate::host::Host;
use crate::renderer::Renderer;
use crate::util::frame_timing::FrameTiming;

/// Frames between FPS trace lines.
const FPS_LOG_INTERVAL: u64 = 600;

/// Shared start/stop switch for a [`RenderLoop`].
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl LoopHandle {
    /// Allow frames to run.
    pub fn start(&self) {
        self.running.set(true);
    }

    /// Stop running frames. The scheduler drops its callback on the next
    /// frame it sees stopped.
    pub fn stop(&self) {
        self.running.set(false);
    }

    /// Whether frames currently run.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Frame counter and pacing state for one controller.
pub struct RenderLoop {
    handle: LoopHandle,
    frames: u64,
    timing: FrameTiming,
}

impl RenderLoop {
    /// A stopped loop.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handle: LoopHandle::default(),
            frames: 0,
            timing: FrameTiming::new(),
        }
    }

    /// Clone of the start/stop switch.
    #[must_use]
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Start running frames.
    pub fn start(&mut self) {
        if !self.handle.is_running() {
            self.timing.reset();
        }
        self.handle.start();
    }

    /// Stop running frames.
    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Whether frames currently run.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Frames run so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Smoothed frame rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// Run one frame if the loop is running. A torn-down controller stops
    /// the loop.
    ///
    /// Returns whether a frame ran.
    ///
    /// # Errors
    ///
    /// Propagates renderer failures from [`SceneController::tick`].
    pub fn step<R: Renderer, H: Host>(
        &mut self,
        controller: &mut SceneController<R, H>,
    ) -> Result<bool, SceneError> {
        if !self.handle.is_running() {
            return Ok(false);
        }
        if !controller.is_active() {
            self.handle.stop();
            return Ok(false);
        }

        controller.tick()?;
        self.frames += 1;
        self.timing.end_frame();
        if self.frames % FPS_LOG_INTERVAL == 0 {
            log::trace!("frame {}: {:.1} fps", self.frames, self.timing.fps());
        }
        Ok(true)
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}
