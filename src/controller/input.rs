//! Event dispatch for SceneController

use super::SceneController;
use crate::host::Host;
use crate::input::InputEvent;
use crate::renderer::Renderer;

// ── Unified input handler ──

impl<R: Renderer, H: Host> SceneController<R, H> {
    /// Process a platform-agnostic input event.
    ///
    /// Events after teardown are ignored.
    pub fn handle_event(&mut self, event: InputEvent) {
        if !self.is_active() {
            return;
        }
        match event {
            InputEvent::PointerDown { x } => self.drag.press(x),
            InputEvent::PointerMove { x } => self.dispatch_pointer_move(x),
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                self.drag.release();
            }
            InputEvent::Scroll(metrics) => self.apply_scroll(metrics.fraction()),
            InputEvent::Resize { width, height } => {
                self.dispatch_resize(width, height);
            }
        }
    }

    /// Pointer moved: spin the wrapper by the drag delta while the model is
    /// ready. The anchor only advances when the rotation was applied.
    fn dispatch_pointer_move(&mut self, x: f32) {
        if !self.scene.wrapper().is_ready() {
            return;
        }
        let Some(delta) = self.drag.delta(x) else {
            return;
        };
        let sensitivity = self.options.interaction.drag_sensitivity;
        if self.scene.wrapper_mut().rotate(delta * sensitivity) {
            self.drag.commit(x);
        }
    }

    /// Viewport resized: exact aspect, renderer follows.
    fn dispatch_resize(&mut self, width: u32, height: u32) {
        if self.camera.set_viewport(width, height) {
            self.renderer.resize(width, height);
        }
    }

    /// Move the camera for scroll `fraction` and update the progress bar.
    pub(super) fn apply_scroll(&mut self, fraction: f32) {
        let percent = self.rig.apply(&mut self.camera, fraction);
        self.progress_percent = percent;
        if let Some(id) = self.options.page.progress_id.as_deref() {
            self.host.set_progress(id, percent);
        }
    }
}
