//! The scene controller: owns scene, camera, renderer and host bindings for
//! one mounted hero scene.
//!
//! Lifecycle:
//!
//! ```text
//! initialize() ──► Active ──teardown()──► TornDown
//!                    │
//!     begin_load() / finish_load(), handle_event(), tick()
//! ```
//!
//! Every side effect of [`SceneController::initialize`] (surface attached,
//! listeners registered, GPU resources) is recorded on the controller and
//! undone by [`SceneController::teardown`], which also runs on drop.

mod input;
mod loading;
#[cfg(test)]
mod tests;

use glam::Vec3;
pub use loading::{LoadOutcome, LoadTicket};

use crate::camera::{Camera, ScrollRig, ScrollMapping};
use crate::error::SceneError;
use crate::host::{Host, ListenerKind};
use crate::input::DragState;
use crate::options::SceneOptions;
use crate::renderer::Renderer;
use crate::scene::Scene;

/// Controller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Setup in progress; becomes `Active` or is torn down on failure.
    Initializing,
    /// Mounted and reacting to events.
    Active,
    /// Every resource released. Terminal.
    TornDown,
}

/// One mounted hero scene.
pub struct SceneController<R: Renderer, H: Host> {
    options: SceneOptions,
    scene: Scene,
    camera: Camera,
    rig: ScrollRig,
    drag: DragState,
    renderer: R,
    host: H,
    lifecycle: Lifecycle,
    surface_attached: bool,
    listeners: Vec<ListenerKind>,
    /// Bumped by every `begin_load` and by teardown; stale tickets are
    /// discarded.
    load_generation: u64,
    progress_percent: f32,
}

impl<R: Renderer, H: Host> SceneController<R, H> {
    /// Build the scene and bind it to the host.
    ///
    /// On failure nothing is left behind: listeners registered so far are
    /// removed, the surface is detached and the renderer is released before
    /// the error is returned.
    ///
    /// # Errors
    ///
    /// [`SceneError::ContainerMissing`] if the mount container does not
    /// exist, or [`SceneError::Listener`] if the host rejects a listener.
    pub fn initialize(
        options: SceneOptions,
        host: H,
        renderer: R,
    ) -> Result<Self, SceneError> {
        let viewport = host.viewport();
        let scene = Scene::new(&options);
        let focus = scene.wrapper().position();
        let top_eye = Vec3::new(0.0, options.scroll.top_y, options.camera.distance);
        let camera = Camera::new(&options.camera, viewport.aspect(), top_eye, focus);
        let rig = ScrollRig::new(
            ScrollMapping::from_options(&options.scroll),
            top_eye,
            focus,
        );

        let mut controller = Self {
            options,
            scene,
            camera,
            rig,
            drag: DragState::new(),
            renderer,
            host,
            lifecycle: Lifecycle::Initializing,
            surface_attached: false,
            listeners: Vec::with_capacity(ListenerKind::ALL.len()),
            load_generation: 0,
            progress_percent: 0.0,
        };

        if let Err(e) = controller.bind() {
            log::error!("scene setup aborted: {e}");
            controller.teardown();
            return Err(e);
        }

        controller.renderer.resize(viewport.width, viewport.height);
        let metrics = controller.host.scroll_metrics();
        controller.apply_scroll(metrics.fraction());
        controller.lifecycle = Lifecycle::Active;
        log::debug!(
            "scene initialized at {}x{}",
            viewport.width,
            viewport.height
        );
        Ok(controller)
    }

    /// Attach the surface and register listeners, recording each step so a
    /// failure can be unwound.
    fn bind(&mut self) -> Result<(), SceneError> {
        self.host.attach_surface(&self.options.page.container_id)?;
        self.surface_attached = true;
        for kind in ListenerKind::ALL {
            self.host.add_listener(kind)?;
            self.listeners.push(kind);
        }
        Ok(())
    }

    /// Release everything [`initialize`](Self::initialize) acquired.
    ///
    /// Idempotent, and safe while a model load is still in flight: the
    /// outstanding ticket is invalidated so a late result is ignored.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        for kind in self.listeners.drain(..) {
            self.host.remove_listener(kind);
        }
        if self.surface_attached {
            self.host.detach_surface();
            self.surface_attached = false;
        }
        self.renderer.release();
        self.drag.release();
        self.load_generation += 1;
        self.lifecycle = Lifecycle::TornDown;
        log::debug!("scene torn down");
    }

    /// Advance one frame: idle rotation, then draw.
    ///
    /// # Errors
    ///
    /// Propagates unrecoverable renderer failures.
    pub fn tick(&mut self) -> Result<(), SceneError> {
        if !self.is_active() {
            return Ok(());
        }
        let _ = self.advance();
        self.renderer.render(&self.scene, &self.camera)
    }

    /// Idle auto-rotation for one frame. Only applies while the controller
    /// is active, the model is ready and no drag is in progress.
    ///
    /// Returns whether the model turned.
    pub fn advance(&mut self) -> bool {
        if !self.is_active() || self.drag.is_dragging() {
            return false;
        }
        self.scene
            .wrapper_mut()
            .rotate(self.options.interaction.idle_rotation_speed)
    }

    /// Whether the controller is mounted and reacting to events.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current model yaw in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.scene.wrapper().yaw()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Last progress bar width written, in percent.
    #[must_use]
    pub fn progress_percent(&self) -> f32 {
        self.progress_percent
    }

    /// The host binding.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<R: Renderer, H: Host> Drop for SceneController<R, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
