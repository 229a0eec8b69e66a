use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::*;
use crate::asset::{AssetError, ModelMesh};
use crate::camera::ScrollMetrics;
use crate::host::Viewport;
use crate::input::InputEvent;
use crate::scene::ModelState;

// ---------------------------------------------------------------------------
// Recording fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct HostLog {
    container_present: bool,
    attached: bool,
    detach_calls: u32,
    listeners: HashSet<ListenerKind>,
    reject: Option<ListenerKind>,
    progress: Option<(String, f32)>,
    scroll: ScrollMetrics,
    viewport: Option<Viewport>,
}

#[derive(Clone)]
struct FakeHost(Rc<RefCell<HostLog>>);

impl FakeHost {
    fn with_container() -> Self {
        Self(Rc::new(RefCell::new(HostLog {
            container_present: true,
            ..HostLog::default()
        })))
    }

    fn without_container() -> Self {
        Self(Rc::new(RefCell::new(HostLog::default())))
    }
}

impl Host for FakeHost {
    fn viewport(&self) -> Viewport {
        self.0.borrow().viewport.unwrap_or(Viewport {
            width: 1600,
            height: 900,
        })
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.0.borrow().scroll
    }

    fn attach_surface(&mut self, container_id: &str) -> Result<(), SceneError> {
        let mut log = self.0.borrow_mut();
        if !log.container_present {
            return Err(SceneError::ContainerMissing(container_id.into()));
        }
        log.attached = true;
        Ok(())
    }

    fn detach_surface(&mut self) {
        let mut log = self.0.borrow_mut();
        log.attached = false;
        log.detach_calls += 1;
    }

    fn add_listener(&mut self, kind: ListenerKind) -> Result<(), SceneError> {
        let mut log = self.0.borrow_mut();
        if log.reject == Some(kind) {
            return Err(SceneError::Listener(kind.event_name().into()));
        }
        let _ = log.listeners.insert(kind);
        Ok(())
    }

    fn remove_listener(&mut self, kind: ListenerKind) {
        let _ = self.0.borrow_mut().listeners.remove(&kind);
    }

    fn set_progress(&mut self, element_id: &str, percent: f32) {
        self.0.borrow_mut().progress = Some((element_id.into(), percent));
    }
}

#[derive(Default)]
struct RendererLog {
    size: Option<(u32, u32)>,
    renders: u32,
    uploads: u32,
    releases: u32,
}

#[derive(Clone, Default)]
struct FakeRenderer(Rc<RefCell<RendererLog>>);

impl Renderer for FakeRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.0.borrow_mut().size = Some((width, height));
    }

    fn upload_model(&mut self, _mesh: &ModelMesh) {
        self.0.borrow_mut().uploads += 1;
    }

    fn render(&mut self, _scene: &Scene, _camera: &Camera) -> Result<(), SceneError> {
        self.0.borrow_mut().renders += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.0.borrow_mut().releases += 1;
    }
}

type Controller = SceneController<FakeRenderer, FakeHost>;

fn mounted() -> (Controller, FakeHost, FakeRenderer) {
    let host = FakeHost::with_container();
    let renderer = FakeRenderer::default();
    let controller =
        SceneController::initialize(SceneOptions::default(), host.clone(), renderer.clone())
            .unwrap();
    (controller, host, renderer)
}

fn ready() -> (Controller, FakeHost, FakeRenderer) {
    let (mut controller, host, renderer) = mounted();
    let ticket = controller.begin_load();
    assert_eq!(
        controller.finish_load(&ticket, Ok(ModelMesh::default())),
        LoadOutcome::Attached
    );
    (controller, host, renderer)
}

fn scroll_to(fraction: f32) -> InputEvent {
    InputEvent::Scroll(ScrollMetrics {
        scroll_y: fraction * 2000.0,
        document_height: 3000.0,
        viewport_height: 1000.0,
    })
}

// ---------------------------------------------------------------------------
// initialize
// ---------------------------------------------------------------------------

#[test]
fn initialize_mounts_surface_and_registers_every_listener() {
    let (controller, host, renderer) = mounted();
    let log = host.0.borrow();
    assert!(log.attached);
    assert_eq!(log.listeners.len(), ListenerKind::ALL.len());
    assert_eq!(renderer.0.borrow().size, Some((1600, 900)));
    assert_eq!(controller.camera().aspect, 1600.0 / 900.0);
    assert_eq!(controller.lifecycle(), Lifecycle::Active);
}

#[test]
fn initialize_places_camera_at_top_looking_at_wrapper() {
    let (controller, _, _) = mounted();
    let camera = controller.camera();
    assert_eq!(camera.eye, Vec3::new(0.0, 300.0, 500.0));
    assert_eq!(camera.target, Vec3::new(0.0, -300.0, 0.0));
    assert_eq!(camera.fovy, 75.0);
    assert_eq!(camera.zfar, 10_000.0);
}

#[test]
fn initialize_syncs_with_restored_scroll_position() {
    let host = FakeHost::with_container();
    host.0.borrow_mut().scroll = ScrollMetrics {
        scroll_y: 2000.0,
        document_height: 3000.0,
        viewport_height: 1000.0,
    };
    let controller =
        SceneController::initialize(SceneOptions::default(), host, FakeRenderer::default())
            .unwrap();
    assert!((controller.camera().eye.y + 6500.0).abs() < 1e-3);
    assert_eq!(controller.progress_percent(), 100.0);
}

#[test]
fn zero_width_viewport_still_yields_finite_projection() {
    let host = FakeHost::with_container();
    host.0.borrow_mut().viewport = Some(Viewport {
        width: 0,
        height: 900,
    });
    let controller =
        SceneController::initialize(SceneOptions::default(), host, FakeRenderer::default())
            .unwrap();
    assert_eq!(controller.camera().aspect, 1.0);
    assert!(controller.camera().build_matrix().is_finite());
}

#[test]
fn missing_container_aborts_without_side_effects() {
    let host = FakeHost::without_container();
    let renderer = FakeRenderer::default();
    let result =
        SceneController::initialize(SceneOptions::default(), host.clone(), renderer.clone());

    assert!(matches!(result, Err(SceneError::ContainerMissing(ref id)) if id == "three-container"));
    let log = host.0.borrow();
    assert!(!log.attached);
    assert_eq!(log.detach_calls, 0);
    assert!(log.listeners.is_empty());
    assert_eq!(renderer.0.borrow().releases, 1);
}

#[test]
fn rejected_listener_unwinds_partial_setup() {
    let host = FakeHost::with_container();
    host.0.borrow_mut().reject = Some(ListenerKind::PointerMove);
    let renderer = FakeRenderer::default();
    let result =
        SceneController::initialize(SceneOptions::default(), host.clone(), renderer.clone());

    assert!(matches!(result, Err(SceneError::Listener(_))));
    let log = host.0.borrow();
    assert!(!log.attached);
    assert!(log.listeners.is_empty());
    assert_eq!(renderer.0.borrow().releases, 1);
}

// ---------------------------------------------------------------------------
// loading
// ---------------------------------------------------------------------------

#[test]
fn load_moves_wrapper_through_loading_to_ready() {
    let (mut controller, _, renderer) = mounted();
    assert_eq!(controller.scene().wrapper().state(), ModelState::Unloaded);

    let ticket = controller.begin_load();
    assert_eq!(ticket.url(), "/Lemaire.glb");
    assert_eq!(controller.scene().wrapper().state(), ModelState::Loading);

    let outcome = controller.finish_load(&ticket, Ok(ModelMesh::default()));
    assert_eq!(outcome, LoadOutcome::Attached);
    assert_eq!(controller.scene().wrapper().state(), ModelState::Ready);
    assert_eq!(renderer.0.borrow().uploads, 1);
    let local = controller.scene().wrapper().model().unwrap().local;
    assert_eq!(local.translation, Vec3::new(0.0, -5000.0, 0.0));
}

#[test]
fn failed_load_leaves_scene_rendering_without_model() {
    let (mut controller, _, renderer) = mounted();
    let ticket = controller.begin_load();
    let outcome =
        controller.finish_load(&ticket, Err(AssetError::Fetch("404 Not Found".into())));

    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(controller.scene().wrapper().state(), ModelState::Failed);
    assert!(controller.scene().wrapper().model().is_none());
    controller.tick().unwrap();
    assert_eq!(renderer.0.borrow().renders, 1);
    assert_eq!(controller.yaw(), 0.0);
}

#[test]
fn load_completing_after_teardown_is_discarded() {
    let (mut controller, _, renderer) = mounted();
    let ticket = controller.begin_load();
    controller.teardown();

    let outcome = controller.finish_load(&ticket, Ok(ModelMesh::default()));
    assert_eq!(outcome, LoadOutcome::Discarded);
    assert!(controller.scene().wrapper().model().is_none());
    assert_eq!(renderer.0.borrow().uploads, 0);
}

#[test]
fn superseded_load_is_discarded() {
    let (mut controller, _, _) = mounted();
    let first = controller.begin_load();
    let second = controller.begin_load();

    assert_eq!(
        controller.finish_load(&first, Ok(ModelMesh::default())),
        LoadOutcome::Discarded
    );
    assert_eq!(
        controller.finish_load(&second, Ok(ModelMesh::default())),
        LoadOutcome::Attached
    );
}

#[test]
fn base_path_is_applied_to_ticket_url() {
    let mut options = SceneOptions::default();
    options.model.base_path = "/ares/".into();
    let mut controller =
        SceneController::initialize(options, FakeHost::with_container(), FakeRenderer::default())
            .unwrap();
    assert_eq!(controller.begin_load().url(), "/ares/Lemaire.glb");
}

// ---------------------------------------------------------------------------
// drag and idle rotation
// ---------------------------------------------------------------------------

#[test]
fn drag_of_hundred_pixels_turns_half_a_radian() {
    let (mut controller, _, _) = ready();
    controller.handle_event(InputEvent::PointerDown { x: 200.0 });
    controller.handle_event(InputEvent::PointerMove { x: 300.0 });
    assert!((controller.yaw() - 0.5).abs() < 1e-6);
}

#[test]
fn drag_deltas_are_additive() {
    let (mut split, _, _) = ready();
    split.handle_event(InputEvent::PointerDown { x: 0.0 });
    split.handle_event(InputEvent::PointerMove { x: 40.0 });
    split.handle_event(InputEvent::PointerMove { x: -25.0 });

    let (mut single, _, _) = ready();
    single.handle_event(InputEvent::PointerDown { x: 0.0 });
    single.handle_event(InputEvent::PointerMove { x: -25.0 });

    assert!((split.yaw() - single.yaw()).abs() < 1e-6);
    assert!((single.yaw() + 0.125).abs() < 1e-6);
}

#[test]
fn drag_is_inert_before_model_is_ready() {
    let (mut controller, _, _) = mounted();
    let _ = controller.begin_load();
    controller.handle_event(InputEvent::PointerDown { x: 0.0 });
    controller.handle_event(InputEvent::PointerMove { x: 100.0 });
    assert_eq!(controller.yaw(), 0.0);
    assert!(controller.is_dragging());
}

#[test]
fn pointer_up_and_leave_end_the_drag() {
    let (mut controller, _, _) = ready();
    controller.handle_event(InputEvent::PointerDown { x: 0.0 });
    controller.handle_event(InputEvent::PointerUp);
    assert!(!controller.is_dragging());

    controller.handle_event(InputEvent::PointerDown { x: 0.0 });
    controller.handle_event(InputEvent::PointerLeave);
    assert!(!controller.is_dragging());

    let before = controller.yaw();
    controller.handle_event(InputEvent::PointerMove { x: 500.0 });
    assert_eq!(controller.yaw(), before);
}

#[test]
fn idle_rotation_applies_each_tick_when_ready() {
    let (mut controller, _, renderer) = ready();
    controller.tick().unwrap();
    controller.tick().unwrap();
    assert!((controller.yaw() - 0.004).abs() < 1e-7);
    assert_eq!(renderer.0.borrow().renders, 2);
}

#[test]
fn idle_rotation_pauses_while_dragging() {
    let (mut controller, _, _) = ready();
    controller.handle_event(InputEvent::PointerDown { x: 10.0 });
    controller.tick().unwrap();
    assert_eq!(controller.yaw(), 0.0);

    controller.handle_event(InputEvent::PointerUp);
    controller.tick().unwrap();
    assert!((controller.yaw() - 0.002).abs() < 1e-7);
}

#[test]
fn idle_rotation_waits_for_load() {
    let (mut controller, _, _) = mounted();
    let _ = controller.begin_load();
    for _ in 0..5 {
        controller.tick().unwrap();
    }
    assert_eq!(controller.yaw(), 0.0);
}

// ---------------------------------------------------------------------------
// scroll and resize
// ---------------------------------------------------------------------------

#[test]
fn half_scroll_moves_camera_a_quarter_of_the_way() {
    let (mut controller, host, _) = mounted();
    controller.handle_event(scroll_to(0.5));

    let expected = 300.0 + (-6500.0 - 300.0) * 0.25;
    assert!((controller.camera().eye.y - expected).abs() < 1e-3);
    let progress = host.0.borrow().progress.clone().unwrap();
    assert_eq!(progress.0, "scroll-progress");
    assert!((progress.1 - 25.0).abs() < 1e-4);
}

#[test]
fn scroll_never_tilts_the_camera() {
    let (mut controller, _, _) = mounted();
    let forward = controller.camera().forward();
    for f in [0.1, 0.6, 1.0, 0.0] {
        controller.handle_event(scroll_to(f));
        assert!((controller.camera().forward() - forward).length() < 1e-5);
        assert_eq!(controller.camera().eye.z, 500.0);
    }
}

#[test]
fn missing_progress_element_is_tolerated() {
    let mut options = SceneOptions::default();
    options.page.progress_id = None;
    let host = FakeHost::with_container();
    let mut controller =
        SceneController::initialize(options, host.clone(), FakeRenderer::default()).unwrap();
    controller.handle_event(scroll_to(1.0));
    assert!(host.0.borrow().progress.is_none());
    assert_eq!(controller.progress_percent(), 100.0);
}

#[test]
fn resize_sets_exact_aspect_and_renderer_size() {
    let (mut controller, _, renderer) = mounted();
    controller.handle_event(InputEvent::Resize {
        width: 1023,
        height: 767,
    });
    assert_eq!(controller.camera().aspect, 1023.0 / 767.0);
    assert_eq!(renderer.0.borrow().size, Some((1023, 767)));
}

#[test]
fn zero_height_resize_is_ignored() {
    let (mut controller, _, renderer) = mounted();
    controller.handle_event(InputEvent::Resize {
        width: 800,
        height: 0,
    });
    assert_eq!(controller.camera().aspect, 1600.0 / 900.0);
    assert_eq!(renderer.0.borrow().size, Some((1600, 900)));
}

// ---------------------------------------------------------------------------
// teardown
// ---------------------------------------------------------------------------

#[test]
fn teardown_is_idempotent_and_leak_free() {
    let (mut controller, host, renderer) = mounted();
    controller.teardown();
    controller.teardown();

    let log = host.0.borrow();
    assert!(log.listeners.is_empty());
    assert!(!log.attached);
    assert_eq!(log.detach_calls, 1);
    assert_eq!(renderer.0.borrow().releases, 1);
    assert_eq!(controller.lifecycle(), Lifecycle::TornDown);
}

#[test]
fn teardown_before_load_completion_is_safe() {
    let (mut controller, host, renderer) = mounted();
    let _ticket = controller.begin_load();
    controller.teardown();
    assert!(host.0.borrow().listeners.is_empty());
    assert_eq!(renderer.0.borrow().releases, 1);
}

#[test]
fn drop_tears_down() {
    let (controller, host, renderer) = ready();
    drop(controller);
    assert!(host.0.borrow().listeners.is_empty());
    assert!(!host.0.borrow().attached);
    assert_eq!(renderer.0.borrow().releases, 1);
}

#[test]
fn torn_down_controller_ignores_events_and_ticks() {
    let (mut controller, _, renderer) = ready();
    controller.teardown();
    controller.handle_event(InputEvent::PointerDown { x: 0.0 });
    controller.handle_event(InputEvent::PointerMove { x: 100.0 });
    controller.tick().unwrap();
    assert_eq!(controller.yaw(), 0.0);
    assert_eq!(renderer.0.borrow().renders, 0);
}

#[test]
fn advance_after_teardown_leaves_model_still() {
    let (mut controller, _, _) = ready();
    controller.teardown();
    assert!(!controller.advance());
    assert!(!controller.advance());
    assert_eq!(controller.yaw(), 0.0);
}

#[test]
fn advance_turns_a_ready_model_by_the_idle_speed() {
    let (mut controller, _, _) = ready();
    assert!(controller.advance());
    assert!((controller.yaw() - 0.002).abs() < 1e-7);
}
