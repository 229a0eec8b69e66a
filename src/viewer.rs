//! Standalone preview window backed by winit.
//!
//! The window stands in for the landing page: the mouse wheel scrolls a
//! virtual page of configurable height, and the progress bar is shown in the
//! window title.
//!
//! ```no_run
//! # use ares_scene::Viewer;
//! Viewer::builder()
//!     .with_assets_dir("public")
//!     .with_page_height(6000.0)
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{
    cell::RefCell,
    collections::HashSet,
    path::{Path, PathBuf},
    rc::Rc,
    sync::{mpsc, Arc},
};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    asset::{parse_model, AssetError, ModelMesh},
    camera::ScrollMetrics,
    controller::{LoadTicket, SceneController},
    error::SceneError,
    gpu::render_context::RenderContext,
    host::{Host, ListenerKind, Viewport},
    options::SceneOptions,
    render_loop::RenderLoop,
    renderer::MeshRenderer,
    InputEvent,
};

/// Window title; the scroll percentage is appended while running.
const WINDOW_TITLE: &str = "ARES";

/// Pixels scrolled per wheel line.
const LINE_HEIGHT: f32 = 40.0;

/// Default virtual page height in pixels.
pub const DEFAULT_PAGE_HEIGHT: f32 = 6000.0;

// ── Virtual page ─────────────────────────────────────────────────────────

/// Scroll state of the page the window pretends to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualPage {
    height: f32,
    scroll_y: f32,
}

impl VirtualPage {
    /// A page `height` pixels tall, scrolled to the top.
    #[must_use]
    pub fn new(height: f32) -> Self {
        Self {
            height: height.max(0.0),
            scroll_y: 0.0,
        }
    }

    /// Scroll by `delta` pixels (positive is down), staying within the
    /// scrollable range for a viewport `viewport_height` tall.
    pub fn scroll_by(&mut self, delta: f32, viewport_height: f32) {
        let max = (self.height - viewport_height).max(0.0);
        self.scroll_y = (self.scroll_y + delta).clamp(0.0, max);
    }

    /// Current scroll state as the controller sees it.
    #[must_use]
    pub fn metrics(&self, viewport_height: f32) -> ScrollMetrics {
        ScrollMetrics {
            scroll_y: self.scroll_y,
            document_height: self.height,
            viewport_height,
        }
    }
}

// ── Window host ──────────────────────────────────────────────────────────

/// [`Host`] over a winit window. The "container" is the window itself,
/// shown on attach and hidden on detach.
struct WindowHost {
    window: Arc<Window>,
    page: Rc<RefCell<VirtualPage>>,
    listeners: HashSet<ListenerKind>,
    title: String,
}

impl WindowHost {
    fn listens(&self, kind: ListenerKind) -> bool {
        self.listeners.contains(&kind)
    }
}

#[allow(clippy::cast_precision_loss)]
impl Host for WindowHost {
    fn viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport {
            width: size.width,
            height: size.height,
        }
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let height = self.window.inner_size().height as f32;
        self.page.borrow().metrics(height)
    }

    fn attach_surface(&mut self, container_id: &str) -> Result<(), SceneError> {
        log::debug!("showing window for container '{container_id}'");
        self.window.set_visible(true);
        Ok(())
    }

    fn detach_surface(&mut self) {
        self.window.set_visible(false);
    }

    fn add_listener(&mut self, kind: ListenerKind) -> Result<(), SceneError> {
        let _ = self.listeners.insert(kind);
        Ok(())
    }

    fn remove_listener(&mut self, kind: ListenerKind) {
        let _ = self.listeners.remove(&kind);
    }

    fn set_progress(&mut self, _element_id: &str, percent: f32) {
        self.window
            .set_title(&format!("{} - {percent:.0}%", self.title));
    }
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<SceneOptions>,
    assets_dir: PathBuf,
    page_height: f32,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            assets_dir: PathBuf::from("public"),
            page_height: DEFAULT_PAGE_HEIGHT,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: SceneOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Directory the model is read from.
    #[must_use]
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Height of the virtual page in pixels.
    #[must_use]
    pub fn with_page_height(mut self, height: f32) -> Self {
        self.page_height = height;
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            assets_dir: self.assets_dir,
            page_height: self.page_height,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A desktop window that shows the hero scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: SceneOptions,
    assets_dir: PathBuf,
    page_height: f32,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns setup failures and unrecoverable render errors.
    pub fn run(self) -> Result<(), SceneError> {
        let event_loop =
            EventLoop::new().map_err(|e| SceneError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            options: Some(self.options),
            assets_dir: self.assets_dir,
            page: Rc::new(RefCell::new(VirtualPage::new(self.page_height))),
            title: WINDOW_TITLE.into(),
            mounted: None,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| SceneError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

/// Read and parse the model from `assets_dir`.
fn read_model(assets_dir: &Path, url: &str) -> Result<ModelMesh, AssetError> {
    let path = assets_dir.join(url.trim_start_matches('/'));
    let bytes = std::fs::read(&path)
        .map_err(|e| AssetError::Fetch(format!("{}: {e}", path.display())))?;
    parse_model(&bytes)
}

// ── Winit app ────────────────────────────────────────────────────────────

struct Mounted {
    window: Arc<Window>,
    controller: SceneController<MeshRenderer, WindowHost>,
    frame_loop: RenderLoop,
    pending_load: Option<(LoadTicket, mpsc::Receiver<Result<ModelMesh, AssetError>>)>,
    cursor_x: f32,
}

impl Mounted {
    /// Forward `event` if the controller registered a listener for `kind`.
    fn dispatch(&mut self, kind: ListenerKind, event: InputEvent) {
        if self.controller.host().listens(kind) {
            self.controller.handle_event(event);
        }
    }

    /// Deliver the background model read once it has finished.
    fn poll_load(&mut self) {
        let Some((ticket, rx)) = &self.pending_load else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                Err(AssetError::Fetch(format!("{}: loader exited", ticket.url())))
            }
        };
        let _ = self.controller.finish_load(ticket, result);
        self.pending_load = None;
    }
}

struct ViewerApp {
    options: Option<SceneOptions>,
    assets_dir: PathBuf,
    page: Rc<RefCell<VirtualPage>>,
    title: String,
    mounted: Option<Mounted>,
    error: Option<SceneError>,
}

impl ViewerApp {
    fn mount(
        &mut self,
        event_loop: &ActiveEventLoop,
        options: SceneOptions,
    ) -> Result<Mounted, SceneError> {
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_visible(false)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| SceneError::Viewer(e.to_string()))?,
        );

        let inner = window.inner_size();
        let context = pollster::block_on(RenderContext::new(
            window.clone(),
            (inner.width, inner.height),
        ))?;
        let renderer = MeshRenderer::new(context);

        let host = WindowHost {
            window: window.clone(),
            page: Rc::clone(&self.page),
            listeners: HashSet::new(),
            title: self.title.clone(),
        };
        let mut controller = SceneController::initialize(options, host, renderer)?;

        let ticket = controller.begin_load();
        let (tx, rx) = mpsc::channel();
        let assets_dir = self.assets_dir.clone();
        let url = ticket.url().to_owned();
        let _ = std::thread::spawn(move || {
            let _ = tx.send(read_model(&assets_dir, &url));
        });

        let mut frame_loop = RenderLoop::new();
        frame_loop.start();
        window.request_redraw();

        Ok(Mounted {
            window,
            controller,
            frame_loop,
            pending_load: Some((ticket, rx)),
            cursor_x: 0.0,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: SceneError) {
        log::error!("{error}");
        if let Some(mut mounted) = self.mounted.take() {
            mounted.controller.teardown();
        }
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(options) = self.options.take() else {
            return;
        };
        match self.mount(event_loop, options) {
            Ok(mounted) => self.mounted = Some(mounted),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        let Some(mounted) = &mut self.mounted else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                mounted.controller.teardown();
                self.mounted = None;
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                mounted.dispatch(
                    ListenerKind::Resize,
                    InputEvent::Resize {
                        width: size.width,
                        height: size.height,
                    },
                );
            }

            WindowEvent::RedrawRequested => {
                mounted.poll_load();
                match mounted.frame_loop.step(&mut mounted.controller) {
                    Ok(true) => mounted.window.request_redraw(),
                    Ok(false) => {
                        self.mounted = None;
                        event_loop.exit();
                    }
                    Err(e) => self.fail(event_loop, e),
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let x = mounted.cursor_x;
                if state == ElementState::Pressed {
                    mounted.dispatch(ListenerKind::PointerDown, InputEvent::PointerDown { x });
                } else {
                    mounted.dispatch(ListenerKind::PointerUp, InputEvent::PointerUp);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let x = position.x as f32;
                mounted.cursor_x = x;
                mounted.dispatch(ListenerKind::PointerMove, InputEvent::PointerMove { x });
            }

            WindowEvent::CursorLeft { .. } => {
                mounted.dispatch(ListenerKind::PointerLeave, InputEvent::PointerLeave);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let pixels = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                #[allow(clippy::cast_precision_loss)]
                let viewport_height = mounted.window.inner_size().height as f32;
                let metrics = {
                    let mut page = self.page.borrow_mut();
                    page.scroll_by(pixels, viewport_height);
                    page.metrics(viewport_height)
                };
                mounted.dispatch(ListenerKind::Scroll, InputEvent::Scroll(metrics));
            }

            _ => (),
        }
    }
}
