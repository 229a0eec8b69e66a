//! Browser implementation of [`Host`].
//!
//! Listener closures never touch the controller. They translate DOM events
//! into [`InputEvent`]s and push them onto a shared queue that the frame
//! callback drains, so the controller is only ever borrowed from one place.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, Node, Window,
};

use crate::camera::ScrollMetrics;
use crate::error::SceneError;
use crate::host::{Host, ListenerKind, ListenerTarget, Viewport};
use crate::input::InputEvent;

/// Events waiting for the next frame.
pub type EventQueue = Rc<RefCell<VecDeque<InputEvent>>>;

type Listener = Closure<dyn FnMut(Event)>;

/// Inline style of the scene canvas: a transparent full-viewport layer
/// behind the page content that still receives pointer events.
const CANVAS_STYLE: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("pointer-events", "auto"),
    ("z-index", "0"),
];

/// The page document as seen by the scene.
pub struct WebHost {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    container: Option<Element>,
    listeners: HashMap<ListenerKind, Listener>,
    queue: EventQueue,
}

impl WebHost {
    /// Create the scene canvas, styled and sized to the viewport but not yet
    /// in the page.
    ///
    /// # Errors
    ///
    /// [`SceneError::Dom`] if the page has no document or the canvas cannot
    /// be created.
    pub fn new(window: Window, queue: EventQueue) -> Result<Self, SceneError> {
        let document = window
            .document()
            .ok_or_else(|| SceneError::Dom("window has no document".into()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|e| SceneError::Dom(format!("create canvas: {e:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SceneError::Dom("created element is not a canvas".into()))?;

        let style = canvas.style();
        for (property, value) in CANVAS_STYLE {
            style
                .set_property(property, value)
                .map_err(|e| SceneError::Dom(format!("canvas style {property}: {e:?}")))?;
        }
        style
            .set_property("background", "transparent")
            .map_err(|e| SceneError::Dom(format!("canvas style background: {e:?}")))?;

        let viewport = window_viewport(&window);
        canvas.set_width(viewport.width.max(1));
        canvas.set_height(viewport.height.max(1));

        Ok(Self {
            window,
            document,
            canvas,
            container: None,
            listeners: HashMap::new(),
            queue,
        })
    }

    /// The scene canvas.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Whether an element with `id` exists in the document.
    #[must_use]
    pub fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn target(&self, kind: ListenerKind) -> &EventTarget {
        match kind.target() {
            ListenerTarget::Window => self.window.as_ref(),
            ListenerTarget::Surface => self.canvas.as_ref(),
        }
    }

    /// Build the closure that turns DOM events of `kind` into queued
    /// [`InputEvent`]s.
    fn listener(&self, kind: ListenerKind) -> Listener {
        let queue = Rc::clone(&self.queue);
        match kind {
            ListenerKind::Resize => {
                let window = self.window.clone();
                let canvas = self.canvas.clone();
                Closure::new(move |_: Event| {
                    let Viewport { width, height } = window_viewport(&window);
                    if width > 0 && height > 0 {
                        canvas.set_width(width);
                        canvas.set_height(height);
                    }
                    queue.borrow_mut().push_back(InputEvent::Resize { width, height });
                })
            }
            ListenerKind::Scroll => {
                let window = self.window.clone();
                Closure::new(move |_: Event| {
                    let metrics = window_scroll_metrics(&window);
                    queue.borrow_mut().push_back(InputEvent::Scroll(metrics));
                })
            }
            ListenerKind::PointerDown => pointer_listener(queue, |x| InputEvent::PointerDown { x }),
            ListenerKind::PointerMove => pointer_listener(queue, |x| InputEvent::PointerMove { x }),
            ListenerKind::PointerUp => Closure::new(move |_: Event| {
                queue.borrow_mut().push_back(InputEvent::PointerUp);
            }),
            ListenerKind::PointerLeave => Closure::new(move |_: Event| {
                queue.borrow_mut().push_back(InputEvent::PointerLeave);
            }),
        }
    }
}

fn pointer_listener(queue: EventQueue, make: fn(f32) -> InputEvent) -> Listener {
    Closure::new(move |event: Event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            #[allow(clippy::cast_precision_loss)]
            let x = mouse.client_x() as f32;
            queue.borrow_mut().push_back(make(x));
        }
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn window_viewport(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    Viewport {
        width: dimension(window.inner_width()),
        height: dimension(window.inner_height()),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn window_scroll_metrics(window: &Window) -> ScrollMetrics {
    let document_height = window
        .document()
        .and_then(|d| d.body())
        .map_or(0, |body| body.scroll_height());
    ScrollMetrics {
        scroll_y: window.scroll_y().unwrap_or(0.0) as f32,
        document_height: document_height as f32,
        viewport_height: window_viewport(window).height as f32,
    }
}

impl Host for WebHost {
    fn viewport(&self) -> Viewport {
        window_viewport(&self.window)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        window_scroll_metrics(&self.window)
    }

    fn attach_surface(&mut self, container_id: &str) -> Result<(), SceneError> {
        let container = self
            .document
            .get_element_by_id(container_id)
            .ok_or_else(|| SceneError::ContainerMissing(container_id.to_owned()))?;
        container
            .append_child(&self.canvas)
            .map_err(|e| SceneError::Dom(format!("append canvas: {e:?}")))?;
        self.container = Some(container);
        Ok(())
    }

    fn detach_surface(&mut self) {
        let Some(container) = self.container.take() else {
            return;
        };
        let container_node: &Node = &container;
        let still_attached = self
            .canvas
            .parent_node()
            .is_some_and(|parent| parent.is_same_node(Some(container_node)));
        if still_attached {
            let _ = container.remove_child(&self.canvas);
        }
    }

    fn add_listener(&mut self, kind: ListenerKind) -> Result<(), SceneError> {
        let closure = self.listener(kind);
        self.target(kind)
            .add_event_listener_with_callback(kind.event_name(), closure.as_ref().unchecked_ref())
            .map_err(|e| SceneError::Listener(format!("{}: {e:?}", kind.event_name())))?;
        let _ = self.listeners.insert(kind, closure);
        Ok(())
    }

    fn remove_listener(&mut self, kind: ListenerKind) {
        if let Some(closure) = self.listeners.remove(&kind) {
            let _ = self
                .target(kind)
                .remove_event_listener_with_callback(kind.event_name(), closure.as_ref().unchecked_ref());
        }
    }

    fn set_progress(&mut self, element_id: &str, percent: f32) {
        let Some(bar) = self
            .document
            .get_element_by_id(element_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let _ = bar.style().set_property("width", &format!("{percent}%"));
    }
}
