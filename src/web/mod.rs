//! Browser entry point.
//!
//! ```js
//! import init, { start } from "./ares_scene.js";
//! await init();
//! const scene = await start();            // or start(JSON.stringify(options))
//! // ... on unmount
//! scene.teardown();
//! ```

mod host;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

pub use host::{EventQueue, WebHost};

use crate::asset::{parse_model, AssetError, ModelMesh};
use crate::controller::SceneController;
use crate::error::SceneError;
use crate::gpu::render_context::RenderContext;
use crate::options::SceneOptions;
use crate::render_loop::{LoopHandle, RenderLoop};
use crate::renderer::MeshRenderer;

type WebController = SceneController<MeshRenderer, WebHost>;

/// Controller plus its frame loop, shared by the frame callback, the asset
/// fetch and the JS handle.
struct Mounted {
    controller: WebController,
    frame_loop: RenderLoop,
}

type SharedMount = Rc<RefCell<Option<Mounted>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn to_js(e: &SceneError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Handle to a mounted scene.
#[wasm_bindgen]
pub struct SceneHandle {
    mount: SharedMount,
    loop_handle: LoopHandle,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Stop the frame loop, remove listeners and canvas, and free GPU
    /// resources. Safe to call more than once and while the model is still
    /// loading.
    pub fn teardown(&self) {
        self.loop_handle.stop();
        let mounted = self.mount.borrow_mut().take();
        if let Some(mut mounted) = mounted {
            mounted.controller.teardown();
        }
    }

    /// Whether the scene is still mounted.
    #[wasm_bindgen(js_name = isActive)]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mount
            .borrow()
            .as_ref()
            .is_some_and(|m| m.controller.is_active())
    }
}

/// Mount the hero scene into the page.
///
/// `options_json` overrides the defaults; omitted fields keep their default
/// values.
///
/// # Errors
///
/// Rejects if the options do not parse, the container element is missing,
/// no GPU context can be created, or a listener cannot be registered. Nothing
/// is left attached to the page in any of these cases.
#[wasm_bindgen]
pub async fn start(options_json: Option<String>) -> Result<SceneHandle, JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    mount(options_json).await.map_err(|e| {
        log::error!("scene start failed: {e}");
        to_js(&e)
    })
}

async fn mount(options_json: Option<String>) -> Result<SceneHandle, SceneError> {
    let options = match options_json {
        Some(json) => SceneOptions::from_json(&json)?,
        None => SceneOptions::default(),
    };

    let window = web_sys::window().ok_or_else(|| SceneError::Dom("no global window".into()))?;
    let queue: EventQueue = Rc::new(RefCell::new(VecDeque::new()));
    let host = WebHost::new(window, Rc::clone(&queue))?;

    // Fail before touching the GPU when the page lacks the mount point.
    if !host.has_element(&options.page.container_id) {
        return Err(SceneError::ContainerMissing(options.page.container_id));
    }

    let canvas = host.canvas().clone();
    let size = (canvas.width(), canvas.height());
    let context = RenderContext::new(wgpu::SurfaceTarget::Canvas(canvas), size).await?;
    let renderer = MeshRenderer::new(context);

    let mut controller = SceneController::initialize(options, host, renderer)?;
    let ticket = controller.begin_load();

    let mut frame_loop = RenderLoop::new();
    let loop_handle = frame_loop.handle();
    frame_loop.start();

    let mount: SharedMount = Rc::new(RefCell::new(Some(Mounted {
        controller,
        frame_loop,
    })));

    {
        let mount = Rc::clone(&mount);
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_model(ticket.url()).await;
            if let Some(mounted) = mount.borrow_mut().as_mut() {
                let _ = mounted.controller.finish_load(&ticket, result);
            }
        });
    }

    schedule_frames(Rc::clone(&mount), queue, loop_handle.clone());

    Ok(SceneHandle { mount, loop_handle })
}

/// Fetch and parse the model.
async fn fetch_model(url: &str) -> Result<ModelMesh, AssetError> {
    let window = web_sys::window().ok_or_else(|| AssetError::Fetch("no global window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| AssetError::Fetch(format!("{url}: {e:?}")))?
        .dyn_into::<web_sys::Response>()
        .map_err(|_| AssetError::Fetch(format!("{url}: not a response")))?;
    if !response.ok() {
        return Err(AssetError::Fetch(format!("{url}: HTTP {}", response.status())));
    }
    let body = response
        .array_buffer()
        .map_err(|e| AssetError::Fetch(format!("{url}: {e:?}")))?;
    let buffer = JsFuture::from(body)
        .await
        .map_err(|e| AssetError::Fetch(format!("{url}: {e:?}")))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    parse_model(&bytes)
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) {
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

/// Drive the controller from animation frames until the loop stops.
///
/// Each frame drains the queued input events into the controller first,
/// then steps the loop once.
fn schedule_frames(mount: SharedMount, queue: EventQueue, loop_handle: LoopHandle) {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = Rc::clone(&callback);

    *callback.borrow_mut() = Some(Closure::new(move || {
        let outcome = {
            let mut guard = mount.borrow_mut();
            match guard.as_mut() {
                Some(mounted) if loop_handle.is_running() => {
                    let events: Vec<_> = queue.borrow_mut().drain(..).collect();
                    for event in events {
                        mounted.controller.handle_event(event);
                    }
                    let stepped = mounted.frame_loop.step(&mut mounted.controller);
                    if stepped.is_err() {
                        mounted.controller.teardown();
                    }
                    stepped
                }
                _ => Ok(false),
            }
        };

        match outcome {
            Ok(true) => {
                if let Some(cb) = next.borrow().as_ref() {
                    request_animation_frame(cb);
                }
            }
            Ok(false) => {
                let _ = next.borrow_mut().take();
            }
            Err(e) => {
                log::error!("render failed, scene stopped: {e}");
                loop_handle.stop();
                let _ = next.borrow_mut().take();
                wasm_bindgen::throw_str(&e.to_string());
            }
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        request_animation_frame(cb);
    }
}
