//! Web bindings.
//!
//! `init_scene` mounts a full-viewport canvas into a DOM container, builds
//! the wgpu context and scene, wires window `mousemove` and `resize`
//! listeners, and drives the scene from a `requestAnimationFrame` loop.
//! The returned [`SceneHandle`] tears all of it down on `dispose`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlCanvasElement, MouseEvent, Window};

use crate::core::{Context, RenderConfig};
use crate::scene::{Scene, SceneConfig, SceneMode};

const LOGO_WHITE_URL: &str = "/assets/fest-logo-white.png";
const LOGO_COLOR_URL: &str = "/assets/fest-logo.png";
const HEADING_URL: &str = "/assets/heading.png";
const HEADING_SUBTEXT_URL: &str = "/assets/heading-subtext.png";

type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct Active {
    scene: Rc<RefCell<Scene>>,
    raf_id: Rc<Cell<Option<i32>>>,
    raf_closure: RafClosure,
    mousemove: Closure<dyn FnMut(MouseEvent)>,
    resize: Closure<dyn FnMut()>,
    canvas: HtmlCanvasElement,
    container: Element,
}

/// Handle to a mounted scene. Dropping it without calling `dispose` leaks
/// the animation loop, so the embedding page should always dispose on
/// unmount.
#[wasm_bindgen]
pub struct SceneHandle {
    active: Option<Active>,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Whether this handle drives a live scene.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Tear the scene down: cancel the frame loop, remove both window
    /// listeners, release the GPU resources and detach the canvas.
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };

        if let Some(id) = active.raf_id.take() {
            let _ = window.cancel_animation_frame(id);
        }
        // The frame closure holds the only other scene reference; dropping
        // it here breaks the Rc cycle and releases the GPU resources.
        active.raf_closure.borrow_mut().take();

        let _ = window.remove_event_listener_with_callback(
            "mousemove",
            active.mousemove.as_ref().unchecked_ref(),
        );
        let _ = window
            .remove_event_listener_with_callback("resize", active.resize.as_ref().unchecked_ref());

        let _ = active.container.remove_child(&active.canvas);
        drop(active.scene);
    }
}

/// Mount the scene into `container` and start animating.
///
/// A missing container returns an inert handle instead of throwing, so
/// pages without the decorative layer can call this unconditionally.
#[wasm_bindgen]
pub async fn init_scene(container: Option<Element>, mode: &str) -> Result<SceneHandle, JsValue> {
    let Some(container) = container else {
        log::warn!("init_scene called without a container; nothing mounted");
        return Ok(SceneHandle { active: None });
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window object"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("created element is not a canvas"))?;
    let (width, height) = viewport_size(&window);
    canvas.set_width(width);
    canvas.set_height(height);
    let style = canvas.style();
    let _ = style.set_property("width", "100%");
    let _ = style.set_property("height", "100%");
    let _ = style.set_property("display", "block");
    container.append_child(&canvas)?;

    let ctx = Context::new(canvas.clone(), width, height, &RenderConfig::default())
        .await
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let mode = SceneMode::parse(mode);
    let scene = Rc::new(RefCell::new(Scene::new(
        ctx,
        mode,
        SceneConfig::default(),
        rand::random(),
    )));

    let mousemove = {
        let scene = scene.clone();
        let window = window.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let w = inner_dimension(window.inner_width());
            let h = inner_dimension(window.inner_height());
            let x = event.client_x() as f32 / w * 2.0 - 1.0;
            let y = -(event.client_y() as f32 / h * 2.0 - 1.0);
            scene.borrow_mut().set_pointer(x, y);
        })
    };
    window.add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;

    let resize = {
        let scene = scene.clone();
        let window = window.clone();
        let canvas = canvas.clone();
        Closure::<dyn FnMut()>::new(move || {
            let (width, height) = viewport_size(&window);
            canvas.set_width(width);
            canvas.set_height(height);
            scene.borrow_mut().resize(width, height);
        })
    };
    window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

    let raf_id = Rc::new(Cell::new(None));
    let raf_closure = start_frame_loop(&window, scene.clone(), raf_id.clone());

    if mode == SceneMode::Sponsors {
        spawn_asset_loads(scene.clone(), window.clone());
    }

    Ok(SceneHandle {
        active: Some(Active {
            scene,
            raf_id,
            raf_closure,
            mousemove,
            resize,
            canvas,
            container,
        }),
    })
}

/// One update + one render per animation frame, rescheduling itself until
/// cancelled. A lost or outdated surface reconfigures to the current
/// viewport; out-of-memory stops the loop.
fn start_frame_loop(window: &Window, scene: Rc<RefCell<Scene>>, raf_id: Rc<Cell<Option<i32>>>) -> RafClosure {
    let closure_cell: RafClosure = Rc::new(RefCell::new(None));
    let cell = closure_cell.clone();
    let raf = raf_id.clone();
    let window = window.clone();

    *closure_cell.borrow_mut() = Some(Closure::new(move || {
        {
            let mut scene = scene.borrow_mut();
            let dt = scene.tick();
            scene.update(dt);
            match scene.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (width, height) = viewport_size(&window);
                    scene.resize(width, height);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory, stopping the frame loop");
                    raf.set(None);
                    return;
                }
                Err(err) => log::warn!("surface error: {err:?}"),
            }
        }

        if let Some(closure) = cell.borrow().as_ref() {
            raf.set(request_frame(&window, closure));
        }
    }));

    if let Some(window) = web_sys::window() {
        if let Some(closure) = closure_cell.borrow().as_ref() {
            raf_id.set(request_frame(&window, closure));
        }
    }

    closure_cell
}

/// Fetch the sponsor page's images in the background and hand the bytes to
/// the scene. Any failure leaves the white placeholder in place.
fn spawn_asset_loads(scene: Rc<RefCell<Scene>>, window: Window) {
    spawn_local(async move {
        let white = fetch_bytes(&window, LOGO_WHITE_URL).await;
        let color = fetch_bytes(&window, LOGO_COLOR_URL).await;
        let heading = fetch_bytes(&window, HEADING_URL).await;
        let subtext = fetch_bytes(&window, HEADING_SUBTEXT_URL).await;

        let mut scene = scene.borrow_mut();
        if let Some(bytes) = &heading {
            scene.set_heading_image(bytes);
        }
        if let Some(bytes) = &subtext {
            scene.set_heading_subtext_image(bytes);
        }
        if let Some(bytes) = &color {
            scene.set_logo_image(bytes);
        }
        if white.is_some() || color.is_some() {
            for index in 0..scene.sponsor_count() {
                scene.set_sponsor_images(index, white.as_deref(), color.as_deref());
            }
        }
    });
}

async fn fetch_bytes(window: &Window, url: &str) -> Option<Vec<u8>> {
    match try_fetch(window, url).await {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            log::warn!("asset fetch failed for {url}: {err:?}");
            None
        }
    }
}

async fn try_fetch(window: &Window, url: &str) -> Result<Vec<u8>, JsValue> {
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn request_frame(window: &Window, closure: &Closure<dyn FnMut()>) -> Option<i32> {
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

/// Viewport size in physical pixels, with the device pixel ratio capped at
/// 2 to keep fill rate sane on dense displays.
fn viewport_size(window: &Window) -> (u32, u32) {
    let dpr = window.device_pixel_ratio().min(2.0);
    let width = inner_dimension(window.inner_width()) as f64 * dpr;
    let height = inner_dimension(window.inner_height()) as f64 * dpr;
    ((width as u32).max(1), (height as u32).max(1))
}

fn inner_dimension(value: Result<JsValue, JsValue>) -> f32 {
    value
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
        .filter(|v| *v > 0.0)
        .unwrap_or(1.0)
}
