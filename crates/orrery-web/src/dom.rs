//! Browser page wiring: canvas, speed slider, event listeners and the
//! requestAnimationFrame loop.

use std::cell::RefCell;
use std::rc::Rc;

use orrery_engine::{
    App, AssetManifest, InputEvent, PointerButton, SliderSpec, TextureRegistry,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlInputElement, PointerEvent,
    WheelEvent, Window,
};

use crate::error::{WebError, WebResult};
use crate::runner::AppRunner;
use crate::webgl::WebGlRenderer;

/// Entry points back into the runner, which lives in the app's
/// `thread_local!` storage and cannot be captured by the closures directly.
#[derive(Clone, Copy)]
pub struct Hooks {
    pub input: fn(InputEvent),
    pub resize: fn(u32, u32),
    pub set_speed: fn(f32) -> f32,
    /// Runs one frame; false ends the loop.
    pub frame: fn() -> bool,
}

pub fn window() -> WebResult<Window> {
    web_sys::window().ok_or(WebError::NoWindow)
}

fn document(window: &Window) -> WebResult<Document> {
    window.document().ok_or(WebError::NoWindow)
}

fn body(document: &Document) -> WebResult<HtmlElement> {
    document.body().ok_or(WebError::NoBody)
}

/// Create an element and cast it to its concrete type.
fn create<T: JsCast>(document: &Document, tag: &str) -> WebResult<T> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| WebError::Js(format!("<{tag}> has an unexpected type")))
}

/// Inner window size in CSS pixels.
pub fn window_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Build the page and the runner: full-window canvas, WebGL2 backend,
/// initialized scene. Listeners are attached separately by `attach`.
pub fn mount<A: App>(
    app: A,
    manifest_json: &str,
) -> WebResult<(AppRunner<A, WebGlRenderer>, HtmlCanvasElement)> {
    let manifest = AssetManifest::from_json(manifest_json)?;
    let textures = TextureRegistry::from_manifest(&manifest);
    log::info!("asset manifest: {} images", manifest.image_count());

    let window = window()?;
    let document = document(&window)?;
    let body = body(&document)?;
    body.style().set_property("margin", "0")?;
    body.style().set_property("overflow", "hidden")?;

    let canvas = create::<HtmlCanvasElement>(&document, "canvas")?;
    canvas.style().set_property("display", "block")?;
    body.append_child(&canvas)?;

    let (width, height) = window_size(&window);
    let renderer = WebGlRenderer::new(canvas.clone(), &textures)?;
    let mut runner = AppRunner::new(app, renderer, textures);
    runner.resize(width, height);
    runner.init();
    Ok((runner, canvas))
}

/// Add an event listener that stays alive for the lifetime of the page.
pub fn listen<E>(target: &EventTarget, name: &str, handler: impl FnMut(E) + 'static) -> WebResult<()>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn pointer_position(event: &PointerEvent) -> (f32, f32) {
    (event.offset_x() as f32, event.offset_y() as f32)
}

/// Document of the global window.
pub fn page() -> WebResult<Document> {
    document(&window()?)
}

/// Build the speed slider in the top-right corner.
pub fn create_slider(document: &Document, spec: &SliderSpec, hooks: Hooks) -> WebResult<HtmlInputElement> {
    let panel = create::<HtmlElement>(document, "div")?;
    let style = panel.style();
    style.set_property("position", "absolute")?;
    style.set_property("top", "12px")?;
    style.set_property("right", "12px")?;
    style.set_property("padding", "6px 10px")?;
    style.set_property("color", "#fff")?;
    style.set_property("background", "rgba(0, 0, 0, 0.5)")?;
    style.set_property("font", "14px sans-serif")?;

    let label = document.create_element("label")?;
    label.set_text_content(Some(&format!("{} ", spec.name)));

    let input = create::<HtmlInputElement>(document, "input")?;
    input.set_type("range");
    input.set_min(&spec.min.to_string());
    input.set_max(&spec.max.to_string());
    input.set_step(&spec.step.to_string());
    input.set_value(&spec.value.to_string());

    let source = input.clone();
    listen(&input, "input", move |_: Event| {
        let speed = (hooks.set_speed)(source.value_as_number() as f32);
        log::debug!("speed = {}", speed);
    })?;

    label.append_child(&input)?;
    panel.append_child(&label)?;
    body(document)?.append_child(&panel)?;
    Ok(input)
}

/// Wire pointer, wheel and resize events into the runner.
pub fn attach(canvas: &HtmlCanvasElement, hooks: Hooks) -> WebResult<()> {
    let window = window()?;

    let capture = canvas.clone();
    listen(canvas, "pointerdown", move |e: PointerEvent| {
        if let Err(err) = capture.set_pointer_capture(e.pointer_id()) {
            log::debug!("pointer capture failed: {:?}", err);
        }
        let (x, y) = pointer_position(&e);
        (hooks.input)(InputEvent::PointerDown { x, y, button: PointerButton::from_code(e.button()) });
    })?;
    listen(canvas, "pointermove", move |e: PointerEvent| {
        let (x, y) = pointer_position(&e);
        (hooks.input)(InputEvent::PointerMove { x, y });
    })?;
    listen(canvas, "pointerup", move |e: PointerEvent| {
        let (x, y) = pointer_position(&e);
        (hooks.input)(InputEvent::PointerUp { x, y });
    })?;
    listen(canvas, "wheel", move |e: WheelEvent| {
        e.prevent_default();
        (hooks.input)(InputEvent::Wheel { delta_y: e.delta_y() as f32 });
    })?;
    // Right drag pans; keep the browser menu out of the way.
    listen(canvas, "contextmenu", |e: Event| e.prevent_default())?;

    let resized = window.clone();
    listen(&window, "resize", move |_: Event| {
        let (width, height) = window_size(&resized);
        (hooks.resize)(width, height);
    })?;
    Ok(())
}

/// Drive `hooks.frame` from requestAnimationFrame until it returns false.
pub fn run_frames(hooks: Hooks) -> WebResult<()> {
    let window = window()?;
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let scheduler = window.clone();

    *slot.borrow_mut() = Some(Closure::new(move || {
        if !(hooks.frame)() {
            // Dropping the closure ends the loop.
            next.borrow_mut().take();
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(err) = scheduler.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", err);
            }
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}
