//! Exported background handle
//!
//! [`mount`] creates a full-viewport canvas behind the page content, asks
//! for a WebGL2 surface and starts the animation driver. Without WebGL2 the
//! canvas is removed again and the configured CSS background is applied.

use std::cell::RefCell;
use std::rc::Rc;

use resonant_bg::gpu::WgpuSurface;
use resonant_bg::{AnimationDriver, DriverState, RendererConfig, RendererError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement};

use crate::events::{normalize_route, with_driver, EventBindings, SharedDriver};
use crate::host::{BrowserHost, FrameCallback};
use crate::util::log;

const CANVAS_ID: &str = "resonant-bg";

/// Inline style keeping the canvas fixed behind everything and out of the
/// way of pointer events. CSS size stays at the viewport; the backing store
/// is scaled down by the driver.
const CANVAS_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("inset", "0"),
    ("width", "100vw"),
    ("height", "100vh"),
    ("z-index", "-1"),
    ("pointer-events", "none"),
    ("display", "block"),
];

fn to_js(e: RendererError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_id(CANVAS_ID);
    canvas.set_attribute("aria-hidden", "true")?;

    let style = canvas.style();
    for (property, value) in CANVAS_STYLE {
        style.set_property(property, value)?;
    }

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.prepend_with_node_1(&canvas)?;
    Ok(canvas)
}

/// Create the background and start animating
///
/// `config_json` is an optional JSON object of overrides, e.g.
/// `{"scene": "rings", "resolution_scale": 0.75}`. Invalid configuration
/// rejects the promise; a missing WebGL2 context does not (the page gets the
/// static fallback instead).
#[wasm_bindgen]
pub async fn mount(config_json: Option<String>) -> Result<ResonantBackground, JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => RendererConfig::from_json(json).map_err(to_js)?,
        None => RendererConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = create_canvas(&document)?;

    log(&format!(
        "[background] Initializing {} background...",
        config.scene.name()
    ));
    let surface = WgpuSurface::new(canvas.clone()).await;

    let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
    let driver: SharedDriver<WgpuSurface> = Rc::new(RefCell::new(None));

    // The callback must exist before the driver schedules its first frame
    {
        let driver = Rc::clone(&driver);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            with_driver(&driver, |d| d.tick());
        }) as Box<dyn FnMut(f64)>));
    }

    let navigation_event = config.navigation_event.clone();
    let host = BrowserHost::new(
        window.clone(),
        document.clone(),
        canvas,
        Rc::clone(&frame_callback),
    );
    let hidden = host.document_hidden();
    *driver.borrow_mut() = Some(AnimationDriver::new(config, host, surface));

    let fallback = matches!(
        driver.borrow().as_ref().map(AnimationDriver::state),
        Some(DriverState::Fallback)
    );

    let events = if fallback {
        // Nothing left to animate
        frame_callback.borrow_mut().take();
        None
    } else {
        if hidden {
            with_driver(&driver, |d| d.on_visibility_change(false));
        }
        Some(EventBindings::attach(window, document, &navigation_event, &driver)?)
    };

    Ok(ResonantBackground {
        driver,
        frame_callback,
        events,
    })
}

/// WASM-bindgen handle for a mounted background
#[wasm_bindgen]
pub struct ResonantBackground {
    driver: SharedDriver<WgpuSurface>,
    frame_callback: FrameCallback,
    events: Option<EventBindings>,
}

#[wasm_bindgen]
impl ResonantBackground {
    /// Start panning toward the direction for `route`
    ///
    /// For pages that navigate without the configured DOM event.
    #[wasm_bindgen]
    pub fn navigate(&self, route: &str) {
        let route = normalize_route(route);
        with_driver(&self.driver, |d| d.on_navigate(route));
    }

    /// Stop animating, remove the canvas and every listener
    ///
    /// Safe to call more than once.
    #[wasm_bindgen]
    pub fn destroy(&mut self) {
        if let Some(mut events) = self.events.take() {
            events.detach();
        }
        with_driver(&self.driver, |d| d.destroy());
        // Breaks the callback -> driver -> host -> callback cycle
        self.frame_callback.borrow_mut().take();
    }

    /// Current driver state, e.g. "active", "paused", "fallback"
    #[wasm_bindgen]
    pub fn state(&self) -> String {
        self.driver
            .borrow()
            .as_ref()
            .map(|d| format!("{:?}", d.state()).to_lowercase())
            .unwrap_or_else(|| "destroyed".to_string())
    }

    /// Whether the static CSS fallback is showing
    #[wasm_bindgen]
    pub fn is_fallback(&self) -> bool {
        self.driver
            .borrow()
            .as_ref()
            .is_some_and(|d| d.state() == DriverState::Fallback)
    }

    /// ID of the scene being rendered
    #[wasm_bindgen]
    pub fn scene(&self) -> String {
        self.driver
            .borrow()
            .as_ref()
            .map(|d| d.config().scene.id().to_string())
            .unwrap_or_default()
    }
}

impl Drop for ResonantBackground {
    fn drop(&mut self) {
        self.destroy();
    }
}
