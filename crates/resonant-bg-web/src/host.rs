//! [`Host`] backed by the browser window

use std::cell::RefCell;
use std::rc::Rc;

use resonant_bg::{FallbackStyle, FrameId, Host, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

/// Slot holding the animation-frame callback
///
/// Filled once the driver exists; emptied on teardown so the callback and
/// the driver it captures can be dropped.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct BrowserHost {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    frame_callback: FrameCallback,
}

impl BrowserHost {
    pub fn new(
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        frame_callback: FrameCallback,
    ) -> Self {
        Self {
            window,
            document,
            canvas,
            frame_callback,
        }
    }

    /// Whether the page is currently hidden
    pub fn document_hidden(&self) -> bool {
        self.document.hidden()
    }

    fn dimension(value: Result<JsValue, JsValue>) -> f64 {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    }

    fn inject_keyframes(&self, keyframes: &str) -> Result<(), JsValue> {
        let style = self.document.create_element("style")?;
        style.set_text_content(Some(keyframes));
        match self.document.head() {
            Some(head) => head.append_child(&style)?,
            None => self
                .document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?
                .append_child(&style)?,
        };
        Ok(())
    }

    fn style_body(&self, style: &FallbackStyle) -> Result<(), JsValue> {
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        let css = body.style();
        css.set_property("background", &style.background)?;
        if let Some(size) = &style.background_size {
            css.set_property("background-size", size)?;
        }
        if let Some(keyframes) = &style.keyframes {
            self.inject_keyframes(keyframes)?;
        }
        if let Some(animation) = &style.animation {
            css.set_property("animation", animation)?;
        }
        Ok(())
    }
}

impl Host for BrowserHost {
    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn viewport(&self) -> Viewport {
        let width = Self::dimension(self.window.inner_width());
        let height = Self::dimension(self.window.inner_height());
        Viewport::new(width, height).with_device_pixel_ratio(self.window.device_pixel_ratio())
    }

    fn request_frame(&mut self) -> Option<FrameId> {
        let slot = self.frame_callback.borrow();
        let callback = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameId(id)),
            Err(e) => {
                tracing::warn!(error = ?e, "requestAnimationFrame failed");
                None
            }
        }
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(frame.0) {
            tracing::warn!(error = ?e, "cancelAnimationFrame failed");
        }
    }

    fn remove_surface(&mut self) {
        self.canvas.remove();
    }

    fn apply_fallback(&mut self, style: &FallbackStyle) {
        if let Err(e) = self.style_body(style) {
            tracing::warn!(error = ?e, "could not apply fallback background");
        }
    }
}
