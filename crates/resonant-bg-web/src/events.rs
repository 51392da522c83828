//! DOM event wiring
//!
//! Listens for `resize` on the window, `visibilitychange` on the document
//! and the configured navigation event (htmx's `htmx:beforeSwap` by
//! default) on the document, forwarding each to the shared driver.
//!
//! The navigation route is read from the event's `detail`:
//! - a plain string detail is the route itself
//! - `detail.pathInfo.requestPath` (htmx 1.x and 2.x)
//! - `detail.requestConfig.path`
//!
//! The first non-empty candidate wins. Query strings, fragments and any
//! scheme/host prefix are stripped before the route is looked up; an event
//! with no route pans like an unmapped page.

use std::cell::RefCell;
use std::rc::Rc;

use resonant_bg::{AnimationDriver, GpuSurface};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Document, Event, Window};

use crate::host::BrowserHost;

/// Driver shared between the exported handle and the DOM callbacks
pub type SharedDriver<S> = Rc<RefCell<Option<AnimationDriver<BrowserHost, S>>>>;

/// Run `f` on the driver if it exists and is not already borrowed
pub fn with_driver<S, F>(driver: &SharedDriver<S>, f: F)
where
    S: GpuSurface,
    F: FnOnce(&mut AnimationDriver<BrowserHost, S>),
{
    if let Ok(mut slot) = driver.try_borrow_mut() {
        if let Some(driver) = slot.as_mut() {
            f(driver);
        }
    }
}

/// Reduce a URL or path to the route used as a direction-table key
///
/// `"https://example.com/kits?page=2#top"` becomes `"/kits"` and a bare
/// origin becomes `"/"`. An input with no path at all stays empty, which
/// no direction table maps.
pub fn normalize_route(raw: &str) -> &str {
    let raw = raw.trim();
    let path = match raw.find("://") {
        Some(scheme_end) => {
            let rest = &raw[scheme_end + 3..];
            rest.find('/').map_or("/", |i| &rest[i..])
        }
        None => raw,
    };
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// First candidate that normalizes to a non-empty route, or `""`
pub fn first_route<I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|raw| normalize_route(&raw).to_string())
        .find(|route| !route.is_empty())
        .unwrap_or_default()
}

fn get_path(value: &JsValue, keys: &[&str]) -> Option<JsValue> {
    keys.iter().try_fold(value.clone(), |current, key| {
        if current.is_undefined() || current.is_null() {
            return None;
        }
        js_sys::Reflect::get(&current, &JsValue::from_str(key)).ok()
    })
}

/// Pull the destination route out of a navigation event
///
/// An event without a usable route yields `""`, which pans like any
/// unmapped route.
pub fn route_from_event(event: &Event) -> String {
    let Some(detail) = event.dyn_ref::<CustomEvent>().map(CustomEvent::detail) else {
        return String::new();
    };
    let paths: [&[&str]; 2] = [&["pathInfo", "requestPath"], &["requestConfig", "path"]];
    let lookups = paths
        .iter()
        .map(|keys| get_path(&detail, keys).and_then(|value| value.as_string()));
    first_route(std::iter::once(detail.as_string()).chain(lookups))
}

/// Registered listeners; removed on [`detach`](Self::detach) or drop
pub struct EventBindings {
    window: Window,
    document: Document,
    navigation_event: String,
    on_resize: Closure<dyn FnMut(Event)>,
    on_visibility: Closure<dyn FnMut(Event)>,
    on_navigate: Closure<dyn FnMut(Event)>,
    attached: bool,
}

impl EventBindings {
    pub fn attach<S: GpuSurface + 'static>(
        window: Window,
        document: Document,
        navigation_event: &str,
        driver: &SharedDriver<S>,
    ) -> Result<Self, JsValue> {
        let on_resize = {
            let driver = Rc::clone(driver);
            Closure::wrap(Box::new(move |_event: Event| {
                with_driver(&driver, |d| d.on_resize());
            }) as Box<dyn FnMut(Event)>)
        };

        let on_visibility = {
            let driver = Rc::clone(driver);
            let document = document.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                let visible = !document.hidden();
                with_driver(&driver, |d| d.on_visibility_change(visible));
            }) as Box<dyn FnMut(Event)>)
        };

        let on_navigate = {
            let driver = Rc::clone(driver);
            Closure::wrap(Box::new(move |event: Event| {
                let route = route_from_event(&event);
                with_driver(&driver, |d| d.on_navigate(&route));
            }) as Box<dyn FnMut(Event)>)
        };

        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        document.add_event_listener_with_callback(
            "visibilitychange",
            on_visibility.as_ref().unchecked_ref(),
        )?;
        document.add_event_listener_with_callback(
            navigation_event,
            on_navigate.as_ref().unchecked_ref(),
        )?;

        Ok(Self {
            window,
            document,
            navigation_event: navigation_event.to_string(),
            on_resize,
            on_visibility,
            on_navigate,
            attached: true,
        })
    }

    /// Remove every listener. Safe to call more than once.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;

        let removed = [
            self.window.remove_event_listener_with_callback(
                "resize",
                self.on_resize.as_ref().unchecked_ref(),
            ),
            self.document.remove_event_listener_with_callback(
                "visibilitychange",
                self.on_visibility.as_ref().unchecked_ref(),
            ),
            self.document.remove_event_listener_with_callback(
                &self.navigation_event,
                self.on_navigate.as_ref().unchecked_ref(),
            ),
        ];
        for result in removed {
            if let Err(e) = result {
                tracing::warn!(error = ?e, "failed to remove event listener");
            }
        }
    }
}

impl Drop for EventBindings {
    fn drop(&mut self) {
        self.detach();
    }
}
