//! Browser binding layer for the resonant page background
//!
//! Wires [`resonant_bg::AnimationDriver`] to the page:
//!
//! - [`host::BrowserHost`]: `performance.now()`, viewport size and
//!   `requestAnimationFrame` scheduling, canvas removal and the CSS fallback
//! - [`events`]: `resize`, `visibilitychange` and navigation listeners
//! - [`background::ResonantBackground`]: the handle returned to JavaScript
//!
//! ```js
//! import init, { mount } from "./resonant_bg_web.js";
//! await init();
//! const bg = await mount(JSON.stringify({ scene: "rings" }));
//! // later
//! bg.destroy();
//! ```

use wasm_bindgen::prelude::*;

pub mod background;
pub mod events;
pub mod host;
pub mod util;

pub use background::{mount, ResonantBackground};

/// Module entry point: panic hook and console logging
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    util::init_logging();
}

/// All available scenes as JSON
/// Returns: [{ "id": "raymarch", "name": "Twisted Tori" }, ...]
#[wasm_bindgen]
pub fn available_scenes() -> String {
    let scenes: Vec<serde_json::Value> = resonant_bg::Scene::all()
        .iter()
        .map(|scene| {
            serde_json::json!({
                "id": scene.id(),
                "name": scene.name()
            })
        })
        .collect();
    serde_json::to_string(&scenes).unwrap_or_else(|_| "[]".to_string())
}
