//! Renderer configuration
//!
//! Each scene has a preset tuned for it. Hosts may pass a JSON object whose
//! fields are all optional: `scene` selects the preset, everything else
//! overrides it.
//!
//! ```json
//! { "scene": "rings", "resolution_scale": 0.75, "directions": { "/": { "x": 0, "y": 0.2 } } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{RendererError, RendererResult};
use crate::host::{SurfaceSize, Viewport};
use crate::math::Vec2;
use crate::pan::{PageDirectionTable, PanMode, DEFAULT_PAN_SPEED};
use crate::scene::Scene;

/// Navigation event the browser layer listens for by default
pub const DEFAULT_NAVIGATION_EVENT: &str = "htmx:beforeSwap";

/// Static page presentation used when WebGL2 is unavailable
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FallbackStyle {
    /// CSS `background` value for the document body
    pub background: String,
    /// CSS `background-size`, for gradients that drift
    #[serde(default)]
    pub background_size: Option<String>,
    /// CSS `animation` shorthand
    #[serde(default)]
    pub animation: Option<String>,
    /// `@keyframes` rules referenced by `animation`
    #[serde(default)]
    pub keyframes: Option<String>,
}

impl FallbackStyle {
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            background: color.into(),
            background_size: None,
            animation: None,
            keyframes: None,
        }
    }
}

impl Default for FallbackStyle {
    fn default() -> Self {
        Self::solid("#0a0a0a")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    pub scene: Scene,
    /// Surface pixels per viewport pixel
    pub resolution_scale: f32,
    /// Multiply `resolution_scale` by the device pixel ratio
    pub scale_with_device_pixel_ratio: bool,
    pub pan_speed: f32,
    pub pan_mode: PanMode,
    /// Seconds added to wall time before scaling
    pub time_offset_secs: f64,
    /// Animation seconds per wall-clock second
    pub time_rate: f64,
    pub directions: PageDirectionTable,
    /// DOM event carrying the navigation target route
    pub navigation_event: String,
    pub fallback: FallbackStyle,
}

impl RendererConfig {
    /// Preset for `scene`
    pub fn preset(scene: Scene) -> Self {
        match scene {
            Scene::Raymarch => Self::raymarch(),
            Scene::Rings => Self::rings(),
        }
    }

    /// Quarter-resolution raymarch, started 300 s in and slowed down
    pub fn raymarch() -> Self {
        Self {
            scene: Scene::Raymarch,
            resolution_scale: 0.25,
            scale_with_device_pixel_ratio: false,
            pan_speed: DEFAULT_PAN_SPEED,
            pan_mode: PanMode::Additive,
            time_offset_secs: 300.0,
            time_rate: 0.015,
            directions: PageDirectionTable::new()
                .with("/", Vec2::new(0.0, 0.3))
                .with("/home", Vec2::new(0.0, 0.3))
                .with("/technology", Vec2::new(0.4, 0.0))
                .with("/kits", Vec2::new(-0.4, 0.0))
                .with("/community", Vec2::new(0.0, -0.3))
                .with("/about", Vec2::new(-0.3, 0.2))
                .with("/contact", Vec2::new(0.3, -0.2))
                .with("/equipment", Vec2::new(0.2, 0.25)),
            navigation_event: DEFAULT_NAVIGATION_EVENT.to_string(),
            fallback: FallbackStyle::default(),
        }
    }

    /// Half-resolution rings with absolute per-page directions
    pub fn rings() -> Self {
        Self {
            scene: Scene::Rings,
            resolution_scale: 0.5,
            scale_with_device_pixel_ratio: true,
            pan_speed: DEFAULT_PAN_SPEED,
            pan_mode: PanMode::Absolute,
            time_offset_secs: 0.0,
            time_rate: 1.0,
            directions: PageDirectionTable::new()
                .with("/", Vec2::ZERO)
                .with("/technology", Vec2::new(0.6, 0.0))
                .with("/kits", Vec2::new(-0.6, 0.0))
                .with("/community", Vec2::new(0.0, -0.45))
                .with("/about", Vec2::new(-0.4, 0.3))
                .with("/contact", Vec2::new(0.4, -0.3))
                .with("/equipment", Vec2::new(0.3, 0.35)),
            navigation_event: DEFAULT_NAVIGATION_EVENT.to_string(),
            fallback: FallbackStyle {
                background: "radial-gradient(circle at 30% 40%, rgba(255, 120, 30, 0.16), transparent 55%), \
                             radial-gradient(circle at 70% 60%, rgba(230, 80, 10, 0.10), transparent 60%), \
                             #0a0a0a"
                    .to_string(),
                background_size: Some("200% 200%".to_string()),
                animation: Some("resonant-drift 40s ease-in-out infinite alternate".to_string()),
                keyframes: Some(
                    "@keyframes resonant-drift { from { background-position: 0% 0%; } to { background-position: 100% 100%; } }"
                        .to_string(),
                ),
            },
        }
    }

    /// Parse a JSON override object on top of the matching preset
    pub fn from_json(json: &str) -> RendererResult<Self> {
        let overrides: ConfigOverrides = serde_json::from_str(json)?;
        let config = overrides.apply();
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> RendererResult<()> {
        if !(self.resolution_scale > 0.0 && self.resolution_scale <= 4.0) {
            return Err(RendererError::config(format!(
                "resolution_scale must be in (0, 4], got {}",
                self.resolution_scale
            )));
        }
        if !(self.pan_speed > 0.0 && self.pan_speed <= 1.0) {
            return Err(RendererError::config(format!(
                "pan_speed must be in (0, 1], got {}",
                self.pan_speed
            )));
        }
        if !(self.time_rate.is_finite() && self.time_rate > 0.0) {
            return Err(RendererError::config(format!(
                "time_rate must be finite and positive, got {}",
                self.time_rate
            )));
        }
        if !self.time_offset_secs.is_finite() {
            return Err(RendererError::config("time_offset_secs must be finite"));
        }
        if let Some((route, _)) = self.directions.iter().find(|(_, d)| !d.is_finite()) {
            return Err(RendererError::config(format!(
                "direction for route {route:?} is not finite"
            )));
        }
        if self.navigation_event.trim().is_empty() {
            return Err(RendererError::config("navigation_event must not be empty"));
        }
        Ok(())
    }

    /// Effective viewport-to-surface scale
    pub fn scale_factor(&self, viewport: Viewport) -> f64 {
        let scale = self.resolution_scale as f64;
        if self.scale_with_device_pixel_ratio && viewport.device_pixel_ratio > 0.0 {
            scale * viewport.device_pixel_ratio
        } else {
            scale
        }
    }

    /// Surface dimensions for `viewport`
    pub fn surface_size(&self, viewport: Viewport) -> SurfaceSize {
        SurfaceSize::from_viewport(viewport, self.scale_factor(viewport))
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::preset(Scene::default())
    }
}

/// Optional fields layered over a preset
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverrides {
    scene: Option<Scene>,
    resolution_scale: Option<f32>,
    scale_with_device_pixel_ratio: Option<bool>,
    pan_speed: Option<f32>,
    pan_mode: Option<PanMode>,
    time_offset_secs: Option<f64>,
    time_rate: Option<f64>,
    directions: Option<PageDirectionTable>,
    navigation_event: Option<String>,
    fallback: Option<FallbackStyle>,
}

impl ConfigOverrides {
    fn apply(self) -> RendererConfig {
        let mut config = RendererConfig::preset(self.scene.unwrap_or_default());
        if let Some(v) = self.resolution_scale {
            config.resolution_scale = v;
        }
        if let Some(v) = self.scale_with_device_pixel_ratio {
            config.scale_with_device_pixel_ratio = v;
        }
        if let Some(v) = self.pan_speed {
            config.pan_speed = v;
        }
        if let Some(v) = self.pan_mode {
            config.pan_mode = v;
        }
        if let Some(v) = self.time_offset_secs {
            config.time_offset_secs = v;
        }
        if let Some(v) = self.time_rate {
            config.time_rate = v;
        }
        if let Some(v) = self.directions {
            config.directions = v;
        }
        if let Some(v) = self.navigation_event {
            config.navigation_event = v;
        }
        if let Some(v) = self.fallback {
            config.fallback = v;
        }
        config
    }
}
