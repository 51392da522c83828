use serde::{Deserialize, Serialize};

use crate::field::{self, Rgba};
use crate::math::Vec2;
use crate::shaders::{SHADER_RAYMARCH, SHADER_RINGS};

/// Available background scenes
///
/// The two scenes share no parameters beyond the uniform block; a renderer
/// shows exactly one of them for its whole lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    /// Raymarched field of twisted tori
    #[default]
    Raymarch,
    /// Layered radiating rings from five emitters
    Rings,
}

impl Scene {
    /// Get all available scenes
    pub fn all() -> &'static [Scene] {
        &[Scene::Raymarch, Scene::Rings]
    }

    /// Get the display name for this scene
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Raymarch => "Twisted Tori",
            Scene::Rings => "Radiating Rings",
        }
    }

    /// Get the string ID for this scene
    pub fn id(&self) -> &'static str {
        match self {
            Scene::Raymarch => "raymarch",
            Scene::Rings => "rings",
        }
    }

    /// Parse from string ID (e.g., "raymarch", "rings"), case-insensitive
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|scene| scene.id().eq_ignore_ascii_case(id))
    }

    /// WGSL fragment stage for this scene
    pub fn fragment_source(&self) -> &'static str {
        match self {
            Scene::Raymarch => SHADER_RAYMARCH,
            Scene::Rings => SHADER_RINGS,
        }
    }

    /// Find the scene whose fragment stage is exactly `source`
    pub fn from_fragment_source(source: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|scene| scene.fragment_source() == source)
    }

    /// Evaluate the color field on the CPU
    ///
    /// `frag` uses a bottom-left origin with pixel centers at `+0.5`.
    pub fn evaluate(&self, frag: Vec2, resolution: Vec2, time: f32, pan: Vec2) -> Rgba {
        match self {
            Scene::Raymarch => field::raymarch::color(frag, resolution, time, pan),
            Scene::Rings => field::rings::color(frag, resolution, time, pan),
        }
    }
}
