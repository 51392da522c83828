//! Seams between the renderer and its environment
//!
//! The driver never talks to a browser directly. Everything it needs from
//! the outside world goes through two traits:
//!
//! - [`Host`]: time, viewport size, frame scheduling, and what happens to
//!   the page when the drawing surface goes away
//! - [`GpuSurface`]: shader compilation and linking, uniform upload and draw
//!   submission on whatever graphics API the platform has
//!
//! # Implementations
//!
//! - **Browser**: `BrowserHost` in the web crate, `WgpuSurface` (WebGL2)
//! - **Headless**: [`SoftwareSurface`](crate::software::SoftwareSurface)
//! - **Tests**: [`MockHost`](crate::mock::MockHost) and
//!   [`RecordingSurface`](crate::mock::RecordingSurface)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::FallbackStyle;
use crate::error::RendererResult;
use crate::uniforms::Uniforms;

/// Viewport in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    pub const fn with_device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.device_pixel_ratio = dpr;
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Render surface dimensions in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `floor(viewport * scale)` per axis
    pub fn from_viewport(viewport: Viewport, scale: f64) -> Self {
        let dim = |v: f64| {
            let scaled = (v * scale).floor();
            if scaled.is_finite() && scaled > 0.0 {
                scaled.min(u32::MAX as f64) as u32
            } else {
                0
            }
        };
        Self::new(dim(viewport.width), dim(viewport.height))
    }

    /// True if either dimension is zero
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size as the `resolution` uniform
    #[inline]
    pub fn as_resolution(self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

/// Handle returned by [`Host::request_frame`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Compiled shader stage on a [`GpuSurface`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Linked program on a [`GpuSurface`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Environment the renderer runs in
///
/// All calls happen on the host's UI thread, one at a time.
pub trait Host {
    /// Monotonic time in milliseconds since an arbitrary epoch
    fn now_ms(&self) -> f64;

    /// Current viewport size
    fn viewport(&self) -> Viewport;

    /// Ask for one callback before the next repaint
    ///
    /// Returns `None` if the host cannot schedule frames; the driver then
    /// simply stops ticking.
    fn request_frame(&mut self) -> Option<FrameId>;

    /// Cancel a callback that has not fired yet
    fn cancel_frame(&mut self, frame: FrameId);

    /// Detach the drawing surface from the page
    fn remove_surface(&mut self);

    /// Switch the page to the static presentation used without WebGL2
    fn apply_fallback(&mut self, style: &FallbackStyle);
}

/// GPU-backed drawing surface
///
/// Compile and link failures are reported as errors; per-frame uploads are
/// assumed to succeed once a program exists.
pub trait GpuSurface {
    /// Compile one shader stage
    fn compile(&mut self, stage: ShaderStage, source: &str) -> RendererResult<ShaderId>;

    /// Link a vertex and a fragment stage into a program
    fn link(&mut self, vertex: ShaderId, fragment: ShaderId) -> RendererResult<ProgramId>;

    /// Reallocate the backing store to `size` pixels
    fn resize(&mut self, size: SurfaceSize);

    /// Upload the uniform block for `program`
    fn set_uniforms(&mut self, program: ProgramId, uniforms: &Uniforms);

    /// Run `program` over every pixel of the surface and present
    fn draw(&mut self, program: ProgramId) -> RendererResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_size_floors() {
        let vp = Viewport::new(1366.0, 768.0);
        assert_eq!(SurfaceSize::from_viewport(vp, 0.25), SurfaceSize::new(341, 192));
        assert_eq!(SurfaceSize::from_viewport(vp, 0.75), SurfaceSize::new(1024, 576));
    }

    #[test]
    fn test_surface_size_degenerate() {
        assert!(SurfaceSize::from_viewport(Viewport::new(3.0, 3.0), 0.25).is_empty());
        assert!(SurfaceSize::from_viewport(Viewport::new(f64::NAN, 10.0), 1.0).is_empty());
        assert!(SurfaceSize::from_viewport(Viewport::new(-5.0, 10.0), 1.0).is_empty());
    }

    #[test]
    fn test_surface_size_resolution() {
        let s = SurfaceSize::new(480, 270);
        assert_eq!(s.as_resolution(), [480.0, 270.0]);
        assert_eq!(s.pixel_count(), 129_600);
    }

    #[test]
    fn test_shader_stage_display() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
