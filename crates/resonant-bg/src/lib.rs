//! Procedural animated page background
//!
//! Renders one full-viewport procedural scene behind page content. The
//! scene is a color field evaluated per pixel from the pixel position, the
//! surface resolution, an animation clock and a smoothed pan vector that
//! drifts when the page navigates.
//!
//! ## Available Scenes
//!
//! - **Raymarch**: a repeating field of twisted tori, sphere-traced from a
//!   fixed camera and lit by a point light (default)
//! - **Rings**: five emitters of layered radiating rings with vignette and
//!   a slow breathing brightness
//!
//! ## Structure
//!
//! - [`driver::AnimationDriver`] owns all renderer state and reacts to host
//!   notifications (`tick`, `on_resize`, `on_visibility_change`,
//!   `on_navigate`, `destroy`)
//! - [`host::Host`] and [`host::GpuSurface`] are the seams to the platform
//! - [`field`] holds the reference color fields; [`shaders`] the WGSL the
//!   GPU runs
//! - `gpu` (feature `wasm`) is the WebGL2 backend

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod field;
pub mod host;
pub mod math;
pub mod mock;
pub mod pan;
pub mod scene;
pub mod shaders;
pub mod software;
pub mod uniforms;

#[cfg(feature = "wasm")]
pub mod gpu;

pub use clock::AnimationClock;
pub use config::{FallbackStyle, RendererConfig, DEFAULT_NAVIGATION_EVENT};
pub use driver::{AnimationDriver, DriverState};
pub use error::{RendererError, RendererResult};
pub use field::Rgba;
pub use host::{
    FrameId, GpuSurface, Host, ProgramId, ShaderId, ShaderStage, SurfaceSize, Viewport,
};
pub use math::{Vec2, Vec3};
pub use pan::{PageDirectionTable, PanMode, PanState, DEFAULT_PAN_SPEED};
pub use scene::Scene;
pub use software::SoftwareSurface;
pub use uniforms::Uniforms;
