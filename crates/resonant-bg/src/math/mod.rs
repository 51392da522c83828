//! Small vector math used by the color field and the pan animation
//!
//! Deliberately mirrors the GLSL/WGSL builtins the shaders use so the Rust
//! reference evaluation produces the same numbers as the GPU stages.

mod vec2;
mod vec3;

pub use vec2::Vec2;
pub use vec3::Vec3;

/// GLSL-style `mod`: `x - y * floor(x / y)`, always takes the sign of `y`
#[inline]
pub fn fmod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}
