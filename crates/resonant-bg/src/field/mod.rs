//! Reference color-field functions
//!
//! Pure Rust evaluations of the two background scenes. They mirror the WGSL
//! fragment stages in [`crate::shaders`] and are what [`SoftwareSurface`]
//! rasterizes. Every function here is deterministic: the same pixel,
//! resolution, time and pan always produce bit-identical output.
//!
//! Pixel coordinates follow the GL convention: origin at the bottom-left,
//! pixel centers at `+0.5`.
//!
//! [`SoftwareSurface`]: crate::software::SoftwareSurface

pub mod raymarch;
pub mod rings;

use crate::math::Vec3;

/// Linear RGBA color, each channel nominally in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully opaque color from an RGB triple
    #[inline]
    pub fn opaque(rgb: Vec3) -> Self {
        Self {
            r: rgb.x,
            g: rgb.y,
            b: rgb.z,
            a: 1.0,
        }
    }

    /// Quantize to 8 bits per channel
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Bit patterns of all four channels, for exact comparisons
    pub fn to_bits(self) -> [u32; 4] {
        [
            self.r.to_bits(),
            self.g.to_bits(),
            self.b.to_bits(),
            self.a.to_bits(),
        ]
    }
}
