//! Uniform block shared by every scene
//!
//! Layout must match `struct Uniforms` in the WGSL stages: 32 bytes,
//! 16-byte aligned, `vec2<f32>` members on 8-byte boundaries.

use crate::host::SurfaceSize;
use crate::math::Vec2;

/// Parameters uploaded to the color field every frame
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "wasm", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct Uniforms {
    /// Animation time in (scaled) seconds
    pub time: f32,
    pub _pad0: f32,
    /// Render surface size in pixels
    pub resolution: [f32; 2],
    /// Smoothed pan vector
    pub pan: [f32; 2],
    pub _pad1: [f32; 2],
}

impl Uniforms {
    pub fn new(time: f32, size: SurfaceSize, pan: Vec2) -> Self {
        Self {
            time,
            _pad0: 0.0,
            resolution: size.as_resolution(),
            pan: [pan.x, pan.y],
            _pad1: [0.0, 0.0],
        }
    }

    /// Zero time and pan at the given resolution
    pub fn default_with_resolution(width: u32, height: u32) -> Self {
        Self::new(0.0, SurfaceSize::new(width, height), Vec2::ZERO)
    }

    #[inline]
    pub fn resolution_vec(&self) -> Vec2 {
        Vec2::new(self.resolution[0], self.resolution[1])
    }

    #[inline]
    pub fn pan_vec(&self) -> Vec2 {
        Vec2::new(self.pan[0], self.pan[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_size_matches_wgsl_block() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 32);
        assert_eq!(std::mem::align_of::<Uniforms>(), 4);
    }

    #[test]
    fn test_uniforms_new() {
        let u = Uniforms::new(4.5, SurfaceSize::new(480, 270), Vec2::new(0.4, -0.3));
        assert_eq!(u.time, 4.5);
        assert_eq!(u.resolution, [480.0, 270.0]);
        assert_eq!(u.pan_vec(), Vec2::new(0.4, -0.3));
        assert_eq!(u._pad0, 0.0);
        assert_eq!(u._pad1, [0.0, 0.0]);
    }

    #[test]
    fn test_default_with_resolution() {
        let u = Uniforms::default_with_resolution(10, 20);
        assert_eq!(u.resolution_vec(), Vec2::new(10.0, 20.0));
        assert_eq!(u.time, 0.0);
        assert_eq!(u.pan, [0.0, 0.0]);
    }
}
