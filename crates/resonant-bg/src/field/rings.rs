//! Layered radiating rings
//!
//! Five emitters send out concentric rings. Each ring field is the sum of
//! three frequency layers that travel outward at their own speed and fade
//! with distance. Emitters drift with the pan vector by different amounts,
//! which gives a cheap parallax when the page changes.

use super::Rgba;
use crate::math::{Vec2, Vec3};

/// One frequency band of a ring field
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingLayer {
    /// Outward travel, in uv units per second
    pub speed: f32,
    /// Ring frequency, radians per uv unit
    pub spacing: f32,
    /// Exponential fade with distance
    pub decay: f32,
    /// Sharpening exponent applied to the 0..1 wave
    pub power: f32,
}

/// A ring source
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emitter {
    /// Resting center in uv space
    pub center: Vec2,
    /// Fraction of the pan vector added to the center
    pub parallax: f32,
    pub tint: Vec3,
    pub intensity: f32,
}

impl Emitter {
    /// Center after applying `pan`
    #[inline]
    pub fn center_at(&self, pan: Vec2) -> Vec2 {
        self.center + pan * self.parallax
    }
}

pub const LAYERS: [RingLayer; 3] = [
    RingLayer {
        speed: 0.12,
        spacing: 18.0,
        decay: 1.6,
        power: 8.0,
    },
    RingLayer {
        speed: 0.07,
        spacing: 9.0,
        decay: 1.1,
        power: 4.0,
    },
    RingLayer {
        speed: 0.04,
        spacing: 4.5,
        decay: 0.7,
        power: 2.0,
    },
];

pub const EMITTERS: [Emitter; 5] = [
    Emitter {
        center: Vec2::new(0.0, 0.0),
        parallax: 0.10,
        tint: Vec3::new(1.0, 0.45, 0.10),
        intensity: 0.22,
    },
    Emitter {
        center: Vec2::new(-0.62, 0.34),
        parallax: 0.22,
        tint: Vec3::new(0.95, 0.35, 0.05),
        intensity: 0.12,
    },
    Emitter {
        center: Vec2::new(0.66, 0.30),
        parallax: 0.18,
        tint: Vec3::new(1.0, 0.55, 0.20),
        intensity: 0.10,
    },
    Emitter {
        center: Vec2::new(-0.52, -0.41),
        parallax: 0.26,
        tint: Vec3::new(0.85, 0.30, 0.05),
        intensity: 0.09,
    },
    Emitter {
        center: Vec2::new(0.57, -0.44),
        parallax: 0.30,
        tint: Vec3::new(0.90, 0.50, 0.15),
        intensity: 0.08,
    },
];

pub const BACKGROUND: Vec3 = Vec3::new(0.035, 0.018, 0.010);
pub const VIGNETTE: f32 = 0.55;

/// One layer's contribution at distance `dist` from its emitter
#[inline]
pub fn ring_layer(dist: f32, time: f32, layer: &RingLayer) -> f32 {
    let wave = ((dist - time * layer.speed) * layer.spacing).sin() * 0.5 + 0.5;
    wave.powf(layer.power) * (-dist * layer.decay).exp()
}

/// Summed ring field of all layers for an emitter at `center`
pub fn radiating_ring(uv: Vec2, center: Vec2, time: f32) -> f32 {
    let dist = uv.distance(center);
    LAYERS.iter().map(|layer| ring_layer(dist, time, layer)).sum()
}

/// Slow global brightness oscillation
#[inline]
pub fn breathing(time: f32) -> f32 {
    0.92 + 0.08 * (time * 0.35).sin()
}

/// Aspect-correct, centered coordinates for a pixel
#[inline]
pub fn uv(frag: Vec2, resolution: Vec2) -> Vec2 {
    (frag - resolution * 0.5) / resolution.y
}

/// Color of pixel `frag` on a surface of `resolution` pixels
pub fn color(frag: Vec2, resolution: Vec2, time: f32, pan: Vec2) -> Rgba {
    let uv = uv(frag, resolution);

    let mut color = BACKGROUND;
    for emitter in &EMITTERS {
        let ring = radiating_ring(uv, emitter.center_at(pan), time);
        color += emitter.tint * (ring * emitter.intensity);
    }

    let vignette = (1.0 - uv.length() * VIGNETTE).max(0.0);
    color = color * (vignette * breathing(time));

    Rgba::opaque(color.map(|c| c.clamp(0.0, 1.0)))
}
