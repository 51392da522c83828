//! 2D vector type for screen positions and pan offsets

use serde::{Deserialize, Serialize};

/// 2D vector for screen positions, resolutions and pan offsets
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same value in both components
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Distance to another point
    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Length of the vector
    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Rotate by `angle` radians, matching the shaders' `rotate2d`
    #[inline]
    pub fn rotate(self, angle: f32) -> Vec2 {
        let (s, c) = angle.sin_cos();
        Vec2::new(self.x * c - self.y * s, self.y * c + self.x * s)
    }

    /// Move a fraction `rate` of the remaining way toward `target`
    ///
    /// Repeated application converges exponentially: after `k` steps the
    /// remaining gap is `(1 - rate)^k` of the original.
    #[inline]
    pub fn approach(self, target: Vec2, rate: f32) -> Vec2 {
        Vec2::new(
            self.x + (target.x - self.x) * rate,
            self.y + (target.y - self.y) * rate,
        )
    }

    /// Component-wise quotient
    #[inline]
    pub fn div_elem(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x / other.x, self.y / other.y)
    }

    /// True if both components are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl std::ops::Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, s: f32) -> Vec2 {
        Vec2::new(self.x / s, self.y / s)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);

        let sum = a + b;
        assert!((sum.x - 4.0).abs() < 0.001);
        assert!((sum.y - 6.0).abs() < 0.001);

        let diff = b - a;
        assert!((diff.x - 2.0).abs() < 0.001);
        assert!((diff.y - 2.0).abs() < 0.001);

        let scaled = a * 2.0;
        assert!((scaled.x - 2.0).abs() < 0.001);
        assert!((scaled.y - 4.0).abs() < 0.001);

        let neg = -a;
        assert!((neg.x + 1.0).abs() < 0.001);
        assert!((neg.y + 2.0).abs() < 0.001);
    }

    #[test]
    fn test_vec2_rotate_quarter_turn() {
        let v = Vec2::new(1.0, 0.0).rotate(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vec2_rotate_preserves_length() {
        let v = Vec2::new(3.0, -4.0);
        assert!((v.rotate(1.234).length() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_vec2_approach() {
        let v = Vec2::ZERO.approach(Vec2::new(1.0, -2.0), 0.25);
        assert!((v.x - 0.25).abs() < 1e-6);
        assert!((v.y + 0.5).abs() < 1e-6);

        // Already at target stays put
        let t = Vec2::new(0.4, 0.0);
        assert_eq!(t.approach(t, 0.04), t);
    }

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_vec2_serde_shape() {
        let v: Vec2 = serde_json::from_str(r#"{"x":0.4,"y":-0.2}"#).unwrap();
        assert_eq!(v, Vec2::new(0.4, -0.2));
    }
}
