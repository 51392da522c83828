//! Raymarched field of twisted tori
//!
//! A fixed camera looks into a 3D tiling of space (3 units per cell, cell
//! index wrapped modulo 32). Each cell holds one or two tori, spun by the
//! cell index and time and twisted along their local y axis. The march is
//! a plain sphere trace capped at [`MAX_MARCHING_STEPS`]; it does not try to
//! recover from overshoot. The terminal position is lit by a point light at
//! the camera and tinted a dark orange.

use super::Rgba;
use crate::math::{fmod, Vec2, Vec3};

pub const MAX_MARCHING_STEPS: usize = 35;
pub const EPSILON: f32 = 0.0001;

/// Edge length of one repeated cell
pub const TILE_PERIOD: f32 = 3.0;
/// Cell indices wrap after this many cells per axis
pub const TILE_WRAP: f32 = 32.0;

/// Constant drive level; scales twist and tube radius
const INTENSITY: f32 = 0.5;

/// Fixed camera look angles (yaw, pitch) before pan is applied
const LOOK: Vec2 = Vec2::new(0.5, -0.2);
const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, -8.0);
const BASE_COLOR: Vec3 = Vec3::new(0.43, 0.12, 0.01);
const MAX_LIGHT: f32 = 0.1;

/// Yaw added per unit of horizontal pan
pub const PAN_YAW: f32 = 0.3;
/// Camera translation per unit of pan
pub const PAN_SHIFT: f32 = 2.0;

/// `pR`: rotate the pair `(a, b)` by `angle`
#[inline]
fn rotate_pair(a: f32, b: f32, angle: f32) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    (c * a + s * b, c * b - s * a)
}

fn sd_torus(p: Vec3, radii: Vec2) -> f32 {
    let q = Vec2::new(Vec2::new(p.x, p.z).length() - radii.x, p.y);
    q.length() - radii.y
}

fn twisted_torus(p: Vec3, intensity: f32, time: f32) -> f32 {
    let c = (intensity * 1.5 * p.y).cos();
    let s = ((intensity + 0.5) * p.y).sin();
    let q = Vec3::new(c * p.x + s * p.z, -s * p.x + c * p.z, p.y);
    let radii = Vec2::new(
        (time * 0.1).sin().abs() + 0.5 * (intensity * 0.2),
        intensity * 0.0001,
    );
    sd_torus(q, radii)
}

/// Spin in the xy plane by `rotation`, then in xz by a tenth of it
#[inline]
fn spin(p: Vec3, rotation: f32) -> Vec3 {
    let (x, y) = rotate_pair(p.x, p.y, rotation);
    let (x, z) = rotate_pair(x, p.z, rotation * 0.1);
    Vec3::new(x, y, z)
}

/// Signed distance from `p` to the repeated scene at `time`
pub fn scene_sdf(p: Vec3, time: f32) -> f32 {
    let c = TILE_PERIOD;
    let idx = fmod((p.x / c).floor(), TILE_WRAP);
    let idy = fmod((p.y / c).floor(), TILE_WRAP);
    let idz = fmod((p.z / c).floor(), TILE_WRAP);
    let id = Vec3::new(idx, idy, idz).length();

    let cell = Vec3::new(fmod(p.x, c), fmod(p.y, c), fmod(p.z, c)) - Vec3::splat(0.5 * c);
    let mut q = cell;
    let mut r = cell;

    let rotation = id * 5.0 + time * 2.0;

    // Even columns carry a pair of tori stacked in y
    let paired = fmod(idx, 2.0) == 0.0;
    if paired {
        q.y += 1.5;
        r.y -= 1.5;
    }

    let shape = twisted_torus(spin(q, rotation), INTENSITY, time);
    if paired {
        shape.min(twisted_torus(spin(r, rotation), INTENSITY, time))
    } else {
        shape
    }
}

/// March from `pos` along `dir`, returning where the march stopped
pub fn cast_ray(mut pos: Vec3, dir: Vec3, time: f32) -> Vec3 {
    for _ in 0..MAX_MARCHING_STEPS {
        let dist = scene_sdf(pos, time);
        if dist < EPSILON {
            return pos;
        }
        pos += dir * dist;
    }
    pos
}

fn point_light(pos: Vec3, light: Vec3) -> f32 {
    let d = (light - pos).length();
    (3.0 / (d * d)).max(0.0)
}

/// Camera position and ray direction for one pixel
pub fn camera_ray(frag: Vec2, resolution: Vec2, time: f32, pan: Vec2) -> (Vec3, Vec3) {
    let screen = frag.div_elem(resolution) * 2.0 - Vec2::splat(1.0);
    let plane_v = resolution.y / resolution.x * 2.0;

    let mut camera = CAMERA_START;
    let mut ray = Vec3::new(screen.x * 2.0, screen.y * plane_v, 1.0).normalize();

    let cam_yz = Vec2::new(camera.y, camera.z).rotate(LOOK.y);
    let ray_yz = Vec2::new(ray.y, ray.z).rotate(LOOK.y);
    camera = Vec3::new(camera.x, cam_yz.x, cam_yz.y);
    ray = Vec3::new(ray.x, ray_yz.x, ray_yz.y);

    let yaw = LOOK.x + pan.x * PAN_YAW;
    let cam_xz = Vec2::new(camera.x, camera.z).rotate(yaw);
    let ray_xz = Vec2::new(ray.x, ray.z).rotate(yaw);
    camera = Vec3::new(cam_xz.x, camera.y, cam_xz.y);
    ray = Vec3::new(ray_xz.x, ray.y, ray_xz.y);

    camera.z += time;
    camera.y += time;
    camera.x += pan.x * PAN_SHIFT;
    camera.y += pan.y * PAN_SHIFT;

    (camera, ray)
}

/// Color of pixel `frag` on a surface of `resolution` pixels
pub fn color(frag: Vec2, resolution: Vec2, time: f32, pan: Vec2) -> Rgba {
    let (camera, ray) = camera_ray(frag, resolution, time, pan);
    let hit = cast_ray(camera, ray, time);

    let base = BASE_COLOR + ray * 0.02;
    let lighting = point_light(hit, camera).min(MAX_LIGHT);
    let lit = base * (2.0 * lighting * 2.0);

    Rgba::opaque(lit.map(|c| c.max(0.0).sqrt()))
}
