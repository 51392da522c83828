/// Raymarched field of twisted tori, tinted dark orange
pub const SHADER_RAYMARCH: &str = r#"
struct Uniforms {
    time: f32,
    _pad0: f32,
    resolution: vec2<f32>,
    pan: vec2<f32>,
    _pad1: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

const MAX_MARCHING_STEPS: i32 = 35;
const EPSILON: f32 = 0.0001;
const TILE_PERIOD: f32 = 3.0;
const TILE_WRAP: f32 = 32.0;
const INTENSITY: f32 = 0.5;
const LOOK_YAW: f32 = 0.5;
const LOOK_PITCH: f32 = -0.2;
const PAN_YAW: f32 = 0.3;
const PAN_SHIFT: f32 = 2.0;
const MAX_LIGHT: f32 = 0.1;

// GLSL-style mod, sign follows the divisor
fn fmod1(x: f32, y: f32) -> f32 {
    return x - y * floor(x / y);
}

fn fmod3(x: vec3<f32>, y: f32) -> vec3<f32> {
    return x - y * floor(x / y);
}

fn rotate2d(v: vec2<f32>, a: f32) -> vec2<f32> {
    let c = cos(a);
    let s = sin(a);
    return vec2<f32>(v.x * c - v.y * s, v.y * c + v.x * s);
}

fn rotate_pair(p: vec2<f32>, a: f32) -> vec2<f32> {
    return cos(a) * p + sin(a) * vec2<f32>(p.y, -p.x);
}

fn sd_torus(p: vec3<f32>, t: vec2<f32>) -> f32 {
    let q = vec2<f32>(length(p.xz) - t.x, p.y);
    return length(q) - t.y;
}

fn twisted_torus(p: vec3<f32>, intensity: f32, time: f32) -> f32 {
    let c = cos(intensity * 1.5 * p.y);
    let s = sin((intensity + 0.5) * p.y);
    let m = mat2x2<f32>(c, -s, s, c);
    let q = vec3<f32>(m * p.xz, p.y);
    let radii = vec2<f32>(abs(sin(time * 0.1)) + 0.5 * (intensity * 0.2), intensity * 0.0001);
    return sd_torus(q, radii);
}

fn spin(p: vec3<f32>, rotation: f32) -> vec3<f32> {
    let xy = rotate_pair(p.xy, rotation);
    let xz = rotate_pair(vec2<f32>(xy.x, p.z), rotation * 0.1);
    return vec3<f32>(xz.x, xy.y, xz.y);
}

fn scene_sdf(p: vec3<f32>, time: f32) -> f32 {
    let c = TILE_PERIOD;
    let index = fmod3(floor(p / c), TILE_WRAP);
    let id = length(index);

    let cell = fmod3(p, c) - 0.5 * c;
    var q = cell;
    var r = cell;

    let rotation = id * 5.0 + time * 2.0;

    // Even columns carry a pair of tori stacked in y
    let paired = fmod1(index.x, 2.0) == 0.0;
    if (paired) {
        q.y += 1.5;
        r.y -= 1.5;
    }

    let shape = twisted_torus(spin(q, rotation), INTENSITY, time);
    if (paired) {
        return min(shape, twisted_torus(spin(r, rotation), INTENSITY, time));
    }
    return shape;
}

fn cast_ray(start: vec3<f32>, dir: vec3<f32>, time: f32) -> vec3<f32> {
    var pos = start;
    for (var i = 0; i < MAX_MARCHING_STEPS; i++) {
        let dist = scene_sdf(pos, time);
        if (dist < EPSILON) {
            return pos;
        }
        pos += dist * dir;
    }
    return pos;
}

fn point_light(pos: vec3<f32>, light: vec3<f32>) -> f32 {
    let d = length(light - pos);
    return max(0.0, 3.0 / (d * d));
}

@fragment
fn fs_main(@builtin(position) position: vec4<f32>) -> @location(0) vec4<f32> {
    let res = uniforms.resolution;
    let pan = uniforms.pan;
    let time = uniforms.time;

    // Bottom-left origin, like gl_FragCoord
    let frag = vec2<f32>(position.x, res.y - position.y);
    let screen = frag / res * 2.0 - 1.0;

    var camera = vec3<f32>(0.0, 0.0, -8.0);
    var ray = normalize(vec3<f32>(screen.x * 2.0, screen.y * (res.y / res.x * 2.0), 1.0));

    let cam_yz = rotate2d(camera.yz, LOOK_PITCH);
    let ray_yz = rotate2d(ray.yz, LOOK_PITCH);
    camera = vec3<f32>(camera.x, cam_yz);
    ray = vec3<f32>(ray.x, ray_yz);

    let yaw = LOOK_YAW + pan.x * PAN_YAW;
    let cam_xz = rotate2d(camera.xz, yaw);
    let ray_xz = rotate2d(ray.xz, yaw);
    camera = vec3<f32>(cam_xz.x, camera.y, cam_xz.y);
    ray = vec3<f32>(ray_xz.x, ray.y, ray_xz.y);

    camera.z += time;
    camera.y += time;
    camera.x += pan.x * PAN_SHIFT;
    camera.y += pan.y * PAN_SHIFT;

    let hit = cast_ray(camera, ray, time);

    var color = vec3<f32>(0.43, 0.12, 0.01) + ray * 0.02;
    let lighting = min(point_light(hit, camera), MAX_LIGHT);
    color = color * (2.0 * lighting * 2.0);
    color = sqrt(max(color, vec3<f32>(0.0)));

    return vec4<f32>(color, 1.0);
}
"#;
