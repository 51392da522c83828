/// Five emitters of layered radiating rings on a dark background
pub const SHADER_RINGS: &str = r#"
struct Uniforms {
    time: f32,
    _pad0: f32,
    resolution: vec2<f32>,
    pan: vec2<f32>,
    _pad1: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

const VIGNETTE: f32 = 0.55;

fn ring_layer(dist: f32, time: f32, speed: f32, spacing: f32, decay: f32, power: f32) -> f32 {
    let wave = sin((dist - time * speed) * spacing) * 0.5 + 0.5;
    return pow(wave, power) * exp(-dist * decay);
}

fn radiating_ring(uv: vec2<f32>, center: vec2<f32>, time: f32) -> f32 {
    let d = distance(uv, center);
    return ring_layer(d, time, 0.12, 18.0, 1.6, 8.0)
        + ring_layer(d, time, 0.07, 9.0, 1.1, 4.0)
        + ring_layer(d, time, 0.04, 4.5, 0.7, 2.0);
}

fn emitter(
    uv: vec2<f32>,
    time: f32,
    center: vec2<f32>,
    parallax: f32,
    tint: vec3<f32>,
    intensity: f32,
) -> vec3<f32> {
    let c = center + uniforms.pan * parallax;
    return tint * (radiating_ring(uv, c, time) * intensity);
}

@fragment
fn fs_main(@builtin(position) position: vec4<f32>) -> @location(0) vec4<f32> {
    let res = uniforms.resolution;
    let time = uniforms.time;

    let frag = vec2<f32>(position.x, res.y - position.y);
    let uv = (frag - res * 0.5) / res.y;

    var color = vec3<f32>(0.035, 0.018, 0.010);
    color += emitter(uv, time, vec2<f32>(0.0, 0.0), 0.10, vec3<f32>(1.0, 0.45, 0.10), 0.22);
    color += emitter(uv, time, vec2<f32>(-0.62, 0.34), 0.22, vec3<f32>(0.95, 0.35, 0.05), 0.12);
    color += emitter(uv, time, vec2<f32>(0.66, 0.30), 0.18, vec3<f32>(1.0, 0.55, 0.20), 0.10);
    color += emitter(uv, time, vec2<f32>(-0.52, -0.41), 0.26, vec3<f32>(0.85, 0.30, 0.05), 0.09);
    color += emitter(uv, time, vec2<f32>(0.57, -0.44), 0.30, vec3<f32>(0.90, 0.50, 0.15), 0.08);

    let vignette = max(0.0, 1.0 - length(uv) * VIGNETTE);
    let breathing = 0.92 + 0.08 * sin(time * 0.35);
    color = clamp(color * (vignette * breathing), vec3<f32>(0.0), vec3<f32>(1.0));

    return vec4<f32>(color, 1.0);
}
"#;
