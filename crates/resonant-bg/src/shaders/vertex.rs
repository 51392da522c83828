/// Fullscreen triangle shared by every scene
///
/// No vertex buffer: three invocations produce an oversized triangle that
/// covers clip space, and the fragment stage does all the work.
pub const VERTEX_SHADER: &str = r#"
struct VsOut {
    @builtin(position) position: vec4<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VsOut {
    var out: VsOut;

    // vertex 0: (-1, -1), vertex 1: (3, -1), vertex 2: (-1, 3)
    let x = f32(i32(vertex_index & 1u) * 4 - 1);
    let y = f32(i32(vertex_index >> 1u) * 4 - 1);

    out.position = vec4<f32>(x, y, 0.0, 1.0);
    return out;
}
"#;
