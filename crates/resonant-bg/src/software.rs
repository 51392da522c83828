//! CPU rasterizer for the built-in scenes
//!
//! Evaluates the reference color field for every pixel into an RGBA8
//! buffer. It cannot run arbitrary WGSL: fragment stages are matched
//! against the built-in scene sources and anything else fails to compile.
//! Rows are stored top to bottom, like a canvas.

use crate::error::{RendererError, RendererResult};
use crate::host::{GpuSurface, ProgramId, ShaderId, ShaderStage, SurfaceSize};
use crate::math::Vec2;
use crate::scene::Scene;
use crate::uniforms::Uniforms;

/// A compiled stage: vertex stages carry no scene
#[derive(Clone, Copy, Debug)]
struct CompiledStage {
    stage: ShaderStage,
    scene: Option<Scene>,
}

#[derive(Default)]
pub struct SoftwareSurface {
    size: SurfaceSize,
    pixels: Vec<u8>,
    stages: Vec<CompiledStage>,
    programs: Vec<Scene>,
    uniforms: Uniforms,
    frames: u64,
}

impl SoftwareSurface {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// RGBA8 pixels, row-major, top row first
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y` (row 0 is the top)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        self.pixels
            .get(i..i + 4)
            .and_then(|p| p.try_into().ok())
    }

    #[inline]
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Uniforms the next draw will use
    #[inline]
    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    fn stage(&self, id: ShaderId) -> Option<CompiledStage> {
        self.stages.get(id.0 as usize).copied()
    }
}

impl GpuSurface for SoftwareSurface {
    fn compile(&mut self, stage: ShaderStage, source: &str) -> RendererResult<ShaderId> {
        if source.trim().is_empty() {
            return Err(RendererError::compile(stage, "empty source"));
        }
        let scene = match stage {
            ShaderStage::Vertex => {
                if !source.contains("fn vs_main") {
                    return Err(RendererError::compile(stage, "missing vs_main entry point"));
                }
                None
            }
            ShaderStage::Fragment => Some(Scene::from_fragment_source(source).ok_or_else(|| {
                RendererError::compile(stage, "software backend only runs built-in scenes")
            })?),
        };
        self.stages.push(CompiledStage { stage, scene });
        Ok(ShaderId(self.stages.len() as u32 - 1))
    }

    fn link(&mut self, vertex: ShaderId, fragment: ShaderId) -> RendererResult<ProgramId> {
        let vs = self
            .stage(vertex)
            .ok_or_else(|| RendererError::link(format!("unknown shader {}", vertex.0)))?;
        let fs = self
            .stage(fragment)
            .ok_or_else(|| RendererError::link(format!("unknown shader {}", fragment.0)))?;

        if vs.stage != ShaderStage::Vertex {
            return Err(RendererError::link("first shader is not a vertex stage"));
        }
        let scene = match (fs.stage, fs.scene) {
            (ShaderStage::Fragment, Some(scene)) => scene,
            _ => return Err(RendererError::link("second shader is not a fragment stage")),
        };

        self.programs.push(scene);
        Ok(ProgramId(self.programs.len() as u32 - 1))
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.pixel_count() * 4, 0);
    }

    fn set_uniforms(&mut self, _program: ProgramId, uniforms: &Uniforms) {
        self.uniforms = *uniforms;
    }

    fn draw(&mut self, program: ProgramId) -> RendererResult<()> {
        let scene = *self
            .programs
            .get(program.0 as usize)
            .ok_or_else(|| RendererError::surface(format!("unknown program {}", program.0)))?;
        if self.size.is_empty() {
            return Ok(());
        }

        let resolution = self.uniforms.resolution_vec();
        let pan = self.uniforms.pan_vec();
        let time = self.uniforms.time;
        let (w, h) = (self.size.width, self.size.height);

        for (i, px) in self.pixels.chunks_exact_mut(4).enumerate() {
            let x = (i as u32 % w) as f32;
            let row = (i as u32 / w) as f32;
            let frag = Vec2::new(x + 0.5, h as f32 - row - 0.5);
            px.copy_from_slice(&scene.evaluate(frag, resolution, time, pan).to_rgba8());
        }

        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaders::{SHADER_RINGS, VERTEX_SHADER};

    fn linked(scene: Scene) -> (SoftwareSurface, ProgramId) {
        let mut surface = SoftwareSurface::new();
        let vs = surface.compile(ShaderStage::Vertex, VERTEX_SHADER).unwrap();
        let fs = surface
            .compile(ShaderStage::Fragment, scene.fragment_source())
            .unwrap();
        let program = surface.link(vs, fs).unwrap();
        (surface, program)
    }

    #[test]
    fn test_rejects_unknown_fragment() {
        let mut surface = SoftwareSurface::new();
        let err = surface
            .compile(ShaderStage::Fragment, "@fragment fn fs_main() {}")
            .unwrap_err();
        assert!(matches!(
            err,
            RendererError::ShaderCompile {
                stage: ShaderStage::Fragment,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_source() {
        let mut surface = SoftwareSurface::new();
        assert!(surface.compile(ShaderStage::Vertex, "  \n").is_err());
    }

    #[test]
    fn test_link_checks_stage_order() {
        let mut surface = SoftwareSurface::new();
        let vs = surface.compile(ShaderStage::Vertex, VERTEX_SHADER).unwrap();
        let fs = surface.compile(ShaderStage::Fragment, SHADER_RINGS).unwrap();
        assert!(surface.link(fs, vs).is_err());
        assert!(surface.link(vs, ShaderId(42)).is_err());
        assert!(surface.link(vs, fs).is_ok());
    }

    #[test]
    fn test_draw_fills_every_pixel_opaque() {
        let (mut surface, program) = linked(Scene::Rings);
        let size = SurfaceSize::new(16, 9);
        surface.resize(size);
        surface.set_uniforms(program, &Uniforms::new(2.0, size, Vec2::ZERO));
        surface.draw(program).unwrap();

        assert_eq!(surface.pixels().len(), 16 * 9 * 4);
        assert!(surface.pixels().chunks_exact(4).all(|p| p[3] == 255));
        assert_eq!(surface.frames_drawn(), 1);
    }

    #[test]
    fn test_draw_matches_reference_field() {
        let (mut surface, program) = linked(Scene::Raymarch);
        let size = SurfaceSize::new(8, 6);
        let uniforms = Uniforms::new(4.5, size, Vec2::new(0.2, 0.1));
        surface.resize(size);
        surface.set_uniforms(program, &uniforms);
        surface.draw(program).unwrap();

        // Row 0 is the top, i.e. the highest gl_FragCoord.y
        let expected = Scene::Raymarch
            .evaluate(Vec2::new(2.5, 5.5), Vec2::new(8.0, 6.0), 4.5, Vec2::new(0.2, 0.1))
            .to_rgba8();
        assert_eq!(surface.pixel(2, 0), Some(expected));
        assert_eq!(surface.pixel(8, 0), None);
    }

    #[test]
    fn test_draw_unknown_program() {
        let mut surface = SoftwareSurface::new();
        assert!(surface.draw(ProgramId(0)).is_err());
    }
}
