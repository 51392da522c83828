//! Test doubles for the host seams
//!
//! [`MockHost`] simulates time, viewport and frame scheduling without a
//! browser. [`RecordingSurface`] records every GPU call the driver makes and
//! can be told to fail compilation, linking or drawing.

use crate::config::FallbackStyle;
use crate::error::{RendererError, RendererResult};
use crate::host::{
    FrameId, GpuSurface, Host, ProgramId, ShaderId, ShaderStage, SurfaceSize, Viewport,
};
use crate::uniforms::Uniforms;

/// Mock host for unit testing
pub struct MockHost {
    /// Simulated monotonic time in milliseconds
    now_ms: f64,
    viewport: Viewport,
    next_frame: i32,
    requested: Vec<FrameId>,
    cancelled: Vec<FrameId>,
    surface_removals: usize,
    fallback: Option<FallbackStyle>,
    /// Refuse to schedule frames
    scheduling_disabled: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            viewport: Viewport::default(),
            next_frame: 1,
            requested: Vec::new(),
            cancelled: Vec::new(),
            surface_removals: 0,
            fallback: None,
            scheduling_disabled: false,
        }
    }

    /// Create a mock host with a specific starting time
    pub fn with_time(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Self::new()
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// A host whose frame scheduler always refuses
    pub fn without_scheduling(mut self) -> Self {
        self.scheduling_disabled = true;
        self
    }

    pub fn advance_time(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    pub fn set_time(&mut self, ms: f64) {
        self.now_ms = ms;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Total frames ever requested
    pub fn frames_requested(&self) -> usize {
        self.requested.len()
    }

    pub fn cancelled(&self) -> &[FrameId] {
        &self.cancelled
    }

    pub fn surface_removals(&self) -> usize {
        self.surface_removals
    }

    /// Fallback style applied to the page, if any
    pub fn fallback(&self) -> Option<&FallbackStyle> {
        self.fallback.as_ref()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MockHost {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> Option<FrameId> {
        if self.scheduling_disabled {
            return None;
        }
        let id = FrameId(self.next_frame);
        self.next_frame += 1;
        self.requested.push(id);
        Some(id)
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        self.cancelled.push(frame);
    }

    fn remove_surface(&mut self) {
        self.surface_removals += 1;
    }

    fn apply_fallback(&mut self, style: &FallbackStyle) {
        self.fallback = Some(style.clone());
    }
}

/// GPU surface that records calls instead of drawing
#[derive(Default)]
pub struct RecordingSurface {
    compiled: Vec<(ShaderStage, String)>,
    links: usize,
    sizes: Vec<SurfaceSize>,
    uploads: Vec<Uniforms>,
    draws: usize,
    fail_compile: Option<ShaderStage>,
    fail_link: bool,
    fail_draw: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every shader of `stage`
    pub fn failing_compile(mut self, stage: ShaderStage) -> Self {
        self.fail_compile = Some(stage);
        self
    }

    pub fn failing_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    /// Every draw returns a surface error
    pub fn failing_draws(mut self) -> Self {
        self.fail_draw = true;
        self
    }

    /// Stages and sources in compile order
    pub fn compiled(&self) -> &[(ShaderStage, String)] {
        &self.compiled
    }

    pub fn links(&self) -> usize {
        self.links
    }

    /// Sizes passed to `resize`, oldest first
    pub fn sizes(&self) -> &[SurfaceSize] {
        &self.sizes
    }

    pub fn uploads(&self) -> &[Uniforms] {
        &self.uploads
    }

    pub fn last_uniforms(&self) -> Option<&Uniforms> {
        self.uploads.last()
    }

    /// Successful draws
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl GpuSurface for RecordingSurface {
    fn compile(&mut self, stage: ShaderStage, source: &str) -> RendererResult<ShaderId> {
        if self.fail_compile == Some(stage) {
            return Err(RendererError::compile(stage, "rejected by recording surface"));
        }
        self.compiled.push((stage, source.to_string()));
        Ok(ShaderId(self.compiled.len() as u32 - 1))
    }

    fn link(&mut self, _vertex: ShaderId, _fragment: ShaderId) -> RendererResult<ProgramId> {
        if self.fail_link {
            return Err(RendererError::link("rejected by recording surface"));
        }
        self.links += 1;
        Ok(ProgramId(self.links as u32 - 1))
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.sizes.push(size);
    }

    fn set_uniforms(&mut self, _program: ProgramId, uniforms: &Uniforms) {
        self.uploads.push(*uniforms);
    }

    fn draw(&mut self, _program: ProgramId) -> RendererResult<()> {
        if self.fail_draw {
            return Err(RendererError::surface("rejected by recording surface"));
        }
        self.draws += 1;
        Ok(())
    }
}
