//! Animation driver
//!
//! Owns the render surface, the clock and the pan state, and turns host
//! notifications into uniform uploads and draws.
//!
//! ```text
//!            new(Ok)                 hidden
//!   ─────────────────▶ Active ◀──────────────▶ Paused
//!                        │        visible        │
//!   new(Err) ─▶ Fallback │                       │
//!   link fail ─▶ Degraded└──── destroy() ────────┴──▶ Destroyed
//! ```
//!
//! `Fallback` and `Degraded` never schedule a tick. Every handler is a
//! no-op once the driver is destroyed.

use crate::clock::AnimationClock;
use crate::config::RendererConfig;
use crate::error::{RendererError, RendererResult};
use crate::host::{FrameId, GpuSurface, Host, ProgramId, ShaderStage, SurfaceSize};
use crate::math::Vec2;
use crate::pan::PanState;
use crate::shaders::VERTEX_SHADER;
use crate::uniforms::Uniforms;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Uploading and drawing every tick
    Active,
    /// Document hidden; ticks keep coming but do nothing
    Paused,
    /// Shader program failed to build; the surface stays blank
    Degraded,
    /// No drawing context; the page shows the static fallback
    Fallback,
    Destroyed,
}

pub struct AnimationDriver<H: Host, S: GpuSurface> {
    config: RendererConfig,
    host: H,
    surface: Option<S>,
    program: Option<ProgramId>,
    clock: AnimationClock,
    pan: PanState,
    surface_size: SurfaceSize,
    visible: bool,
    state: DriverState,
    pending_frame: Option<FrameId>,
    surface_attached: bool,
    time: f32,
}

impl<H: Host, S: GpuSurface> AnimationDriver<H, S> {
    /// Start the renderer
    ///
    /// `surface` is the outcome of asking the host for a WebGL2-capable
    /// surface. An error switches permanently to the static fallback.
    pub fn new(config: RendererConfig, host: H, surface: RendererResult<S>) -> Self {
        let clock = AnimationClock::new(host.now_ms(), config.time_offset_secs, config.time_rate);
        let pan = PanState::new(config.pan_speed);
        let time = clock.last() as f32;

        let mut driver = Self {
            config,
            host,
            surface: None,
            program: None,
            clock,
            pan,
            surface_size: SurfaceSize::default(),
            visible: true,
            state: DriverState::Active,
            pending_frame: None,
            surface_attached: true,
            time,
        };

        match surface {
            Ok(surface) => driver.start(surface),
            Err(e) => driver.enter_fallback(&e),
        }
        driver
    }

    fn start(&mut self, mut surface: S) {
        match build_program(&mut surface, self.config.scene.fragment_source()) {
            Ok(program) => {
                tracing::info!(scene = self.config.scene.id(), "background renderer started");
                self.surface = Some(surface);
                self.program = Some(program);
                self.on_resize();
                self.schedule();
            }
            Err(e) => {
                tracing::error!(error = %e, "background shader program unavailable");
                self.surface = Some(surface);
                self.state = DriverState::Degraded;
            }
        }
    }

    fn enter_fallback(&mut self, reason: &RendererError) {
        tracing::info!(%reason, "WebGL2 unavailable, using static background");
        self.detach_surface();
        self.host.apply_fallback(&self.config.fallback);
        self.state = DriverState::Fallback;
    }

    /// One animation frame
    pub fn tick(&mut self) {
        // The frame that called us has fired
        self.pending_frame = None;

        match self.state {
            DriverState::Active => {}
            DriverState::Paused => {
                self.schedule();
                return;
            }
            DriverState::Degraded | DriverState::Fallback | DriverState::Destroyed => return,
        }

        self.time = self.clock.elapsed(self.host.now_ms()) as f32;
        self.pan.advance();

        // Zero-sized surface: keep ticking, upload and draw nothing
        if self.surface_size.is_empty() {
            self.schedule();
            return;
        }

        if let (Some(surface), Some(program)) = (self.surface.as_mut(), self.program) {
            let uniforms = Uniforms::new(self.time, self.surface_size, self.pan.current());
            surface.set_uniforms(program, &uniforms);
            if let Err(e) = surface.draw(program) {
                tracing::warn!(error = %e, "frame skipped");
            }
        }

        self.schedule();
    }

    /// Viewport changed size
    pub fn on_resize(&mut self) {
        if !matches!(self.state, DriverState::Active | DriverState::Paused) {
            return;
        }
        let viewport = self.host.viewport();
        let size = self.config.surface_size(viewport);
        self.surface_size = size;

        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size);
            // A paused driver uploads the whole block on its next active tick;
            // an empty size is never uploaded
            if self.state == DriverState::Active && !size.is_empty() {
                if let Some(program) = self.program {
                    let uniforms = Uniforms::new(self.time, size, self.pan.current());
                    surface.set_uniforms(program, &uniforms);
                }
            }
        }
        tracing::debug!(width = size.width, height = size.height, "surface resized");
    }

    /// Document moved to the foreground (`true`) or background (`false`)
    pub fn on_visibility_change(&mut self, visible: bool) {
        self.visible = visible;
        self.state = match (self.state, visible) {
            (DriverState::Active, false) => DriverState::Paused,
            (DriverState::Paused, true) => DriverState::Active,
            (state, _) => state,
        };
    }

    /// Navigation to `route` is starting
    pub fn on_navigate(&mut self, route: &str) {
        if self.state == DriverState::Destroyed {
            return;
        }
        let direction = self.config.directions.direction(route);
        self.pan.retarget(direction, self.config.pan_mode);
        tracing::debug!(route, x = direction.x, y = direction.y, "pan retargeted");
    }

    /// Stop ticking and remove the surface
    ///
    /// Safe to call any number of times.
    pub fn destroy(&mut self) {
        if self.state == DriverState::Destroyed {
            return;
        }
        if let Some(frame) = self.pending_frame.take() {
            self.host.cancel_frame(frame);
        }
        self.detach_surface();
        self.surface = None;
        self.program = None;
        self.state = DriverState::Destroyed;
    }

    fn schedule(&mut self) {
        if self.pending_frame.is_none() {
            self.pending_frame = self.host.request_frame();
        }
    }

    fn detach_surface(&mut self) {
        if self.surface_attached {
            self.host.remove_surface();
            self.surface_attached = false;
        }
    }

    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn pan(&self) -> &PanState {
        &self.pan
    }

    #[inline]
    pub fn pan_current(&self) -> Vec2 {
        self.pan.current()
    }

    #[inline]
    pub fn surface_size(&self) -> SurfaceSize {
        self.surface_size
    }

    /// Animation time uploaded with the last drawn frame
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending_frame
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[inline]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}

/// Compile both stages and link them
fn build_program<S: GpuSurface>(surface: &mut S, fragment: &str) -> RendererResult<ProgramId> {
    let vs = surface.compile(ShaderStage::Vertex, VERTEX_SHADER)?;
    let fs = surface.compile(ShaderStage::Fragment, fragment)?;
    surface.link(vs, fs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockHost, RecordingSurface};

    fn active() -> AnimationDriver<MockHost, RecordingSurface> {
        AnimationDriver::new(
            RendererConfig::raymarch(),
            MockHost::new(),
            Ok(RecordingSurface::new()),
        )
    }

    #[test]
    fn test_starts_active_with_one_frame_pending() {
        let driver = active();
        assert_eq!(driver.state(), DriverState::Active);
        assert_eq!(driver.host().frames_requested(), 1);
        assert!(driver.pending_frame().is_some());
    }

    #[test]
    fn test_start_compiles_vertex_then_fragment() {
        let driver = active();
        let surface = driver.surface().unwrap();
        let stages: Vec<ShaderStage> = surface.compiled().iter().map(|(s, _)| *s).collect();
        assert_eq!(stages, vec![ShaderStage::Vertex, ShaderStage::Fragment]);
        assert_eq!(surface.compiled()[1].1, RendererConfig::raymarch().scene.fragment_source());
        assert_eq!(surface.links(), 1);
    }

    #[test]
    fn test_tick_uploads_then_draws_and_reschedules() {
        let mut driver = active();
        driver.host_mut().advance_time(1000.0);
        driver.tick();

        let surface = driver.surface().unwrap();
        assert_eq!(surface.draws(), 1);
        let last = surface.last_uniforms().unwrap();
        // (1 s + 300 s) * 0.015
        assert!((last.time - 4.515).abs() < 1e-4);
        assert_eq!(driver.host().frames_requested(), 2);
    }

    #[test]
    fn test_hidden_ticks_do_nothing_but_reschedule() {
        let mut driver = active();
        let uploads = driver.surface().unwrap().uploads().len();
        driver.on_visibility_change(false);
        assert_eq!(driver.state(), DriverState::Paused);

        for _ in 0..10 {
            driver.tick();
        }
        let surface = driver.surface().unwrap();
        assert_eq!(surface.uploads().len(), uploads);
        assert_eq!(surface.draws(), 0);
        assert_eq!(driver.host().frames_requested(), 11);
        assert_eq!(driver.pan_current(), Vec2::ZERO);
    }

    #[test]
    fn test_visibility_in_terminal_states_is_ignored() {
        let mut driver = active();
        driver.destroy();
        driver.on_visibility_change(false);
        driver.on_visibility_change(true);
        assert_eq!(driver.state(), DriverState::Destroyed);
        assert!(driver.is_visible());
    }

    #[test]
    fn test_navigate_after_destroy_is_ignored() {
        let mut driver = active();
        driver.destroy();
        driver.on_navigate("/technology");
        assert_eq!(driver.pan().target(), Vec2::ZERO);
    }

    #[test]
    fn test_link_failure_degrades() {
        let driver = AnimationDriver::new(
            RendererConfig::raymarch(),
            MockHost::new(),
            Ok(RecordingSurface::new().failing_link()),
        );
        assert_eq!(driver.state(), DriverState::Degraded);
        assert_eq!(driver.host().frames_requested(), 0);
        assert_eq!(driver.surface().unwrap().draws(), 0);
        // The surface stays on the page, blank
        assert_eq!(driver.host().surface_removals(), 0);
    }

    #[test]
    fn test_compile_failure_stops_before_link() {
        let driver = AnimationDriver::new(
            RendererConfig::rings(),
            MockHost::new(),
            Ok(RecordingSurface::new().failing_compile(ShaderStage::Fragment)),
        );
        assert_eq!(driver.state(), DriverState::Degraded);
        assert_eq!(driver.surface().unwrap().links(), 0);
    }

    #[test]
    fn test_draw_errors_do_not_stop_the_loop() {
        let mut driver = AnimationDriver::new(
            RendererConfig::raymarch(),
            MockHost::new(),
            Ok(RecordingSurface::new().failing_draws()),
        );
        driver.tick();
        driver.tick();
        assert_eq!(driver.state(), DriverState::Active);
        assert_eq!(driver.host().frames_requested(), 3);
    }

    #[test]
    fn test_empty_surface_skips_upload_and_draw() {
        let mut driver = active();
        let uploads = driver.surface().unwrap().uploads().len();

        // floor(3 * 0.25) = 0
        driver.host_mut().set_viewport(crate::host::Viewport::new(3.0, 800.0));
        driver.on_resize();
        driver.tick();
        driver.tick();

        let surface = driver.surface().unwrap();
        assert!(driver.surface_size().is_empty());
        assert_eq!(surface.uploads().len(), uploads);
        assert_eq!(surface.draws(), 0);
        assert!(driver.pending_frame().is_some());

        driver.host_mut().set_viewport(crate::host::Viewport::new(400.0, 800.0));
        driver.on_resize();
        driver.tick();
        let surface = driver.surface().unwrap();
        assert_eq!(surface.last_uniforms().unwrap().resolution, [100.0, 200.0]);
        assert_eq!(surface.draws(), 1);
    }
}
