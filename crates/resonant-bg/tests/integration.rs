//! Integration tests for AnimationDriver
//!
//! These tests drive the renderer through its host seams:
//! - Startup, fallback and degraded paths
//! - Resize, visibility and navigation notifications
//! - Pan smoothing over many ticks
//! - Teardown
//! - Full frames through the software rasterizer

use resonant_bg::mock::{MockHost, RecordingSurface};
use resonant_bg::{
    AnimationDriver, DriverState, PageDirectionTable, PanMode, RendererConfig, RendererError,
    Scene, SoftwareSurface, SurfaceSize, Vec2, Viewport,
};

fn recording(config: RendererConfig, host: MockHost) -> AnimationDriver<MockHost, RecordingSurface> {
    AnimationDriver::new(config, host, Ok(RecordingSurface::new()))
}

// =============================================================================
// Resize Tests
// =============================================================================

#[test]
fn test_startup_sizes_surface_from_viewport() {
    let host = MockHost::new().with_viewport(Viewport::new(1920.0, 1080.0));
    let driver = recording(RendererConfig::raymarch(), host);

    assert_eq!(driver.surface_size(), SurfaceSize::new(480, 270));
    let surface = driver.surface().unwrap();
    assert_eq!(surface.sizes(), &[SurfaceSize::new(480, 270)]);
    assert_eq!(surface.last_uniforms().unwrap().resolution, [480.0, 270.0]);
}

#[test]
fn test_resize_floors_and_uploads_exact_resolution() {
    let mut driver = recording(RendererConfig::raymarch(), MockHost::new());

    driver.host_mut().set_viewport(Viewport::new(1277.0, 719.0));
    driver.on_resize();

    // floor(1277 * 0.25) = 319, floor(719 * 0.25) = 179
    let expected = SurfaceSize::new(319, 179);
    assert_eq!(driver.surface_size(), expected);
    let surface = driver.surface().unwrap();
    assert_eq!(surface.sizes().last(), Some(&expected));
    assert_eq!(surface.last_uniforms().unwrap().resolution, [319.0, 179.0]);

    driver.tick();
    let surface = driver.surface().unwrap();
    assert_eq!(surface.last_uniforms().unwrap().resolution, [319.0, 179.0]);
}

#[test]
fn test_resize_applies_device_pixel_ratio_when_configured() {
    let host = MockHost::new()
        .with_viewport(Viewport::new(1366.0, 768.0).with_device_pixel_ratio(1.5));
    let driver = recording(RendererConfig::rings(), host);

    // 0.5 * 1.5 = 0.75
    assert_eq!(driver.surface_size(), SurfaceSize::new(1024, 576));
}

#[test]
fn test_every_resize_is_handled() {
    let mut driver = recording(RendererConfig::raymarch(), MockHost::new());
    for w in [800.0, 801.0, 802.0, 803.0] {
        driver.host_mut().set_viewport(Viewport::new(w, 600.0));
        driver.on_resize();
    }
    // One from startup plus one per notification, no debouncing
    assert_eq!(driver.surface().unwrap().sizes().len(), 5);
}

#[test]
fn test_resize_while_hidden_defers_upload() {
    let mut driver = recording(RendererConfig::raymarch(), MockHost::new());
    driver.on_visibility_change(false);
    let uploads = driver.surface().unwrap().uploads().len();

    driver.host_mut().set_viewport(Viewport::new(400.0, 200.0));
    driver.on_resize();
    assert_eq!(driver.surface().unwrap().uploads().len(), uploads);
    assert_eq!(driver.surface_size(), SurfaceSize::new(100, 50));

    driver.on_visibility_change(true);
    driver.tick();
    let last = *driver.surface().unwrap().last_uniforms().unwrap();
    assert_eq!(last.resolution, [100.0, 50.0]);
}

// =============================================================================
// Visibility Tests
// =============================================================================

#[test]
fn test_hidden_document_never_uploads_or_draws() {
    let mut driver = recording(RendererConfig::raymarch(), MockHost::new());
    let uploads_before = driver.surface().unwrap().uploads().len();

    driver.on_visibility_change(false);
    for _ in 0..250 {
        driver.host_mut().advance_time(16.0);
        driver.tick();
    }

    let surface = driver.surface().unwrap();
    assert_eq!(surface.uploads().len(), uploads_before);
    assert_eq!(surface.draws(), 0);
    assert_eq!(driver.state(), DriverState::Paused);
    // Ticks keep being scheduled while paused
    assert!(driver.pending_frame().is_some());
}

#[test]
fn test_resuming_uploads_and_draws_on_next_tick() {
    let mut driver = recording(RendererConfig::raymarch(), MockHost::new());
    driver.on_visibility_change(false);
    driver.tick();
    driver.tick();

    driver.on_visibility_change(true);
    assert_eq!(driver.state(), DriverState::Active);
    let uploads_before = driver.surface().unwrap().uploads().len();

    driver.tick();
    let surface = driver.surface().unwrap();
    assert_eq!(surface.uploads().len(), uploads_before + 1);
    assert_eq!(surface.draws(), 1);
}

#[test]
fn test_time_keeps_running_while_hidden() {
    let mut config = RendererConfig::rings();
    config.time_offset_secs = 0.0;
    config.time_rate = 1.0;
    let mut driver = recording(config, MockHost::new());

    driver.on_visibility_change(false);
    driver.host_mut().advance_time(5000.0);
    driver.tick();
    driver.on_visibility_change(true);
    driver.tick();

    // The clock is wall time, not accumulated active time
    assert!((driver.elapsed() - 5.0).abs() < 1e-4);
}

// =============================================================================
// Navigation Tests
// =============================================================================

#[test]
fn test_navigate_unmapped_route_targets_origin() {
    let mut driver = recording(RendererConfig::rings(), MockHost::new());
    driver.on_navigate("/technology");
    driver.on_navigate("/nowhere");
    assert_eq!(driver.pan().target(), Vec2::ZERO);
}

#[test]
fn test_navigate_mapped_route_targets_table_value() {
    let mut rings = recording(RendererConfig::rings(), MockHost::new());
    rings.on_navigate("/technology");
    assert_eq!(rings.pan().target(), Vec2::new(0.6, 0.0));

    // Additive mode from rest lands on the table value too
    let mut raymarch = recording(RendererConfig::raymarch(), MockHost::new());
    raymarch.on_navigate("/technology");
    assert_eq!(raymarch.pan().target(), Vec2::new(0.4, 0.0));
}

#[test]
fn test_navigate_additive_accumulates_from_current() {
    let mut config = RendererConfig::raymarch();
    config.pan_speed = 1.0;
    let mut driver = recording(config, MockHost::new());

    driver.on_navigate("/technology");
    driver.tick(); // current jumps to target with speed 1
    driver.on_navigate("/technology");
    assert!((driver.pan().target().x - 0.8).abs() < 1e-6);
}

#[test]
fn test_navigate_empty_route_is_unmapped() {
    // "/" is mapped in the raymarch table; "" must not alias it
    let mut driver = recording(RendererConfig::raymarch(), MockHost::new());
    driver.on_navigate("");
    assert_eq!(driver.pan().target(), Vec2::ZERO);
}

#[test]
fn test_navigate_empty_route_stops_additive_drift() {
    let mut config = RendererConfig::raymarch();
    config.pan_speed = 0.5;
    let mut driver = recording(config, MockHost::new());

    driver.on_navigate("/technology");
    driver.tick();
    let current = driver.pan_current();
    assert!((current.x - 0.2).abs() < 1e-6);

    driver.on_navigate("");
    assert_eq!(driver.pan().target(), current);
}

#[test]
fn test_navigate_does_not_move_current_immediately() {
    let mut driver = recording(RendererConfig::rings(), MockHost::new());
    driver.on_navigate("/kits");
    assert_eq!(driver.pan_current(), Vec2::ZERO);
}

// =============================================================================
// Pan Smoothing Tests
// =============================================================================

#[test]
fn test_pan_converges_over_ticks() {
    let mut config = RendererConfig::rings();
    config.pan_mode = PanMode::Absolute;
    config.directions = PageDirectionTable::new().with("/right", Vec2::new(1.0, 0.0));
    let mut driver = recording(config, MockHost::new());

    driver.on_navigate("/right");
    for k in 1..=100 {
        driver.tick();
        let expected = 1.0 - 0.96f32.powi(k);
        assert!((driver.pan_current().x - expected).abs() < 1e-5, "tick {k}");
    }
    assert!(driver.pan_current().x > 0.98);

    let uploaded = driver.surface().unwrap().last_uniforms().unwrap().pan;
    assert_eq!(uploaded, [driver.pan_current().x, driver.pan_current().y]);
}

// =============================================================================
// Fallback and Degraded Tests
// =============================================================================

#[test]
fn test_missing_context_falls_back_to_static() {
    let driver: AnimationDriver<MockHost, RecordingSurface> = AnimationDriver::new(
        RendererConfig::raymarch(),
        MockHost::new(),
        Err(RendererError::context_unavailable("webgl2 disabled")),
    );

    assert_eq!(driver.state(), DriverState::Fallback);
    assert_eq!(driver.host().surface_removals(), 1);
    assert_eq!(driver.host().frames_requested(), 0);
    assert_eq!(
        driver.host().fallback().map(|s| s.background.as_str()),
        Some("#0a0a0a")
    );
}

#[test]
fn test_fallback_ignores_every_notification() {
    let mut driver: AnimationDriver<MockHost, RecordingSurface> = AnimationDriver::new(
        RendererConfig::rings(),
        MockHost::new(),
        Err(RendererError::context_unavailable("webgl2 disabled")),
    );

    driver.tick();
    driver.on_resize();
    driver.on_visibility_change(false);
    driver.on_visibility_change(true);

    assert_eq!(driver.state(), DriverState::Fallback);
    assert_eq!(driver.host().frames_requested(), 0);
    assert_eq!(driver.surface_size(), SurfaceSize::default());
    assert!(driver.host().fallback().unwrap().animation.is_some());
}

#[test]
fn test_destroy_is_idempotent_after_fallback() {
    let mut driver: AnimationDriver<MockHost, RecordingSurface> = AnimationDriver::new(
        RendererConfig::raymarch(),
        MockHost::new(),
        Err(RendererError::context_unavailable("webgl2 disabled")),
    );

    driver.destroy();
    driver.destroy();

    assert_eq!(driver.state(), DriverState::Destroyed);
    assert_eq!(driver.host().surface_removals(), 1);
    assert!(driver.host().cancelled().is_empty());
    assert_eq!(driver.host().frames_requested(), 0);
}

#[test]
fn test_degraded_renderer_never_ticks() {
    let mut driver = AnimationDriver::new(
        RendererConfig::raymarch(),
        MockHost::new(),
        Ok(RecordingSurface::new().failing_link()),
    );
    for _ in 0..5 {
        driver.tick();
    }
    assert_eq!(driver.state(), DriverState::Degraded);
    assert_eq!(driver.host().frames_requested(), 0);
    assert!(driver.surface().unwrap().uploads().is_empty());
}

// =============================================================================
// Teardown Tests
// =============================================================================

#[test]
fn test_destroy_cancels_pending_frame_and_removes_surface() {
    let mut driver = recording(RendererConfig::raymarch(), MockHost::new());
    let pending = driver.pending_frame().unwrap();

    driver.destroy();

    assert_eq!(driver.host().cancelled(), &[pending]);
    assert_eq!(driver.host().surface_removals(), 1);
    assert!(driver.pending_frame().is_none());
    assert!(driver.surface().is_none());
}

#[test]
fn test_destroy_twice_is_safe() {
    let mut driver = recording(RendererConfig::raymarch(), MockHost::new());
    driver.destroy();
    driver.destroy();
    assert_eq!(driver.host().cancelled().len(), 1);
    assert_eq!(driver.host().surface_removals(), 1);
}

#[test]
fn test_no_ticks_after_destroy() {
    let mut driver = recording(RendererConfig::raymarch(), MockHost::new());
    driver.destroy();
    let requested = driver.host().frames_requested();

    driver.tick();
    driver.on_resize();
    assert_eq!(driver.host().frames_requested(), requested);
    assert!(driver.pending_frame().is_none());
}

#[test]
fn test_host_without_scheduler_still_draws_once() {
    let mut driver = recording(RendererConfig::raymarch(), MockHost::new().without_scheduling());
    assert!(driver.pending_frame().is_none());
    driver.tick();
    assert_eq!(driver.surface().unwrap().draws(), 1);
    assert!(driver.pending_frame().is_none());
}

// =============================================================================
// Clock Tests
// =============================================================================

#[test]
fn test_elapsed_time_starts_at_offset_and_never_decreases() {
    let mut driver = recording(RendererConfig::raymarch(), MockHost::with_time(10_000.0));
    assert!((driver.elapsed() - 4.5).abs() < 1e-4);

    driver.host_mut().set_time(12_000.0);
    driver.tick();
    let t1 = driver.elapsed();
    assert!((t1 - 302.0 * 0.015).abs() < 1e-4);

    driver.host_mut().set_time(11_000.0);
    driver.tick();
    assert!(driver.elapsed() >= t1);
}

// =============================================================================
// Software Rendering Tests
// =============================================================================

fn software(scene: Scene) -> AnimationDriver<MockHost, SoftwareSurface> {
    let mut config = RendererConfig::preset(scene);
    config.resolution_scale = 0.5;
    config.scale_with_device_pixel_ratio = false;
    let host = MockHost::new().with_viewport(Viewport::new(64.0, 36.0));
    AnimationDriver::new(config, host, Ok(SoftwareSurface::new()))
}

#[test]
fn test_software_frame_matches_reference_field() {
    for scene in Scene::all() {
        let mut driver = software(*scene);
        driver.on_navigate("/technology");
        driver.host_mut().advance_time(2000.0);
        driver.tick();

        let surface = driver.surface().unwrap();
        assert_eq!(surface.size(), SurfaceSize::new(32, 18));
        assert_eq!(surface.frames_drawn(), 1);
        assert!(surface.pixels().chunks_exact(4).all(|p| p[3] == 255));

        let expected = scene
            .evaluate(
                Vec2::new(10.5, 18.0 - 4.0 - 0.5),
                Vec2::new(32.0, 18.0),
                driver.elapsed(),
                driver.pan_current(),
            )
            .to_rgba8();
        assert_eq!(surface.pixel(10, 4), Some(expected), "{scene:?}");
    }
}

#[test]
fn test_software_frames_are_deterministic() {
    let mut a = software(Scene::Rings);
    let mut b = software(Scene::Rings);
    for driver in [&mut a, &mut b] {
        driver.host_mut().advance_time(1234.0);
        driver.tick();
    }
    assert_eq!(a.surface().unwrap().pixels(), b.surface().unwrap().pixels());
}

#[test]
fn test_software_surface_rejects_foreign_fragment() {
    use resonant_bg::{GpuSurface, ShaderStage};

    let mut surface = SoftwareSurface::new();
    let result = surface.compile(ShaderStage::Fragment, "@fragment fn fs_main() {}");
    assert!(matches!(result, Err(RendererError::ShaderCompile { .. })));
}
