//! The scene engine: owns every animated part and composes frames.
//!
//! The engine is the single writer of [`ViewState`]. Each tick it advances
//! the clock, delivers deferred messages that came due, then advances the
//! streams, heart, platforms, star field, camera, dashboards and loading
//! sequence, in that order.

use crate::analytics::{dispatch, AnalyticsEvent, AnalyticsSink, TracingSink};
use crate::camera::{CameraInput, CameraRig};
use crate::config::{Density, EngineConfig};
use crate::decor::{CachePlatform, PlatformSide, StarField};
use crate::heart::HeartSphere;
use crate::loading::LoadingSequence;
use crate::stats::{DashboardSide, DashboardStats, LiveStats, RandomWalkStats, StatsSource};
use crate::stream::{ParticleStream, StreamLane};
use particlesway_core::{
    Anchor, Color, Command, Control, DeferredAction, EngineError, FrameClock, Light, Material,
    Overlay, Point2, PostEffect, Primitive, RenderBackend, RenderError, SceneFrame, SegmentIndex,
    Shape, State, Transform, Vec3, ViewMessage, ViewState, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Scene background.
const BACKGROUND: u32 = 0x09_0A_0F;

/// A change requested from the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Rebuild the lanes at a new density
    SetDensity(Density),
    /// Show or hide the dashboards
    ToggleDashboards,
    /// Expand or collapse one dashboard
    ToggleExpanded(DashboardSide),
    /// Turn camera auto-rotation on or off
    SetAutoRotate(bool),
    /// "Reset View"
    Reset,
}

/// How a frame reached the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderOutcome {
    /// The full scene was drawn
    Rendered,
    /// No drawing context; the loading placeholder was shown instead
    Placeholder,
}

/// A serializable summary of the engine state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    /// Seconds since start
    pub time: f64,
    /// Frames processed
    pub frame: u64,
    /// Selection state
    pub view: ViewState,
    /// Seconds until the exploded view reverts
    pub reversion_in: Option<f64>,
    /// Current density
    pub density: Density,
    /// Particles across all lanes
    pub particles: usize,
    /// Current segment scales
    pub segment_scales: [f32; SegmentIndex::COUNT],
    /// Camera azimuth in radians
    pub camera_azimuth: f32,
    /// Dashboard figures
    pub stats: LiveStats,
    /// Loading progress
    pub loading_percent: u8,
}

/// The ParticlesWay scene engine.
pub struct ParticlesWayEngine {
    config: EngineConfig,
    rng: StdRng,
    clock: FrameClock,
    view: ViewState,
    reversion: DeferredAction<ViewMessage>,
    streams: Vec<ParticleStream>,
    heart: HeartSphere,
    camera: CameraRig,
    platforms: [CachePlatform; 2],
    stars: StarField,
    stats: DashboardStats,
    loading: LoadingSequence,
    analytics: Box<dyn AnalyticsSink>,
    shut_down: bool,
}

impl std::fmt::Debug for ParticlesWayEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticlesWayEngine")
            .field("config", &self.config)
            .field("view", &self.view)
            .field("elapsed", &self.clock.elapsed())
            .field("streams", &self.streams.len())
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}

impl ParticlesWayEngine {
    /// Build an engine with simulated stats and tracing analytics.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let stats_source = config
            .seed
            .map_or_else(RandomWalkStats::from_entropy, |seed| {
                RandomWalkStats::seeded(seed.wrapping_add(1))
            });

        let streams = build_streams(config.particle_density, &mut rng);
        let stars = StarField::standard(&mut rng);

        info!(
            density = %config.particle_density,
            interactive = config.interactive,
            "engine created"
        );

        Self {
            heart: HeartSphere::new(config.smoothing),
            camera: CameraRig::new(config.auto_rotate, config.interactive),
            platforms: [
                CachePlatform::new(PlatformSide::Left),
                CachePlatform::new(PlatformSide::Right),
            ],
            stats: DashboardStats::new(stats_source),
            loading: LoadingSequence::new(),
            analytics: Box::new(TracingSink),
            clock: FrameClock::new(),
            view: ViewState::default(),
            reversion: DeferredAction::new(),
            shut_down: false,
            streams,
            stars,
            rng,
            config,
        }
    }

    /// Replace the dashboard figure source.
    #[must_use]
    pub fn with_stats_source(mut self, source: impl StatsSource + 'static) -> Self {
        self.stats = DashboardStats::new(source);
        self
    }

    /// Replace the analytics sink.
    #[must_use]
    pub fn with_analytics(mut self, sink: impl AnalyticsSink + 'static) -> Self {
        self.analytics = Box::new(sink);
        self
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Handle a click on segment `index`.
    ///
    /// Returns `Ok(false)` when the engine is not interactive.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSegment`] for an index outside 0..4 and
    /// [`EngineError::ShutDown`] after [`Self::shutdown`].
    pub fn handle_segment_click(&mut self, index: usize) -> Result<bool, EngineError> {
        self.ensure_running()?;
        if !self.config.interactive {
            debug!(segment = index, "click ignored: not interactive");
            return Ok(false);
        }
        let index = SegmentIndex::new(index)?;
        let command = self.heart.on_segment_select(index, &mut self.view);
        self.run_command(command);

        let segment = self.heart.segment(index);
        let (name, layer) = (segment.name, segment.description);
        info!(segment = index.get(), layer, "segment selected");
        self.track(
            "segment_click",
            Some(&json!({ "segment": index.get(), "name": name })),
        );
        Ok(true)
    }

    /// Map a screen click to a segment and handle it.
    ///
    /// Returns whether a segment was selected.
    pub fn click_at(&mut self, screen: Point2, viewport: Viewport) -> Result<bool, EngineError> {
        self.ensure_running()?;
        match self.pick_segment(screen, viewport) {
            Some(index) => self.handle_segment_click(index.get()),
            None => Ok(false),
        }
    }

    /// Segment under a screen point.
    #[must_use]
    pub fn pick_segment(&self, screen: Point2, viewport: Viewport) -> Option<SegmentIndex> {
        self.heart.pick(&self.camera.state(), screen, viewport)
    }

    /// Clear selection and explosion immediately, dropping any pending
    /// reversion.
    pub fn reset(&mut self) {
        if self.shut_down {
            return;
        }
        let _ = self.view.update(ViewMessage::Reset);
        if self.reversion.cancel().is_some() {
            debug!("pending reversion cancelled");
        }
        info!("view reset");
        self.track("reset_view", None);
    }

    /// Forward drag or zoom input to the camera.
    pub fn camera_input(&mut self, input: CameraInput) {
        if !self.shut_down {
            self.camera.apply_input(input);
        }
    }

    /// Apply a control-panel action.
    ///
    /// # Errors
    ///
    /// [`EngineError::ShutDown`] after [`Self::shutdown`].
    pub fn apply_control(&mut self, action: ControlAction) -> Result<(), EngineError> {
        self.ensure_running()?;
        match action {
            ControlAction::SetDensity(density) => {
                if density != self.config.particle_density {
                    self.config.particle_density = density;
                    self.streams = build_streams(density, &mut self.rng);
                    info!(%density, particles = self.particle_count(), "density changed");
                }
                self.track("density_change", Some(&json!(density.as_str())));
            }
            ControlAction::ToggleDashboards => {
                self.config.show_dashboards = !self.config.show_dashboards;
                debug!(visible = self.config.show_dashboards, "dashboards toggled");
                self.track(
                    "toggle_dashboards",
                    Some(&json!(self.config.show_dashboards)),
                );
            }
            ControlAction::ToggleExpanded(side) => {
                self.stats.toggle_expanded(side);
            }
            ControlAction::SetAutoRotate(enabled) => {
                self.config.auto_rotate = enabled;
                self.camera.set_auto_rotate(enabled);
                self.track("auto_rotate", Some(&json!(enabled)));
            }
            ControlAction::Reset => self.reset(),
        }
        Ok(())
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Advance to a host timestamp in milliseconds.
    pub fn tick_at(&mut self, now_ms: f64) {
        if self.shut_down {
            return;
        }
        self.clock.tick(now_ms);
        self.step();
    }

    /// Advance by an explicit delta in seconds.
    pub fn advance(&mut self, delta_secs: f64) {
        if self.shut_down {
            return;
        }
        self.clock.advance(delta_secs);
        self.step();
    }

    /// Apply one dashboard refresh now (hosts driving stats from their
    /// own timer).
    pub fn refresh_stats(&mut self) {
        if !self.shut_down {
            self.stats.refresh();
        }
    }

    fn step(&mut self) {
        let now = self.clock.elapsed();
        if let Some(message) = self.reversion.poll(now) {
            debug!(at = now, "exploded view ended");
            let follow_up = self.view.update(message);
            self.run_command(follow_up);
        }

        let delta = self.clock.delta() as f32;
        let elapsed = now as f32;
        for stream in &mut self.streams {
            stream.advance(delta, elapsed);
        }
        self.heart.tick(delta, elapsed, &self.view);
        for platform in &mut self.platforms {
            platform.tick(elapsed);
        }
        self.stars.tick(delta);
        self.camera.tick(delta, &self.view);

        // Deltas past the `Duration` range saturate.
        let dt = Duration::try_from_secs_f64(self.clock.delta()).unwrap_or(Duration::MAX);
        self.stats.advance(dt);
        self.loading.advance(dt);
    }

    fn run_command(&mut self, command: Command<ViewMessage>) {
        let now = self.clock.elapsed();
        for (delay, message) in command.into_deferred() {
            if self.reversion.schedule(now, delay, message).is_some() {
                debug!("previous reversion superseded");
            }
        }
    }

    /// Stop all timers. Later ticks and interactions are ignored.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.reversion.cancel();
        self.stats.stop();
        self.shut_down = true;
        info!(frames = self.clock.frame_count(), "engine shut down");
    }

    fn ensure_running(&self) -> Result<(), EngineError> {
        if self.shut_down {
            Err(EngineError::ShutDown)
        } else {
            Ok(())
        }
    }

    fn track(&mut self, action: &str, details: Option<&serde_json::Value>) {
        dispatch(
            self.analytics.as_mut(),
            &AnalyticsEvent::interaction(action, details),
        );
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Describe the current frame.
    #[must_use]
    pub fn compose(&self) -> SceneFrame {
        let mut primitives = vec![self.stars.primitive()];
        primitives.extend(self.heart.primitives(&self.view));
        for platform in &self.platforms {
            primitives.extend(platform.primitives());
        }
        for (i, stream) in self.streams.iter().enumerate() {
            primitives.push(Primitive::new(
                format!("lane-{i}"),
                Shape::PointCloud {
                    positions: stream.positions().to_vec(),
                    sizes: stream.sizes().to_vec(),
                },
                Transform::IDENTITY,
                Material::glowing(stream.lane().color, 1.0),
            ));
        }

        SceneFrame {
            time: self.clock.elapsed(),
            background: Color::from_rgb_u32(BACKGROUND),
            camera: self.camera.state(),
            lights: scene_lights(),
            primitives,
            effects: vec![
                PostEffect::Bloom {
                    intensity: 1.0,
                    luminance_threshold: 0.2,
                    luminance_smoothing: 0.9,
                },
                PostEffect::ChromaticAberration { offset: 0.0005 },
            ],
            overlays: self.overlays(),
        }
    }

    fn overlays(&self) -> Vec<Overlay> {
        let mut overlays = Vec::new();
        if self.config.show_dashboards {
            overlays.extend(self.stats.overlays());
        }
        if let Some(info) = self.heart.info_overlay(&self.view) {
            overlays.push(info);
        }
        if self.config.show_controls {
            overlays.push(self.controls_overlay());
        }
        if !self.loading.is_complete() {
            overlays.push(self.loading.overlay());
        }
        overlays
    }

    fn controls_overlay(&self) -> Overlay {
        let density = self.config.particle_density;
        let mut controls: Vec<Control> = Density::ALL
            .iter()
            .map(|d| Control {
                label: d.as_str().to_string(),
                active: *d == density,
            })
            .collect();
        controls.push(Control {
            label: "Dashboards".to_string(),
            active: self.config.show_dashboards,
        });
        controls.push(Control {
            label: "Reset View".to_string(),
            active: self.view.selected.is_some(),
        });
        Overlay::Controls {
            anchor: Anchor::BottomRight,
            controls,
        }
    }

    /// Compose the current frame and hand it to `backend`.
    ///
    /// A backend without a drawing context gets the loading placeholder.
    ///
    /// # Errors
    ///
    /// Any [`RenderError`] other than a missing context.
    pub fn render<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
    ) -> Result<RenderOutcome, RenderError> {
        let frame = self.compose();
        match backend.render(&frame) {
            Ok(()) => Ok(RenderOutcome::Rendered),
            Err(RenderError::ContextUnavailable(reason)) => {
                warn!(%reason, "rendering context unavailable, showing placeholder");
                backend.present_fallback(self.loading.percent(), self.loading.text())?;
                Ok(RenderOutcome::Placeholder)
            }
            Err(err) => Err(err),
        }
    }

    /// Summary of the current state.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let mut segment_scales = [0.0; SegmentIndex::COUNT];
        for (scale, segment) in segment_scales.iter_mut().zip(self.heart.segments()) {
            *scale = segment.scale;
        }
        EngineSnapshot {
            time: self.clock.elapsed(),
            frame: self.clock.frame_count(),
            view: self.view,
            reversion_in: self.reversion.remaining(self.clock.elapsed()),
            density: self.config.particle_density,
            particles: self.particle_count(),
            segment_scales,
            camera_azimuth: self.camera.azimuth(),
            stats: *self.stats.current(),
            loading_percent: self.loading.percent(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current configuration (density and dashboard visibility follow
    /// control actions).
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Selection state.
    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Frame clock.
    #[must_use]
    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Particle lanes.
    #[must_use]
    pub fn streams(&self) -> &[ParticleStream] {
        &self.streams
    }

    /// Total particles across all lanes.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.streams.iter().map(ParticleStream::len).sum()
    }

    /// The heart sphere.
    #[must_use]
    pub const fn heart(&self) -> &HeartSphere {
        &self.heart
    }

    /// The camera.
    #[must_use]
    pub const fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// The cache platforms, left then right.
    #[must_use]
    pub const fn platforms(&self) -> &[CachePlatform; 2] {
        &self.platforms
    }

    /// Dashboard figures.
    #[must_use]
    pub const fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    /// Loading progress.
    #[must_use]
    pub const fn loading(&self) -> &LoadingSequence {
        &self.loading
    }

    /// Whether a reversion is pending.
    #[must_use]
    pub const fn reversion_pending(&self) -> bool {
        self.reversion.is_pending()
    }

    /// Whether [`Self::shutdown`] was called.
    #[must_use]
    pub const fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

fn build_streams(density: Density, rng: &mut StdRng) -> Vec<ParticleStream> {
    StreamLane::default_layout(density.particle_count())
        .into_iter()
        .map(|lane| ParticleStream::new(lane, rng))
        .collect()
}

fn scene_lights() -> Vec<Light> {
    vec![
        Light::Ambient { intensity: 0.3 },
        Light::Point {
            position: Vec3::ZERO,
            intensity: 1.5,
            color: Color::SHELL_BLUE,
        },
        Light::Point {
            position: Vec3::new(15.0, 10.0, -10.0),
            intensity: 0.5,
            color: Color::AMBER,
        },
        Light::Point {
            position: Vec3::new(-15.0, -10.0, 10.0),
            intensity: 0.5,
            color: Color::from_rgb_u32(0x9C_27_B0),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::MemorySink;
    use particlesway_core::RecordingRenderer;

    fn engine() -> ParticlesWayEngine {
        ParticlesWayEngine::new(EngineConfig {
            seed: Some(11),
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_default_scene_has_six_full_lanes() {
        let e = engine();
        assert_eq!(e.streams().len(), 6);
        assert!(e.streams().iter().all(|s| s.len() == 2_000));
        assert_eq!(e.particle_count(), 12_000);
    }

    #[test]
    fn test_click_selects_and_reverts() {
        let mut e = engine();
        assert_eq!(e.handle_segment_click(2), Ok(true));
        assert_eq!(e.view().selected.map(SegmentIndex::get), Some(2));
        assert!(e.view().exploding);
        assert!(e.reversion_pending());

        for _ in 0..119 {
            e.advance(1.0 / 60.0);
        }
        assert!(e.view().exploding);
        for _ in 0..7 {
            e.advance(1.0 / 60.0);
        }
        assert!(!e.view().exploding);
        assert_eq!(e.view().selected.map(SegmentIndex::get), Some(2));
    }

    #[test]
    fn test_invalid_segment() {
        let mut e = engine();
        assert_eq!(
            e.handle_segment_click(4),
            Err(EngineError::InvalidSegment { index: 4, count: 4 })
        );
        assert_eq!(e.view(), &ViewState::default());
    }

    #[test]
    fn test_not_interactive_ignores_clicks() {
        let mut e = ParticlesWayEngine::new(EngineConfig {
            interactive: false,
            seed: Some(1),
            ..EngineConfig::default()
        });
        assert_eq!(e.handle_segment_click(1), Ok(false));
        assert_eq!(e.view().selected, None);
    }

    #[test]
    fn test_reset_cancels_reversion() {
        let mut e = engine();
        e.handle_segment_click(0).unwrap();
        e.reset();
        assert_eq!(e.view(), &ViewState::default());
        assert!(!e.reversion_pending());
    }

    #[test]
    fn test_reset_after_shutdown_is_ignored() {
        let sink = MemorySink::new();
        let mut e = engine().with_analytics(sink.clone());
        e.handle_segment_click(2).unwrap();
        e.shutdown();
        e.reset();
        assert_eq!(e.view().selected.map(SegmentIndex::get), Some(2));
        assert!(e.view().exploding);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_auto_rotate_control() {
        let mut e = engine();
        e.apply_control(ControlAction::SetAutoRotate(false)).unwrap();
        assert!(!e.camera().auto_rotate());
        assert!(!e.config().auto_rotate);
        let azimuth = e.camera().azimuth();
        e.advance(1.0);
        assert_eq!(e.camera().azimuth(), azimuth);

        e.apply_control(ControlAction::SetAutoRotate(true)).unwrap();
        e.advance(1.0);
        assert_ne!(e.camera().azimuth(), azimuth);
    }

    #[test]
    fn test_reclick_restarts_timer() {
        let mut e = engine();
        e.handle_segment_click(0).unwrap();
        e.advance(1.5);
        e.handle_segment_click(1).unwrap();
        e.advance(1.0);
        assert!(e.view().exploding, "first timer must not end the second explosion");
        e.advance(1.1);
        assert!(!e.view().exploding);
        assert_eq!(e.view().selected.map(SegmentIndex::get), Some(1));
    }

    #[test]
    fn test_density_change_rebuilds_lanes() {
        let mut e = engine();
        e.apply_control(ControlAction::SetDensity(Density::Low)).unwrap();
        assert_eq!(e.particle_count(), 6 * 500);
        assert_eq!(e.config().particle_density, Density::Low);
    }

    #[test]
    fn test_toggle_dashboards_hides_panels() {
        let mut e = engine();
        let panels = |e: &ParticlesWayEngine| {
            e.compose()
                .overlays
                .iter()
                .filter(|o| matches!(o, Overlay::Panel { .. }))
                .count()
        };
        assert_eq!(panels(&e), 2);
        e.apply_control(ControlAction::ToggleDashboards).unwrap();
        assert_eq!(panels(&e), 0);
    }

    #[test]
    fn test_compose_contents() {
        let e = engine();
        let frame = e.compose();
        assert_eq!(frame.lights.len(), 4);
        assert_eq!(frame.effects.len(), 2);
        assert!(frame.primitive("lane-5").is_some());
        assert!(frame.primitive("stars").is_some());
        assert!(frame.primitive("platform-left-ring").is_some());
        assert_eq!(frame.point_count(), 12_000 + StarField::COUNT);
        assert!(frame
            .overlays
            .iter()
            .any(|o| matches!(o, Overlay::Progress { percent: 0, .. })));
    }

    #[test]
    fn test_render_falls_back_without_context() {
        let e = engine();
        let mut backend = RecordingRenderer::without_context();
        assert_eq!(e.render(&mut backend), Ok(RenderOutcome::Placeholder));
        assert_eq!(
            backend.fallbacks()[0],
            (0, "Initializing ParticlesWay Engine...".to_string())
        );

        let mut backend = RecordingRenderer::new();
        assert_eq!(e.render(&mut backend), Ok(RenderOutcome::Rendered));
        assert_eq!(backend.frames_rendered(), 1);
    }

    #[test]
    fn test_shutdown_stops_everything() {
        let mut e = engine();
        e.handle_segment_click(3).unwrap();
        e.shutdown();
        assert!(!e.reversion_pending());
        assert!(!e.stats().is_running());
        let frames = e.clock().frame_count();
        e.advance(5.0);
        assert_eq!(e.clock().frame_count(), frames);
        assert_eq!(e.handle_segment_click(0), Err(EngineError::ShutDown));
        assert_eq!(
            e.apply_control(ControlAction::Reset),
            Err(EngineError::ShutDown)
        );
    }

    #[test]
    fn test_analytics_events() {
        let sink = MemorySink::new();
        let mut e = engine().with_analytics(sink.clone());
        e.handle_segment_click(1).unwrap();
        e.reset();
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].category, "ParticlesWay Visualization");
        assert_eq!(events[0].action, "segment_click");
        assert_eq!(events[1].action, "reset_view");
    }

    #[test]
    fn test_pick_and_click_at() {
        let mut e = engine();
        let viewport = Viewport::new(1280.0, 720.0);
        let anchor = e.heart().world_anchor(SegmentIndex::new(0).unwrap());
        let screen = e.camera().state().project(anchor, viewport).unwrap().screen;
        assert_eq!(e.pick_segment(screen, viewport), SegmentIndex::new(0).ok());
        assert_eq!(e.click_at(screen, viewport), Ok(true));
        assert_eq!(e.view().selected, SegmentIndex::new(0).ok());
        assert_eq!(e.click_at(Point2::new(0.0, 0.0), viewport), Ok(false));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut e = engine();
        e.handle_segment_click(2).unwrap();
        e.advance(0.5);
        let snap = e.snapshot();
        assert_eq!(snap.particles, 12_000);
        assert!((snap.reversion_in.unwrap() - 1.5).abs() < 1e-9);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["view"]["selected"], 2);
        assert_eq!(json["density"], "high");
    }
}
