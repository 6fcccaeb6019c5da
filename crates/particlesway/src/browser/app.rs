//! WASM entry point.

use super::canvas2d::Canvas2DBackend;
use super::pointer::{wheel_zoom, PointerRelease, PointerTracker};
use crate::config::{Density, DeviceProfile, EngineConfig};
use crate::engine::{ControlAction, ParticlesWayEngine, RenderOutcome};
use crate::stats::DashboardSide;
use particlesway_core::Point2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlCanvasElement};

/// The scene engine bound to a canvas.
///
/// The host drives it from `requestAnimationFrame` and forwards pointer
/// input in canvas pixel coordinates.
#[wasm_bindgen]
pub struct EngineApp {
    engine: ParticlesWayEngine,
    backend: Canvas2DBackend,
    pointer: PointerTracker,
}

#[wasm_bindgen]
impl EngineApp {
    /// Attach to a canvas element by ID.
    ///
    /// `config_json` holds [`EngineConfig`] fields; without it the particle
    /// density is chosen from the device.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> Result<EngineApp, JsValue> {
        console_error_panic_hook::set_once();

        let window = window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| format!("Canvas '{canvas_id}' not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "Element is not a canvas")?;

        let config = match config_json.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(json) => EngineConfig::from_json_str(json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => {
                let navigator = window.navigator();
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|w| w.as_f64())
                    .unwrap_or(1024.0);
                let profile = DeviceProfile::from_user_agent(
                    &navigator.user_agent().unwrap_or_default(),
                    width as f32,
                    navigator.hardware_concurrency() as u32,
                );
                EngineConfig {
                    particle_density: profile.recommended_density(),
                    ..EngineConfig::default()
                }
            }
        };

        Ok(Self {
            engine: ParticlesWayEngine::new(config),
            backend: Canvas2DBackend::new(canvas),
            pointer: PointerTracker::new(),
        })
    }

    /// Advance to `timestamp_ms` and draw. Returns false when only the
    /// loading placeholder could be shown.
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<bool, JsValue> {
        self.engine.tick_at(timestamp_ms);
        let outcome = self
            .engine
            .render(&mut self.backend)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(outcome == RenderOutcome::Rendered)
    }

    /// A plain click at canvas coordinates. Returns true when a segment
    /// was selected.
    pub fn click(&mut self, x: f32, y: f32) -> Result<bool, JsValue> {
        self.engine
            .click_at(Point2::new(x, y), self.backend.viewport())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Pointer pressed.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pointer.press(Point2::new(x, y));
    }

    /// Pointer moved.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(input) = self
            .pointer
            .motion(Point2::new(x, y), self.backend.viewport())
        {
            self.engine.camera_input(input);
        }
    }

    /// Pointer released. Returns true when a segment was selected.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Result<bool, JsValue> {
        match self.pointer.release(Point2::new(x, y)) {
            PointerRelease::Click(at) => self
                .engine
                .click_at(at, self.backend.viewport())
                .map_err(|e| JsValue::from_str(&e.to_string())),
            PointerRelease::DragEnd | PointerRelease::Ignored => Ok(false),
        }
    }

    /// Wheel scrolled by `delta_y` pixels.
    pub fn wheel(&mut self, delta_y: f32) {
        self.engine.camera_input(wheel_zoom(delta_y));
    }

    /// Select a segment directly (0-3).
    pub fn select_segment(&mut self, index: usize) -> Result<bool, JsValue> {
        self.engine
            .handle_segment_click(index)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Change particle density: "low", "medium" or "high".
    pub fn set_density(&mut self, density: &str) -> Result<(), JsValue> {
        let density: Density = density
            .parse()
            .map_err(|e: particlesway_core::EngineError| JsValue::from_str(&e.to_string()))?;
        self.control(ControlAction::SetDensity(density))
    }

    /// Show or hide the dashboards.
    pub fn toggle_dashboards(&mut self) -> Result<(), JsValue> {
        self.control(ControlAction::ToggleDashboards)
    }

    /// Turn camera auto-rotation on or off.
    pub fn set_auto_rotate(&mut self, enabled: bool) -> Result<(), JsValue> {
        self.control(ControlAction::SetAutoRotate(enabled))
    }

    /// Expand or collapse a dashboard panel ("left" or "right").
    pub fn toggle_panel(&mut self, side: &str) -> Result<(), JsValue> {
        let side = match side {
            "left" => DashboardSide::Left,
            "right" => DashboardSide::Right,
            other => return Err(JsValue::from_str(&format!("unknown panel '{other}'"))),
        };
        self.control(ControlAction::ToggleExpanded(side))
    }

    /// "Reset View".
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.control(ControlAction::Reset)
    }

    /// Apply one dashboard refresh, for hosts that keep a `setInterval`
    /// running while animation frames are paused.
    pub fn refresh_stats(&mut self) {
        self.engine.refresh_stats();
    }

    /// Dashboard figures as JSON.
    pub fn stats_json(&self) -> String {
        serde_json::to_string(self.engine.stats().current()).unwrap_or_default()
    }

    /// Selection state as JSON.
    pub fn view_json(&self) -> String {
        serde_json::to_string(self.engine.view()).unwrap_or_default()
    }

    /// Engine state as JSON.
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.engine.snapshot()).unwrap_or_default()
    }

    /// Current frame description as JSON, for WebGL hosts.
    pub fn frame_json(&self) -> String {
        serde_json::to_string(&self.engine.compose()).unwrap_or_default()
    }

    /// Stop all timers.
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }
}

impl EngineApp {
    fn control(&mut self, action: ControlAction) -> Result<(), JsValue> {
        self.engine
            .apply_control(action)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The engine (internal Rust API).
    pub fn engine(&self) -> &ParticlesWayEngine {
        &self.engine
    }
}
