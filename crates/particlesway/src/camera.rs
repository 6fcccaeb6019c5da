//! Orbiting camera with auto-rotation, drag and zoom.
//!
//! The camera lives on a sphere around the origin. Azimuth is measured
//! around +Y from +Z, polar angle from +Y.

use particlesway_core::{CameraState, Vec3, ViewState};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_4, PI, TAU};

/// Initial eye position.
pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 5.0, 20.0);
/// Vertical field of view in degrees.
pub const FOV_DEG: f32 = 60.0;
/// Closest allowed orbit distance.
pub const MIN_DISTANCE: f32 = 12.0;
/// Farthest allowed orbit distance.
pub const MAX_DISTANCE: f32 = 40.0;
/// Smallest polar angle (radians from +Y).
pub const MIN_POLAR: f32 = FRAC_PI_4;
/// Largest polar angle (radians from +Y).
pub const MAX_POLAR: f32 = PI / 1.5;
/// Auto-rotate speed; 1.0 is one orbit per minute.
pub const AUTO_ROTATE_SPEED: f32 = 0.5;
/// Distance multiplier per zoom step.
pub const ZOOM_STEP: f32 = 0.95;

/// User input to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraInput {
    /// Pointer drag in pixels
    Drag {
        /// Horizontal movement
        dx: f32,
        /// Vertical movement
        dy: f32,
        /// Height of the drag surface
        viewport_height: f32,
    },
    /// Wheel zoom; positive steps move closer
    Zoom {
        /// Number of wheel notches
        steps: f32,
    },
}

/// Orbit camera state.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    azimuth: f32,
    polar: f32,
    distance: f32,
    auto_rotate: bool,
    zoom_enabled: bool,
    dragged_this_frame: bool,
}

impl CameraRig {
    /// Camera at the initial position.
    #[must_use]
    pub fn new(auto_rotate: bool, zoom_enabled: bool) -> Self {
        let distance = INITIAL_POSITION.length();
        Self {
            azimuth: INITIAL_POSITION.x.atan2(INITIAL_POSITION.z),
            polar: (INITIAL_POSITION.y / distance).acos(),
            distance,
            auto_rotate,
            zoom_enabled,
            dragged_this_frame: false,
        }
    }

    /// Auto-rotation rate in radians per second.
    #[must_use]
    pub fn auto_rotate_rate() -> f32 {
        TAU / 60.0 * AUTO_ROTATE_SPEED
    }

    /// Apply user input.
    pub fn apply_input(&mut self, input: CameraInput) {
        match input {
            CameraInput::Drag {
                dx,
                dy,
                viewport_height,
            } => {
                if viewport_height <= 0.0 || !dx.is_finite() || !dy.is_finite() {
                    return;
                }
                self.azimuth -= TAU * dx / viewport_height;
                self.polar = (self.polar - TAU * dy / viewport_height).clamp(MIN_POLAR, MAX_POLAR);
                self.dragged_this_frame = true;
            }
            CameraInput::Zoom { steps } => {
                if !self.zoom_enabled || !steps.is_finite() {
                    return;
                }
                self.distance = (self.distance * ZOOM_STEP.powf(steps)).clamp(MIN_DISTANCE, MAX_DISTANCE);
            }
        }
    }

    /// Advance auto-rotation by `delta` seconds.
    ///
    /// Rotation is suppressed while any segment is selected and on frames
    /// that received drag input.
    pub fn tick(&mut self, delta: f32, view: &ViewState) {
        let dragged = std::mem::take(&mut self.dragged_this_frame);
        if self.auto_rotate && view.selected.is_none() && !dragged && delta > 0.0 {
            self.azimuth -= Self::auto_rotate_rate() * delta;
            self.azimuth = self.azimuth.rem_euclid(TAU);
        }
    }

    /// Enable or disable auto-rotation.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// Whether auto-rotation is enabled.
    #[must_use]
    pub const fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Azimuth in radians.
    #[must_use]
    pub const fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Polar angle in radians.
    #[must_use]
    pub const fn polar(&self) -> f32 {
        self.polar
    }

    /// Distance from the target.
    #[must_use]
    pub const fn distance(&self) -> f32 {
        self.distance
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        Vec3::new(
            self.distance * sin_p * sin_a,
            self.distance * cos_p,
            self.distance * sin_p * cos_a,
        )
    }

    /// Snapshot for rendering and picking.
    #[must_use]
    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position(),
            target: Vec3::ZERO,
            fov_deg: FOV_DEG,
        }
    }
}
