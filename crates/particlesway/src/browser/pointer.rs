//! Pointer gesture tracking - turns raw press/move/release into clicks,
//! camera drags and zoom steps.
//!
//! Platform independent so gestures behave the same in the browser and in
//! native hosts.

use crate::camera::CameraInput;
use particlesway_core::{Point2, Viewport};

/// Movement (pixels) under which a press-release counts as a click.
pub const CLICK_SLOP: f32 = 4.0;

/// Wheel delta (pixels) per zoom step.
pub const WHEEL_STEP: f32 = 100.0;

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerRelease {
    /// Press and release at (nearly) the same spot
    Click(Point2),
    /// The press turned into a drag
    DragEnd,
    /// Release with no matching press
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    origin: Point2,
    last: Point2,
    dragging: bool,
}

/// Tracks one pointer between press and release.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerTracker {
    press: Option<Press>,
}

impl PointerTracker {
    /// Idle tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self { press: None }
    }

    /// Pointer pressed at `position`.
    pub fn press(&mut self, position: Point2) {
        self.press = Some(Press {
            origin: position,
            last: position,
            dragging: false,
        });
    }

    /// Pointer moved; yields a drag once the slop is exceeded.
    pub fn motion(&mut self, position: Point2, viewport: Viewport) -> Option<CameraInput> {
        let press = self.press.as_mut()?;
        if !press.dragging && press.origin.distance(&position) <= CLICK_SLOP {
            return None;
        }
        press.dragging = true;
        let dx = position.x - press.last.x;
        let dy = position.y - press.last.y;
        press.last = position;
        Some(CameraInput::Drag {
            dx,
            dy,
            viewport_height: viewport.height,
        })
    }

    /// Pointer released.
    pub fn release(&mut self, position: Point2) -> PointerRelease {
        match self.press.take() {
            Some(press) if press.dragging => PointerRelease::DragEnd,
            Some(_) => PointerRelease::Click(position),
            None => PointerRelease::Ignored,
        }
    }

    /// Whether a press is in progress.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.press.is_some()
    }
}

/// Zoom input for a wheel event; scrolling up moves closer.
#[must_use]
pub fn wheel_zoom(delta_y: f32) -> CameraInput {
    CameraInput::Zoom {
        steps: -delta_y / WHEEL_STEP,
    }
}
