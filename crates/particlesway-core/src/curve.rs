//! Quadratic Bézier paths used by particle lanes.

use crate::geometry::Vec3;
use serde::{Deserialize, Serialize};

/// A quadratic Bézier curve through `start` and `end`, bent toward `control`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    /// Point at t = 0
    pub start: Vec3,
    /// Control point
    pub control: Vec3,
    /// Point at t = 1
    pub end: Vec3,
}

impl QuadraticBezier {
    /// Create a curve from three control points.
    #[must_use]
    pub const fn new(start: Vec3, control: Vec3, end: Vec3) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// A straight segment (control at the midpoint).
    #[must_use]
    pub fn straight(start: Vec3, end: Vec3) -> Self {
        Self::new(start, start.midpoint(end), end)
    }

    /// Position at progress `t`:
    /// `(1-t)²·start + 2(1-t)t·control + t²·end`.
    ///
    /// Values outside [0, 1] extrapolate along the same parabola.
    #[must_use]
    pub fn sample_at(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }
}
