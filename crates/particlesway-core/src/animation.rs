//! Per-frame animation helpers: interpolation, exponential smoothing,
//! sinusoidal pulses and easing curves.

use crate::color::Color;
use crate::geometry::Vec3;
use serde::{Deserialize, Serialize};

// =============================================================================
// Interpolate Trait
// =============================================================================

/// Trait for types that can be interpolated.
pub trait Interpolate {
    /// Interpolate between two values.
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        (*to - *from).mul_add(t, *from)
    }
}

impl Interpolate for f64 {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        (*to - *from).mul_add(f64::from(t), *from)
    }
}

impl Interpolate for Vec3 {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        from.lerp(*to, t)
    }
}

impl Interpolate for Color {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        from.lerp(to, t)
    }
}

// =============================================================================
// Smoothing
// =============================================================================

/// How a value chases its target each frame.
///
/// `PerTick` moves a fixed fraction of the remaining distance every call,
/// so convergence speed follows the display refresh rate.
/// `FrameRateIndependent` produces the same curve as `PerTick` at
/// `reference_fps` and rescales the fraction by the real frame delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Fixed fraction per tick.
    PerTick {
        /// Fraction of the remaining distance covered per tick, in (0, 1].
        factor: f32,
    },
    /// Fraction scaled by elapsed time.
    FrameRateIndependent {
        /// Fraction of the remaining distance covered per reference frame.
        factor: f32,
        /// Frame rate at which `factor` applies unchanged.
        reference_fps: f32,
    },
}

impl Default for SmoothingMode {
    fn default() -> Self {
        Self::PerTick { factor: 0.1 }
    }
}

impl SmoothingMode {
    /// The configured per-step fraction.
    #[must_use]
    pub const fn factor(&self) -> f32 {
        match self {
            Self::PerTick { factor } | Self::FrameRateIndependent { factor, .. } => *factor,
        }
    }

    /// Fraction of the remaining distance to cover for a frame of `dt` seconds.
    #[must_use]
    pub fn alpha(&self, dt: f32) -> f32 {
        match *self {
            Self::PerTick { factor } => factor.clamp(0.0, 1.0),
            Self::FrameRateIndependent {
                factor,
                reference_fps,
            } => {
                let factor = factor.clamp(0.0, 1.0);
                let frames = (dt.max(0.0) * reference_fps).max(0.0);
                1.0 - (1.0 - factor).powf(frames)
            }
        }
    }

    /// Move `current` toward `target`.
    #[must_use]
    pub fn step<T: Interpolate>(&self, current: &T, target: &T, dt: f32) -> T {
        T::interpolate(current, target, self.alpha(dt))
    }
}

/// `1 + sin(time * frequency + phase) * amplitude`.
#[must_use]
pub fn pulse(time: f32, frequency: f32, phase: f32, amplitude: f32) -> f32 {
    time.mul_add(frequency, phase).sin().mul_add(amplitude, 1.0)
}

// =============================================================================
// Easing Functions
// =============================================================================

/// Easing curves for timed transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f32).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// A value eased from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    /// Create a new tween.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Restart toward a new target from the current value.
    pub fn retarget(&mut self, to: f32) {
        self.from = self.value();
        self.to = to;
        self.elapsed = 0.0;
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Current eased value.
    #[must_use]
    pub fn value(&self) -> f32 {
        f32::interpolate(&self.from, &self.to, self.easing.apply(self.progress()))
    }

    /// Whether the tween reached its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Final value.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interpolate_f32() {
        assert!((f32::interpolate(&0.0, &100.0, 0.5) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_interpolate_vec3() {
        let v = Vec3::interpolate(&Vec3::ZERO, &Vec3::new(2.0, 4.0, 6.0), 0.5);
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_interpolate_color() {
        let c = Color::interpolate(&Color::BLACK, &Color::WHITE, 0.5);
        assert!((c.r - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_per_tick_smoothing_ignores_dt() {
        let mode = SmoothingMode::default();
        let a = mode.step(&1.0f32, &1.3, 1.0 / 60.0);
        let b = mode.step(&1.0f32, &1.3, 1.0 / 144.0);
        assert!((a - 1.03).abs() < 1e-6);
        assert_eq!(a, b);
    }

    #[test]
    fn test_frame_rate_independent_matches_reference() {
        let mode = SmoothingMode::FrameRateIndependent {
            factor: 0.1,
            reference_fps: 60.0,
        };
        assert!((mode.alpha(1.0 / 60.0) - 0.1).abs() < 1e-5);
        // Two 120 fps frames cover the same ground as one 60 fps frame.
        let half = mode.alpha(1.0 / 120.0);
        let two_steps = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((two_steps - 0.1).abs() < 1e-5);
        assert_eq!(mode.alpha(0.0), 0.0);
    }

    #[test]
    fn test_smoothing_factor_accessor() {
        assert_eq!(SmoothingMode::default().factor(), 0.1);
    }

    #[test]
    fn test_pulse_bounds() {
        assert_eq!(pulse(0.0, 3.0, 0.0, 0.3), 1.0);
        let peak = pulse(std::f32::consts::FRAC_PI_2, 1.0, 0.0, 0.3);
        assert!((peak - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert!(easing.apply(0.0).abs() < 1e-6);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }

    #[test]
    fn test_tween_retarget_continues_from_current() {
        let mut tween = Tween::new(0.0, 20.0, 0.5, Easing::Linear);
        tween.update(0.25);
        assert!((tween.value() - 10.0).abs() < 1e-4);
        tween.retarget(40.0);
        assert!((tween.value() - 10.0).abs() < 1e-4);
        tween.update(1.0);
        assert!(tween.is_complete());
        assert!((tween.value() - 40.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_smoothing_never_overshoots(
            current in -10.0f32..10.0,
            target in -10.0f32..10.0,
            dt in 0.0f32..0.5,
        ) {
            for mode in [
                SmoothingMode::default(),
                SmoothingMode::FrameRateIndependent { factor: 0.1, reference_fps: 60.0 },
            ] {
                let next = mode.step(&current, &target, dt);
                let lo = current.min(target) - 1e-4;
                let hi = current.max(target) + 1e-4;
                prop_assert!(next >= lo && next <= hi);
            }
        }
    }
}
