//! Staged loading progress.

use particlesway_core::{Easing, Interval, Overlay, Tween};
use std::time::Duration;

/// Time between loading steps.
pub const STEP_PERIOD: Duration = Duration::from_millis(500);

/// Text shown before the first step.
pub const INITIAL_TEXT: &str = "Initializing ParticlesWay Engine...";

/// Loading stages as `(percent, text)`.
pub const STEPS: [(u8, &str); 5] = [
    (20, "Loading PostgreSQL Core..."),
    (40, "Connecting Redis Cache..."),
    (60, "Streaming Kafka Events..."),
    (80, "Spawning Particles..."),
    (100, "Ready!"),
];

/// Progress through [`STEPS`], one step per [`STEP_PERIOD`].
#[derive(Debug, Clone)]
pub struct LoadingSequence {
    interval: Interval,
    completed_steps: usize,
    bar: Tween,
}

impl Default for LoadingSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingSequence {
    /// Start at 0%.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interval: Interval::new(STEP_PERIOD),
            completed_steps: 0,
            bar: Tween::new(0.0, 0.0, 0.5, Easing::EaseOut),
        }
    }

    /// Advance by `delta`, applying every step that came due.
    pub fn advance(&mut self, delta: Duration) {
        self.bar.update(delta.as_secs_f32());
        if self.is_complete() {
            return;
        }
        let ticks = self.interval.advance(delta) as usize;
        if ticks == 0 {
            return;
        }
        self.completed_steps = self.completed_steps.saturating_add(ticks).min(STEPS.len());
        self.bar.retarget(f32::from(self.percent()));
        if self.is_complete() {
            self.interval.stop();
        }
    }

    /// Current step percentage.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.completed_steps
            .checked_sub(1)
            .map_or(0, |i| STEPS[i].0)
    }

    /// Current status text.
    #[must_use]
    pub fn text(&self) -> &'static str {
        self.completed_steps
            .checked_sub(1)
            .map_or(INITIAL_TEXT, |i| STEPS[i].1)
    }

    /// Eased bar width in percent, trailing [`Self::percent`].
    #[must_use]
    pub fn bar_percent(&self) -> f32 {
        self.bar.value()
    }

    /// Whether "Ready!" has been reached.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed_steps >= STEPS.len()
    }

    /// The progress overlay.
    #[must_use]
    pub fn overlay(&self) -> Overlay {
        Overlay::Progress {
            percent: self.percent(),
            text: self.text().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let seq = LoadingSequence::new();
        assert_eq!(seq.percent(), 0);
        assert_eq!(seq.text(), "Initializing ParticlesWay Engine...");
        assert!(!seq.is_complete());
    }

    #[test]
    fn test_steps_every_500ms() {
        let mut seq = LoadingSequence::new();
        seq.advance(Duration::from_millis(499));
        assert_eq!(seq.percent(), 0);
        seq.advance(Duration::from_millis(1));
        assert_eq!(seq.percent(), 20);
        assert_eq!(seq.text(), "Loading PostgreSQL Core...");
        seq.advance(Duration::from_millis(1_000));
        assert_eq!(seq.percent(), 60);
        assert_eq!(seq.text(), "Streaming Kafka Events...");
    }

    #[test]
    fn test_completes_and_stays_ready() {
        let mut seq = LoadingSequence::new();
        seq.advance(Duration::from_secs(10));
        assert!(seq.is_complete());
        assert_eq!(seq.percent(), 100);
        assert_eq!(seq.text(), "Ready!");
        seq.advance(Duration::from_secs(10));
        assert_eq!(seq.percent(), 100);
    }

    #[test]
    fn test_bar_eases_toward_percent() {
        let mut seq = LoadingSequence::new();
        seq.advance(Duration::from_millis(500));
        assert!(seq.bar_percent() < 20.0);
        seq.advance(Duration::from_millis(250));
        let mid = seq.bar_percent();
        assert!(mid > 0.0 && mid < 20.0);
        seq.advance(Duration::from_millis(249));
        assert!((seq.bar_percent() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_overlay() {
        let mut seq = LoadingSequence::new();
        seq.advance(Duration::from_millis(1_000));
        assert_eq!(
            seq.overlay(),
            Overlay::Progress {
                percent: 40,
                text: "Connecting Redis Cache...".to_string()
            }
        );
    }
}
