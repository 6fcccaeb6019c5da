//! Frame clock and fixed-interval timers.
//!
//! Time flows in from the host: the browser passes `requestAnimationFrame`
//! timestamps in milliseconds, headless drivers step by explicit deltas.

use std::time::Duration;

const FPS_WINDOW: usize = 60;

/// Monotonic frame clock exposing elapsed time and per-frame delta.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the first host tick, in milliseconds
    origin_ms: Option<f64>,
    /// Timestamp of the previous host tick, in milliseconds
    last_ms: Option<f64>,
    /// Seconds since the clock started
    elapsed: f64,
    /// Seconds covered by the most recent frame
    delta: f64,
    /// Ring buffer of recent frame deltas in seconds
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    delta_count: usize,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a stopped clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            origin_ms: None,
            last_ms: None,
            elapsed: 0.0,
            delta: 0.0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            delta_count: 0,
            frame_count: 0,
        }
    }

    /// Record a host timestamp in milliseconds.
    ///
    /// The first call only anchors the clock. Timestamps that go backwards
    /// produce a zero delta.
    pub fn tick(&mut self, now_ms: f64) {
        if !now_ms.is_finite() {
            self.advance(0.0);
            return;
        }
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let delta = self
            .last_ms
            .map_or(0.0, |last| ((now_ms - last) / 1000.0).max(0.0));
        self.last_ms = Some(now_ms.max(self.last_ms.unwrap_or(now_ms)));
        self.record(delta);
        self.elapsed = self.elapsed.max((now_ms - origin) / 1000.0);
    }

    /// Step the clock by an explicit delta in seconds.
    pub fn advance(&mut self, delta_secs: f64) {
        let delta = if delta_secs.is_finite() {
            delta_secs.max(0.0)
        } else {
            0.0
        };
        self.record(delta);
        self.elapsed += delta;
    }

    fn record(&mut self, delta: f64) {
        self.delta = delta;
        if self.frame_count > 0 {
            self.frame_times[self.frame_index] = delta;
            self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
            self.delta_count = (self.delta_count + 1).min(FPS_WINDOW);
        }
        self.frame_count += 1;
    }

    /// Seconds since the clock started.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Seconds covered by the most recent frame.
    #[must_use]
    pub const fn delta(&self) -> f64 {
        self.delta
    }

    /// Total frames recorded.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second over the recent window (0 when unknown).
    #[must_use]
    pub fn fps(&self) -> f64 {
        if self.delta_count == 0 {
            return 0.0;
        }
        let sum: f64 = self.frame_times[..self.delta_count].iter().sum();
        if sum <= 0.0 {
            0.0
        } else {
            self.delta_count as f64 / sum
        }
    }
}

/// A timer that fires at regular intervals.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
    running: bool,
    tick_count: u64,
}

impl Interval {
    /// Create a running interval with the given period.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            running: true,
            tick_count: 0,
        }
    }

    /// Create a running interval from a period in milliseconds.
    #[must_use]
    pub const fn from_millis(period_ms: u64) -> Self {
        Self::new(Duration::from_millis(period_ms))
    }

    /// Stop firing. Further `advance` calls return 0.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Resume firing.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Check if the timer is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Number of times the interval has fired.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The configured period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Advance the timer and return the number of ticks that occurred.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if !self.running || self.period.is_zero() {
            return 0;
        }

        self.elapsed = self.elapsed.saturating_add(delta);
        let periods = self.elapsed.as_nanos() / self.period.as_nanos();
        let ticks = match u32::try_from(periods) {
            Ok(n) => {
                self.elapsed -= self.period * n;
                n
            }
            Err(_) => {
                let rest = self.elapsed.as_nanos() % self.period.as_nanos();
                self.elapsed = u64::try_from(rest).map_or(Duration::ZERO, Duration::from_nanos);
                u32::MAX
            }
        };
        self.tick_count = self.tick_count.saturating_add(u64::from(ticks));
        ticks
    }

    /// Progress to the next tick (0.0 to 1.0).
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.period.is_zero() {
            0.0
        } else {
            (self.elapsed.as_secs_f64() / self.period.as_secs_f64()) as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick(1_000.0);
        assert_eq!(clock.delta(), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_clock_tick_deltas() {
        let mut clock = FrameClock::new();
        clock.tick(1_000.0);
        clock.tick(1_016.0);
        assert!((clock.delta() - 0.016).abs() < 1e-9);
        clock.tick(1_050.0);
        assert!((clock.elapsed() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_clock_backwards_timestamp_is_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        clock.tick(600.0);
        clock.tick(550.0);
        assert_eq!(clock.delta(), 0.0);
        assert!((clock.elapsed() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_clock_advance_rejects_negative_and_nan() {
        let mut clock = FrameClock::new();
        clock.advance(-1.0);
        clock.advance(f64::NAN);
        assert_eq!(clock.elapsed(), 0.0);
        clock.advance(0.5);
        assert_eq!(clock.elapsed(), 0.5);
    }

    #[test]
    fn test_clock_fps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.fps(), 0.0);
        for _ in 0..10 {
            clock.advance(1.0 / 60.0);
        }
        assert!((clock.fps() - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_interval_fires_on_period() {
        let mut interval = Interval::from_millis(2_000);
        assert_eq!(interval.advance(Duration::from_millis(1_999)), 0);
        assert_eq!(interval.advance(Duration::from_millis(1)), 1);
        assert_eq!(interval.advance(Duration::from_millis(4_500)), 2);
        assert_eq!(interval.tick_count(), 3);
        assert!((interval.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_interval_stopped() {
        let mut interval = Interval::from_millis(500);
        interval.stop();
        assert!(!interval.is_running());
        assert_eq!(interval.advance(Duration::from_secs(5)), 0);
        interval.start();
        assert_eq!(interval.advance(Duration::from_millis(500)), 1);
    }

    #[test]
    fn test_interval_long_gap_counts_periods() {
        let mut interval = Interval::from_millis(2_000);
        interval.advance(Duration::from_millis(1));
        let month = Duration::from_secs(86_400 * 30);
        assert_eq!(interval.advance(month), 1_296_000);
        assert!((interval.progress() - 0.000_5).abs() < 1e-6);
    }

    #[test]
    fn test_interval_saturates_on_unbounded_gap() {
        let mut interval = Interval::from_millis(2_000);
        interval.advance(Duration::from_millis(16));
        assert_eq!(interval.advance(Duration::MAX), u32::MAX);
        assert!(interval.progress() < 1.0);
        assert_eq!(interval.advance(Duration::MAX), u32::MAX);
        assert_eq!(interval.tick_count(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_interval_zero_period_never_fires() {
        let mut interval = Interval::new(Duration::ZERO);
        assert_eq!(interval.advance(Duration::from_secs(1)), 0);
        assert_eq!(interval.progress(), 0.0);
    }
}
