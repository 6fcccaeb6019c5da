//! Live dashboard figures.
//!
//! A [`StatsSource`] produces the next set of figures on every refresh.
//! [`DashboardStats`] owns the refresh cadence, independent of the render
//! loop, and turns the figures into overlay panels.

use particlesway_core::{Anchor, Card, Interval, Overlay};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::trace;

/// Refresh period of the dashboards.
pub const REFRESH_PERIOD: Duration = Duration::from_millis(2_000);
/// Number of bars in the performance mini chart.
pub const CHART_BARS: usize = 20;

/// Figures shown on the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveStats {
    /// Total graph nodes
    pub total_nodes: u64,
    /// Active gems
    pub active_gems: u64,
    /// Particle throughput
    pub particles_per_second: u64,
    /// Uptime percentage
    pub uptime_percent: f64,
}

impl Default for LiveStats {
    fn default() -> Self {
        Self {
            total_nodes: 1_000_000_000,
            active_gems: 15_000_000,
            particles_per_second: 100_000,
            uptime_percent: 99.9,
        }
    }
}

/// A producer of dashboard figures.
///
/// Swap the random walk for a real metrics feed by implementing this trait.
pub trait StatsSource {
    /// Figures following `previous`.
    fn next(&mut self, previous: &LiveStats) -> LiveStats;

    /// Bar heights (percent) for the mini chart.
    fn chart(&mut self) -> Vec<f32> {
        (0..CHART_BARS)
            .map(|i| (i as f32 * 0.5).sin().mul_add(30.0, 60.0))
            .collect()
    }
}

/// Simulated figures: gems accumulate, throughput and uptime jitter.
#[derive(Debug, Clone)]
pub struct RandomWalkStats {
    rng: StdRng,
}

impl RandomWalkStats {
    /// Seeded source for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl StatsSource for RandomWalkStats {
    fn next(&mut self, previous: &LiveStats) -> LiveStats {
        LiveStats {
            total_nodes: previous.total_nodes,
            active_gems: previous.active_gems + self.rng.gen_range(0..1_000),
            particles_per_second: 95_000 + self.rng.gen_range(0..10_000),
            uptime_percent: 99.9 + self.rng.gen::<f64>() * 0.09,
        }
    }

    fn chart(&mut self) -> Vec<f32> {
        (0..CHART_BARS)
            .map(|i| 50.0 + (i as f32 * 0.5).sin() * 30.0 + self.rng.gen::<f32>() * 20.0)
            .collect()
    }
}

/// Which dashboard panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSide {
    /// "System Metrics", top left
    Left,
    /// "Performance", bottom right
    Right,
}

impl DashboardSide {
    const fn slot(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Dashboard figures refreshed on a fixed cadence.
pub struct DashboardStats {
    source: Box<dyn StatsSource>,
    interval: Interval,
    current: LiveStats,
    chart: Vec<f32>,
    expanded: [bool; 2],
}

impl std::fmt::Debug for DashboardStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardStats")
            .field("current", &self.current)
            .field("refreshes", &self.interval.tick_count())
            .field("running", &self.interval.is_running())
            .finish_non_exhaustive()
    }
}

impl DashboardStats {
    /// Start from the default figures.
    pub fn new(source: impl StatsSource + 'static) -> Self {
        let mut source: Box<dyn StatsSource> = Box::new(source);
        let chart = source.chart();
        Self {
            source,
            interval: Interval::new(REFRESH_PERIOD),
            current: LiveStats::default(),
            chart,
            expanded: [false; 2],
        }
    }

    /// Advance the refresh timer.
    ///
    /// Returns the number of periods that elapsed. Only the latest figures
    /// are displayed, so at most one refresh is applied however long the gap.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        let ticks = self.interval.advance(delta);
        if ticks > 0 {
            self.apply_refresh();
        }
        ticks
    }

    /// Apply one refresh immediately (for hosts that own their own timer).
    pub fn refresh(&mut self) {
        if self.interval.is_running() {
            self.apply_refresh();
        }
    }

    fn apply_refresh(&mut self) {
        self.current = self.source.next(&self.current);
        self.chart = self.source.chart();
        trace!(
            gems = self.current.active_gems,
            pps = self.current.particles_per_second,
            "dashboard stats refreshed"
        );
    }

    /// Stop refreshing.
    pub fn stop(&mut self) {
        self.interval.stop();
    }

    /// Whether refreshes are still applied.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.interval.is_running()
    }

    /// Current figures.
    #[must_use]
    pub const fn current(&self) -> &LiveStats {
        &self.current
    }

    /// Current mini-chart bars.
    #[must_use]
    pub fn chart(&self) -> &[f32] {
        &self.chart
    }

    /// Expand or collapse a panel.
    pub fn toggle_expanded(&mut self, side: DashboardSide) {
        let slot = &mut self.expanded[side.slot()];
        *slot = !*slot;
    }

    /// Whether a panel is expanded.
    #[must_use]
    pub const fn is_expanded(&self, side: DashboardSide) -> bool {
        self.expanded[side.slot()]
    }

    /// Both dashboard panels.
    #[must_use]
    pub fn overlays(&self) -> Vec<Overlay> {
        vec![self.panel(DashboardSide::Left), self.panel(DashboardSide::Right)]
    }

    fn panel(&self, side: DashboardSide) -> Overlay {
        let s = &self.current;
        let mut cards = vec![
            Card::new("Total Nodes", format_compact(s.total_nodes)).with_trend("+0.5%"),
            Card::new("Active Gems", format_compact(s.active_gems)).with_trend("+2.3%"),
            Card::new("Particles/sec", format_compact(s.particles_per_second)),
            Card::new("Uptime", format!("{:.2}%", s.uptime_percent)),
        ];
        if self.is_expanded(side) {
            cards.push(Card::new("Concurrent Users", "1,247"));
            cards.push(Card::new("Cluster Nodes", "24"));
        }

        let (anchor, title, chart) = match side {
            DashboardSide::Left => (Anchor::TopLeft, "System Metrics", Vec::new()),
            DashboardSide::Right => (Anchor::BottomRight, "Performance", self.chart.clone()),
        };
        Overlay::Panel {
            anchor,
            title: title.to_string(),
            cards,
            chart,
        }
    }
}

/// Compact human-readable count: `1.0B`, `15.0M`, `100.0K`, `999`.
#[must_use]
pub fn format_compact(n: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];
    UNITS
        .iter()
        .find(|(scale, _)| n >= *scale)
        .map_or_else(
            || n.to_string(),
            |(scale, suffix)| format!("{:.1}{suffix}", n as f64 / *scale as f64),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl StatsSource for Fixed {
        fn next(&mut self, previous: &LiveStats) -> LiveStats {
            LiveStats {
                active_gems: previous.active_gems + 1,
                ..*previous
            }
        }
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(1_000_000_000), "1.0B");
        assert_eq!(format_compact(15_000_000), "15.0M");
        assert_eq!(format_compact(100_000), "100.0K");
        assert_eq!(format_compact(1_500), "1.5K");
        assert_eq!(format_compact(999), "999");
        assert_eq!(format_compact(0), "0");
    }

    #[test]
    fn test_defaults() {
        let s = LiveStats::default();
        assert_eq!(s.total_nodes, 1_000_000_000);
        assert_eq!(s.active_gems, 15_000_000);
        assert_eq!(s.particles_per_second, 100_000);
        assert_eq!(s.uptime_percent, 99.9);
    }

    #[test]
    fn test_random_walk_ranges() {
        let mut source = RandomWalkStats::seeded(42);
        let mut s = LiveStats::default();
        for _ in 0..200 {
            let next = source.next(&s);
            assert_eq!(next.total_nodes, s.total_nodes);
            assert!(next.active_gems >= s.active_gems && next.active_gems < s.active_gems + 1_000);
            assert!((95_000..105_000).contains(&next.particles_per_second));
            assert!(next.uptime_percent >= 99.9 && next.uptime_percent < 99.99);
            s = next;
        }
    }

    #[test]
    fn test_random_walk_is_reproducible() {
        let mut a = RandomWalkStats::seeded(9);
        let mut b = RandomWalkStats::seeded(9);
        let s = LiveStats::default();
        assert_eq!(a.next(&s), b.next(&s));
    }

    #[test]
    fn test_chart_bars_in_range() {
        let bars = RandomWalkStats::seeded(1).chart();
        assert_eq!(bars.len(), CHART_BARS);
        assert!(bars.iter().all(|h| (20.0..100.0).contains(h)));
    }

    #[test]
    fn test_refresh_cadence() {
        let mut dash = DashboardStats::new(Fixed);
        assert_eq!(dash.advance(Duration::from_millis(1_999)), 0);
        assert_eq!(dash.current().active_gems, 15_000_000);
        assert_eq!(dash.advance(Duration::from_millis(1)), 1);
        assert_eq!(dash.advance(Duration::from_millis(6_000)), 3);
        assert_eq!(dash.current().active_gems, 15_000_002);
    }

    #[test]
    fn test_long_gap_applies_single_refresh() {
        let mut dash = DashboardStats::new(Fixed);
        assert_eq!(dash.advance(Duration::from_secs(86_400 * 30)), 1_296_000);
        assert_eq!(dash.current().active_gems, 15_000_001);
        assert_eq!(dash.advance(Duration::MAX), u32::MAX);
        assert_eq!(dash.current().active_gems, 15_000_002);
    }

    #[test]
    fn test_stop_halts_refresh() {
        let mut dash = DashboardStats::new(Fixed);
        dash.stop();
        assert!(!dash.is_running());
        assert_eq!(dash.advance(Duration::from_secs(10)), 0);
        dash.refresh();
        assert_eq!(dash.current().active_gems, 15_000_000);
    }

    #[test]
    fn test_panels() {
        let mut dash = DashboardStats::new(Fixed);
        let overlays = dash.overlays();
        match &overlays[0] {
            Overlay::Panel {
                title,
                cards,
                chart,
                anchor,
            } => {
                assert_eq!(title, "System Metrics");
                assert_eq!(*anchor, Anchor::TopLeft);
                assert_eq!(cards.len(), 4);
                assert_eq!(cards[0].value, "1.0B");
                assert_eq!(cards[0].trend.as_deref(), Some("+0.5%"));
                assert_eq!(cards[3].value, "99.90%");
                assert!(chart.is_empty());
            }
            other => panic!("unexpected overlay {other:?}"),
        }

        dash.toggle_expanded(DashboardSide::Right);
        match &dash.overlays()[1] {
            Overlay::Panel {
                title, cards, chart, ..
            } => {
                assert_eq!(title, "Performance");
                assert_eq!(cards.len(), 6);
                assert_eq!(cards[4].value, "1,247");
                assert_eq!(chart.len(), CHART_BARS);
            }
            other => panic!("unexpected overlay {other:?}"),
        }
    }
}
