//! Particle streams flowing along curved lanes.
//!
//! Each stream owns a fixed set of particles that loop from the lane's start
//! to its end. Per frame, progress advances with the frame delta and the
//! rendered size pulses with elapsed time.

use particlesway_core::{pulse, Color, QuadraticBezier, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Progress gained per second at speed 1.0.
pub const PROGRESS_RATE: f32 = 0.1;

/// Configuration for one lane of particles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamLane {
    /// Where particles spawn
    pub start: Vec3,
    /// Where particles despawn
    pub end: Vec3,
    /// Number of particles
    pub count: usize,
    /// Particle color
    pub color: Color,
    /// Speed multiplier
    pub speed: f32,
}

impl StreamLane {
    /// Create a lane.
    #[must_use]
    pub const fn new(start: Vec3, end: Vec3, count: usize, color: Color, speed: f32) -> Self {
        Self {
            start,
            end,
            count,
            color,
            speed,
        }
    }

    /// The six gold lanes of the scene: three converging on the left
    /// platform, three diverging from the right one.
    #[must_use]
    pub fn default_layout(count: usize) -> Vec<Self> {
        const ROUTES: [([f32; 3], [f32; 3], f32); 6] = [
            ([-18.0, 3.0, 0.0], [-6.0, 2.0, 0.0], 1.0),
            ([-18.0, 0.0, 0.0], [-6.0, 0.0, 0.0], 1.2),
            ([-18.0, -3.0, 0.0], [-6.0, -2.0, 0.0], 0.8),
            ([6.0, 2.0, 0.0], [18.0, 3.0, 0.0], 1.0),
            ([6.0, 0.0, 0.0], [18.0, 0.0, 0.0], 1.2),
            ([6.0, -2.0, 0.0], [18.0, -3.0, 0.0], 0.8),
        ];
        ROUTES
            .iter()
            .map(|&(start, end, speed)| {
                Self::new(
                    Vec3::from_array(start),
                    Vec3::from_array(end),
                    count,
                    Color::GOLD,
                    speed,
                )
            })
            .collect()
    }
}

/// A single particle: where it is along the lane and how big it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    progress: f32,
    base_size: f32,
}

impl Particle {
    /// Position along the lane in [0, 1).
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Size before pulsing.
    #[must_use]
    pub const fn base_size(&self) -> f32 {
        self.base_size
    }
}

/// A lane of particles with its current position and size snapshot.
#[derive(Debug, Clone)]
pub struct ParticleStream {
    lane: StreamLane,
    curve: QuadraticBezier,
    particles: Vec<Particle>,
    positions: Vec<Vec3>,
    sizes: Vec<f32>,
}

impl ParticleStream {
    /// Build a stream, spacing particles evenly and drawing a random bend
    /// and random base sizes from `rng`.
    pub fn new<R: Rng + ?Sized>(lane: StreamLane, rng: &mut R) -> Self {
        let bend = Vec3::new(0.0, rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        let curve = QuadraticBezier::new(lane.start, lane.start.midpoint(lane.end) + bend, lane.end);

        let particles: Vec<Particle> = (0..lane.count)
            .map(|i| Particle {
                progress: i as f32 / lane.count as f32,
                base_size: 0.05 + rng.gen::<f32>() * 0.1,
            })
            .collect();
        let positions = particles.iter().map(|p| curve.sample_at(p.progress)).collect();
        let sizes = particles.iter().map(|p| p.base_size).collect();

        Self {
            lane,
            curve,
            particles,
            positions,
            sizes,
        }
    }

    /// Advance every particle by `delta` seconds and refresh the snapshot.
    ///
    /// Particles reaching the end of the lane restart at the beginning.
    pub fn advance(&mut self, delta: f32, elapsed: f32) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let step = delta * self.lane.speed * PROGRESS_RATE;

        for (i, particle) in self.particles.iter_mut().enumerate() {
            let mut progress = particle.progress + step;
            if !(0.0..1.0).contains(&progress) {
                progress = 0.0;
            }
            particle.progress = progress;

            self.positions[i] = self.curve.sample_at(progress);
            self.sizes[i] = particle.base_size * pulse(elapsed, 3.0, i as f32 * 0.1, 0.3);
        }
    }

    /// Lane configuration.
    #[must_use]
    pub const fn lane(&self) -> &StreamLane {
        &self.lane
    }

    /// Path the particles follow.
    #[must_use]
    pub const fn curve(&self) -> &QuadraticBezier {
        &self.curve
    }

    /// Particles in spawn order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current positions, parallel to [`Self::particles`].
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Current rendered sizes, parallel to [`Self::particles`].
    #[must_use]
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the stream has no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lane(count: usize) -> StreamLane {
        StreamLane::new(
            Vec3::new(-18.0, 3.0, 0.0),
            Vec3::new(-6.0, 2.0, 0.0),
            count,
            Color::GOLD,
            1.0,
        )
    }

    fn stream(count: usize) -> ParticleStream {
        ParticleStream::new(lane(count), &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_initial_progress_evenly_spaced() {
        let s = stream(4);
        let progress: Vec<f32> = s.particles().iter().map(Particle::progress).collect();
        assert_eq!(progress, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(s.positions()[0], s.lane().start);
    }

    #[test]
    fn test_base_size_and_bend_ranges() {
        let s = stream(500);
        for p in s.particles() {
            assert!((0.05..0.15).contains(&p.base_size()));
        }
        let mid = s.lane().start.midpoint(s.lane().end);
        let bend = s.curve().control - mid;
        assert!(bend.x.abs() < 1e-6);
        assert!((-1.0..1.0).contains(&bend.y));
        assert!((-1.0..1.0).contains(&bend.z));
    }

    #[test]
    fn test_advance_moves_by_speed() {
        let mut s = stream(4);
        s.advance(0.5, 0.5);
        assert!((s.particles()[1].progress() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_wraps_at_end_of_lane() {
        let mut s = stream(4);
        // Particle 3 sits at 0.75; 2.5 s at speed 1.0 adds exactly 0.25.
        s.advance(2.5, 2.5);
        assert_eq!(s.particles()[3].progress(), 0.0);
        assert_eq!(s.positions()[3], s.lane().start);
    }

    #[test]
    fn test_sizes_pulse_around_base() {
        let mut s = stream(8);
        s.advance(0.0, 1.234);
        for (i, (p, size)) in s.particles().iter().zip(s.sizes()).enumerate() {
            let expected = p.base_size() * (1.0 + (1.234f32 * 3.0 + i as f32 * 0.1).sin() * 0.3);
            assert!((size - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_stream_is_noop() {
        let mut s = stream(0);
        s.advance(1.0, 1.0);
        assert!(s.is_empty());
        assert!(s.positions().is_empty());
    }

    #[test]
    fn test_negative_and_nan_delta_do_not_move() {
        let mut s = stream(4);
        s.advance(-3.0, 0.0);
        s.advance(f32::NAN, 0.0);
        assert_eq!(s.particles()[2].progress(), 0.5);
    }

    #[test]
    fn test_default_layout() {
        let lanes = StreamLane::default_layout(2000);
        assert_eq!(lanes.len(), 6);
        assert!(lanes.iter().all(|l| l.count == 2000 && l.color == Color::GOLD));
        assert_eq!(lanes[1].speed, 1.2);
        assert_eq!(lanes[5].end, Vec3::new(18.0, -3.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_progress_stays_in_unit_range(
            count in 1usize..64,
            speed in 0.0f32..5.0,
            deltas in proptest::collection::vec(0.0f32..30.0, 1..20),
        ) {
            let mut l = lane(count);
            l.speed = speed;
            let mut s = ParticleStream::new(l, &mut StdRng::seed_from_u64(1));
            let mut elapsed = 0.0;
            for delta in deltas {
                elapsed += delta;
                s.advance(delta, elapsed);
                for p in s.particles() {
                    prop_assert!((0.0..1.0).contains(&p.progress()));
                }
            }
        }
    }
}
