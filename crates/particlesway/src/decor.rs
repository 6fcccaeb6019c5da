//! Decorative scene elements: cache platforms and the star field.

use particlesway_core::{pulse, Color, Material, Primitive, Shape, Transform, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Radius of a platform disc.
pub const PLATFORM_RADIUS: f32 = 2.5;
/// Orbit radius of the data cubes.
pub const CUBE_ORBIT_RADIUS: f32 = 3.0;
/// Number of data cubes per platform.
pub const CUBE_COUNT: usize = 5;

const RING_SPIN_PER_TICK: f32 = 0.005;
const STAR_SPIN_PER_SEC: f32 = 0.01;

/// Which side of the heart a platform sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformSide {
    /// Ingestion side
    Left,
    /// Delivery side
    Right,
}

impl PlatformSide {
    /// Platform centre.
    #[must_use]
    pub const fn position(self) -> Vec3 {
        match self {
            Self::Left => Vec3::new(-12.0, 0.0, 0.0),
            Self::Right => Vec3::new(12.0, 0.0, 0.0),
        }
    }

    /// Tier caption under the platform title.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::Left => "Hot Tier (Ingestion)",
            Self::Right => "Hot Tier (Delivery)",
        }
    }

    const fn id(self) -> &'static str {
        match self {
            Self::Left => "platform-left",
            Self::Right => "platform-right",
        }
    }
}

/// A glowing cache platform with a spinning ring and orbiting cubes.
#[derive(Debug, Clone, PartialEq)]
pub struct CachePlatform {
    side: PlatformSide,
    ring_rotation: f32,
    glow_scale: f32,
    cubes: [Vec3; CUBE_COUNT],
}

impl CachePlatform {
    /// Create a platform at rest.
    #[must_use]
    pub fn new(side: PlatformSide) -> Self {
        let mut platform = Self {
            side,
            ring_rotation: 0.0,
            glow_scale: 1.0,
            cubes: [Vec3::ZERO; CUBE_COUNT],
        };
        platform.place_cubes(0.0);
        platform
    }

    /// Advance one frame.
    pub fn tick(&mut self, elapsed: f32) {
        self.ring_rotation += RING_SPIN_PER_TICK;
        self.glow_scale = pulse(elapsed, 2.0, 0.0, 0.1);
        self.place_cubes(elapsed);
    }

    fn place_cubes(&mut self, elapsed: f32) {
        for (i, cube) in self.cubes.iter_mut().enumerate() {
            let angle = i as f32 / CUBE_COUNT as f32 * TAU;
            let orbit = angle + elapsed * 0.5;
            *cube = Vec3::new(
                orbit.cos() * CUBE_ORBIT_RADIUS,
                (angle * 2.0 + elapsed * 0.3).sin() * 0.5,
                orbit.sin() * CUBE_ORBIT_RADIUS,
            );
        }
    }

    /// Side of the scene.
    #[must_use]
    pub const fn side(&self) -> PlatformSide {
        self.side
    }

    /// Accumulated ring rotation (radians).
    #[must_use]
    pub const fn ring_rotation(&self) -> f32 {
        self.ring_rotation
    }

    /// Current glow scale.
    #[must_use]
    pub const fn glow_scale(&self) -> f32 {
        self.glow_scale
    }

    /// Cube positions relative to the platform centre.
    #[must_use]
    pub const fn cubes(&self) -> &[Vec3; CUBE_COUNT] {
        &self.cubes
    }

    /// Drawable primitives.
    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        let id = self.side.id();
        let centre = self.side.position();
        let flat = Transform::at(centre).rotated(FRAC_PI_2, 0.0);
        let amber = Color::AMBER;

        let mut out = vec![
            Primitive::new(
                format!("{id}-ring"),
                Shape::Torus {
                    radius: PLATFORM_RADIUS,
                    tube: 0.15,
                },
                flat.rotated(FRAC_PI_2, self.ring_rotation),
                Material::glowing(amber, 0.8),
            ),
            Primitive::new(
                format!("{id}-disc"),
                Shape::Cylinder {
                    radius: PLATFORM_RADIUS,
                    height: 0.0,
                },
                flat,
                Material::glowing(amber, 0.3).with_opacity(0.3),
            ),
            Primitive::new(
                format!("{id}-glow"),
                Shape::Ring {
                    inner: PLATFORM_RADIUS,
                    outer: 3.5,
                },
                flat.scaled(self.glow_scale),
                Material::solid(amber).with_opacity(0.2),
            ),
            Primitive::new(
                format!("{id}-label"),
                Shape::Label {
                    text: format!("Redis Cache\n{}", self.side.caption()),
                },
                Transform::at(centre),
                Material::solid(Color::WHITE),
            ),
        ];

        for (i, cube) in self.cubes.iter().enumerate() {
            out.push(Primitive::new(
                format!("{id}-cube-{i}"),
                Shape::Cube { size: 0.2 },
                Transform::at(centre + *cube),
                Material {
                    emissive: amber,
                    emissive_intensity: 0.5,
                    ..Material::solid(Color::GOLD)
                },
            ));
        }
        out
    }
}

/// Background stars scattered in a spherical shell.
#[derive(Debug, Clone)]
pub struct StarField {
    positions: Vec<Vec3>,
    sizes: Vec<f32>,
    rotation_y: f32,
}

impl StarField {
    /// Default star count.
    pub const COUNT: usize = 5_000;
    /// Inner radius of the shell.
    pub const RADIUS: f32 = 100.0;
    /// Thickness of the shell.
    pub const DEPTH: f32 = 50.0;

    /// Scatter `count` stars between `radius` and `radius + depth`.
    pub fn new<R: Rng + ?Sized>(count: usize, radius: f32, depth: f32, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);
        for _ in 0..count {
            let r = radius + depth * rng.gen::<f32>();
            let theta = rng.gen::<f32>() * TAU;
            let cos_phi: f32 = rng.gen_range(-1.0..1.0);
            let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
            positions.push(Vec3::new(
                r * sin_phi * theta.cos(),
                r * cos_phi,
                r * sin_phi * theta.sin(),
            ));
            sizes.push(0.5 + rng.gen::<f32>() * 0.5);
        }
        Self {
            positions,
            sizes,
            rotation_y: 0.0,
        }
    }

    /// The standard star field.
    pub fn standard<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(Self::COUNT, Self::RADIUS, Self::DEPTH, rng)
    }

    /// Rotate slowly by `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        if delta.is_finite() && delta > 0.0 {
            self.rotation_y = (self.rotation_y + STAR_SPIN_PER_SEC * delta).rem_euclid(TAU);
        }
    }

    /// Star positions before rotation.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Number of stars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no stars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current rotation (radians).
    #[must_use]
    pub const fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// The star field as a single point cloud.
    #[must_use]
    pub fn primitive(&self) -> Primitive {
        Primitive::new(
            "stars",
            Shape::PointCloud {
                positions: self.positions.clone(),
                sizes: self.sizes.clone(),
            },
            Transform::IDENTITY.rotated(0.0, self.rotation_y),
            Material::solid(Color::WHITE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_platform_positions_and_captions() {
        assert_eq!(PlatformSide::Left.position(), Vec3::new(-12.0, 0.0, 0.0));
        assert_eq!(PlatformSide::Right.caption(), "Hot Tier (Delivery)");
        assert_eq!(PlatformSide::Left.caption(), "Hot Tier (Ingestion)");
    }

    #[test]
    fn test_ring_spins_per_tick() {
        let mut platform = CachePlatform::new(PlatformSide::Left);
        for _ in 0..10 {
            platform.tick(0.0);
        }
        assert!((platform.ring_rotation() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_glow_pulse() {
        let mut platform = CachePlatform::new(PlatformSide::Right);
        platform.tick(0.4);
        let expected = 1.0 + (0.8f32).sin() * 0.1;
        assert!((platform.glow_scale() - expected).abs() < 1e-6);
        assert!((0.9..=1.1).contains(&platform.glow_scale()));
    }

    #[test]
    fn test_cubes_orbit_at_radius() {
        let mut platform = CachePlatform::new(PlatformSide::Left);
        platform.tick(3.7);
        for cube in platform.cubes() {
            let horizontal = cube.x.hypot(cube.z);
            assert!((horizontal - CUBE_ORBIT_RADIUS).abs() < 1e-5);
            assert!(cube.y.abs() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_platform_primitives() {
        let platform = CachePlatform::new(PlatformSide::Right);
        let prims = platform.primitives();
        assert_eq!(prims.len(), 4 + CUBE_COUNT);
        assert!(prims.iter().any(|p| p.id == "platform-right-label"));
    }

    #[test]
    fn test_star_field_shell() {
        let stars = StarField::standard(&mut StdRng::seed_from_u64(3));
        assert_eq!(stars.len(), 5_000);
        for p in stars.positions() {
            let r = p.length();
            assert!(r >= 100.0 - 1e-3 && r <= 150.0 + 1e-3, "radius {r}");
        }
    }

    #[test]
    fn test_star_field_rotates() {
        let mut stars = StarField::new(10, 100.0, 50.0, &mut StdRng::seed_from_u64(3));
        stars.tick(2.0);
        assert!((stars.rotation_y() - 0.02).abs() < 1e-6);
        stars.tick(-1.0);
        assert!((stars.rotation_y() - 0.02).abs() < 1e-6);
    }
}
