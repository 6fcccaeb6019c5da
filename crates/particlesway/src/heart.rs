//! The four-segment heart sphere at the centre of the scene.

use particlesway_core::{
    pulse, CameraState, Color, Command, Material, Overlay, Point2, Primitive, SegmentIndex, Shape,
    SmoothingMode, State, Transform, Vec3, ViewMessage, ViewState, Viewport,
};
use serde::Serialize;
use std::f32::consts::FRAC_PI_2;
use tracing::debug;

/// Radius of a segment sphere at scale 1.
pub const SEGMENT_RADIUS: f32 = 1.8;
/// Radius of the transparent outer shell.
pub const SHELL_RADIUS: f32 = 6.0;
/// Radius of the orbit ring around the shell.
pub const RING_RADIUS: f32 = 6.5;
/// Number of sparkles inside the shell.
pub const SPARKLE_COUNT: u32 = 2_000;

const SELECTED_SCALE: f32 = 1.3;
const RECEDED_SCALE: f32 = 0.8;
const BODY_SPIN_PER_TICK: f32 = 0.002;

/// Static figures shown in a segment's info card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentStats {
    /// Node count label
    pub nodes: &'static str,
    /// Active particle count label
    pub particles: &'static str,
}

/// One colored partition of the heart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Short color name
    pub name: &'static str,
    /// Layer description
    pub description: &'static str,
    /// Segment color
    pub color: Color,
    /// Position inside the heart body
    pub anchor: Vec3,
    /// Info card figures
    pub stats: SegmentStats,
    /// Current uniform scale
    pub scale: f32,
}

impl Segment {
    fn new(
        name: &'static str,
        description: &'static str,
        rgb: u32,
        anchor: [f32; 3],
        particles: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            color: Color::from_rgb_u32(rgb),
            anchor: Vec3::from_array(anchor),
            stats: SegmentStats {
                nodes: "250M",
                particles,
            },
            scale: 1.0,
        }
    }
}

/// The heart: a rotating body holding four selectable segments.
#[derive(Debug, Clone)]
pub struct HeartSphere {
    segments: [Segment; SegmentIndex::COUNT],
    rotation_y: f32,
    tilt_x: f32,
    smoothing: SmoothingMode,
}

impl Default for HeartSphere {
    fn default() -> Self {
        Self::new(SmoothingMode::default())
    }
}

impl HeartSphere {
    /// Create the heart with its four fixed segments.
    #[must_use]
    pub fn new(smoothing: SmoothingMode) -> Self {
        Self {
            segments: [
                Segment::new("Teal", "Data Ingestion Layer", 0x00_BC_D4, [-2.5, 2.5, 0.0], "3.7M"),
                Segment::new("Orange", "Processing Layer", 0xFF_98_00, [2.5, 2.5, 0.0], "4.2M"),
                Segment::new("Purple", "Analysis Layer", 0x9C_27_B0, [-2.5, -2.5, 0.0], "3.9M"),
                Segment::new("Red", "Distribution Layer", 0xF4_43_36, [2.5, -2.5, 0.0], "3.2M"),
            ],
            rotation_y: 0.0,
            tilt_x: 0.0,
            smoothing,
        }
    }

    /// Apply a segment click to the shared view state.
    ///
    /// Returns the deferred reversion the caller must schedule.
    pub fn on_segment_select(
        &self,
        index: SegmentIndex,
        view: &mut ViewState,
    ) -> Command<ViewMessage> {
        debug!(
            segment = index.get(),
            name = self.segments[index.get()].name,
            "segment selected"
        );
        view.update(ViewMessage::Select(index))
    }

    /// Scale a segment is heading toward this frame.
    #[must_use]
    pub fn target_scale(index: SegmentIndex, elapsed: f32, view: &ViewState) -> f32 {
        if view.is_selected(index) {
            SELECTED_SCALE
        } else if view.exploding {
            RECEDED_SCALE
        } else {
            pulse(elapsed, 2.0, index.get() as f32, 0.05)
        }
    }

    /// Emissive intensity of a segment.
    #[must_use]
    pub fn emissive_intensity(index: SegmentIndex, view: &ViewState) -> f32 {
        if view.is_selected(index) {
            0.8
        } else {
            0.5
        }
    }

    /// Advance body rotation and segment scales by one frame.
    pub fn tick(&mut self, delta: f32, elapsed: f32, view: &ViewState) {
        if !view.exploding {
            self.rotation_y += BODY_SPIN_PER_TICK;
            self.tilt_x = (elapsed * 0.2).sin() * 0.05;
        }

        for index in SegmentIndex::all() {
            let target = Self::target_scale(index, elapsed, view);
            let segment = &mut self.segments[index.get()];
            segment.scale = self.smoothing.step(&segment.scale, &target, delta);
        }
    }

    /// The four segments.
    #[must_use]
    pub const fn segments(&self) -> &[Segment; SegmentIndex::COUNT] {
        &self.segments
    }

    /// A single segment.
    #[must_use]
    pub fn segment(&self, index: SegmentIndex) -> &Segment {
        &self.segments[index.get()]
    }

    /// Body rotation around Y (radians).
    #[must_use]
    pub const fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Body tilt around X (radians).
    #[must_use]
    pub const fn tilt_x(&self) -> f32 {
        self.tilt_x
    }

    /// Transform of the heart body.
    #[must_use]
    pub const fn body_transform(&self) -> Transform {
        Transform::IDENTITY.rotated(self.tilt_x, self.rotation_y)
    }

    /// World position of a segment centre.
    #[must_use]
    pub fn world_anchor(&self, index: SegmentIndex) -> Vec3 {
        self.body_transform().apply(self.segments[index.get()].anchor)
    }

    /// Segment under a screen point, nearest to the camera first.
    #[must_use]
    pub fn pick(
        &self,
        camera: &CameraState,
        screen: Point2,
        viewport: Viewport,
    ) -> Option<SegmentIndex> {
        SegmentIndex::all()
            .filter_map(|index| {
                let projected = camera.project(self.world_anchor(index), viewport)?;
                let radius = SEGMENT_RADIUS * self.segments[index.get()].scale * projected.scale;
                (projected.screen.distance(&screen) <= radius).then_some((index, projected.depth))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Drawable primitives for the current frame.
    #[must_use]
    pub fn primitives(&self, view: &ViewState) -> Vec<Primitive> {
        let body = self.body_transform();
        let shell = Color::SHELL_BLUE;

        let mut out = vec![
            Primitive::new(
                "heart-shell",
                Shape::Sphere {
                    radius: SHELL_RADIUS,
                },
                body,
                Material::solid(shell).with_opacity(0.15),
            ),
            Primitive::new(
                "heart-glow",
                Shape::Sphere {
                    radius: SHELL_RADIUS,
                },
                body.scaled(0.95),
                Material::solid(shell).with_opacity(0.08),
            ),
            Primitive::new(
                "heart-grid",
                Shape::Sphere { radius: 6.05 },
                body,
                Material::solid(Color::WHITE).with_opacity(0.05).wireframe(),
            ),
        ];

        for index in SegmentIndex::all() {
            let segment = &self.segments[index.get()];
            let material = Material::glowing(segment.color, Self::emissive_intensity(index, view))
                .with_opacity(0.9);
            out.push(Primitive::new(
                format!("segment-{index}"),
                Shape::Sphere {
                    radius: SEGMENT_RADIUS,
                },
                Transform::at(self.world_anchor(index))
                    .rotated(self.tilt_x, self.rotation_y)
                    .scaled(segment.scale),
                material,
            ));
        }

        out.push(Primitive::new(
            "heart-sparkles",
            Shape::Sparkles {
                count: SPARKLE_COUNT,
                scale: 5.5,
                size: 3.0,
            },
            body,
            Material::solid(Color::WHITE).with_opacity(0.6),
        ));
        out.push(Primitive::new(
            "heart-title",
            Shape::Label {
                text: "PostgreSQL".to_string(),
            },
            body,
            Material::solid(Color::WHITE),
        ));
        out.push(Primitive::new(
            "heart-ring",
            Shape::Torus {
                radius: RING_RADIUS,
                tube: 0.05,
            },
            Transform::IDENTITY.rotated(self.tilt_x + FRAC_PI_2, self.rotation_y),
            Material {
                emissive: shell,
                emissive_intensity: 0.5,
                ..Material::solid(Color::WHITE).with_opacity(0.3)
            },
        ));
        out
    }

    /// Info card for the selected segment.
    #[must_use]
    pub fn info_overlay(&self, view: &ViewState) -> Option<Overlay> {
        let index = view.selected?;
        let segment = &self.segments[index.get()];
        Some(Overlay::Tooltip {
            anchor: self.world_anchor(index),
            color: segment.color,
            title: format!("{} Partition", segment.name),
            lines: vec![
                segment.description.to_string(),
                format!("Nodes: {}", segment.stats.nodes),
                format!("Active Particles: {}", segment.stats.particles),
            ],
        })
    }
}
