//! Renderer-neutral scene description.
//!
//! The engine emits one [`SceneFrame`] per tick. Back-ends (Canvas2D in the
//! browser, a WebGL binding, or [`RecordingRenderer`] in tests) consume it
//! through the [`RenderBackend`] capability.

use crate::error::RenderError;
use crate::geometry::{Point2, Vec3, Viewport};
use crate::Color;
use serde::{Deserialize, Serialize};

/// Near plane distance used by [`CameraState::project`].
pub const NEAR_PLANE: f32 = 0.1;

// =============================================================================
// Camera
// =============================================================================

/// Snapshot of the camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Eye position
    pub position: Vec3,
    /// Look-at target
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
}

/// A world point mapped to the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen position in pixels
    pub screen: Point2,
    /// Distance along the view direction
    pub depth: f32,
    /// Pixels per world unit at this depth
    pub scale: f32,
}

impl CameraState {
    /// Orthonormal (forward, right, up) basis of the view.
    #[must_use]
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalize();
        let mut right = forward.cross(Vec3::UP).normalize();
        if right == Vec3::ZERO {
            // Looking straight up or down.
            right = Vec3::new(1.0, 0.0, 0.0);
        }
        let up = right.cross(forward);
        (forward, right, up)
    }

    /// Perspective-project `point` into `viewport`.
    ///
    /// Returns `None` for points behind the near plane.
    #[must_use]
    pub fn project(&self, point: Vec3, viewport: Viewport) -> Option<Projected> {
        let (forward, right, up) = self.basis();
        let rel = point - self.position;
        let depth = rel.dot(forward);
        if depth <= NEAR_PLANE || !depth.is_finite() {
            return None;
        }

        let focal = 1.0 / (self.fov_deg.to_radians() / 2.0).tan();
        let ndc_x = rel.dot(right) * focal / (depth * viewport.aspect_ratio());
        let ndc_y = rel.dot(up) * focal / depth;

        Some(Projected {
            screen: Point2::new(
                (ndc_x + 1.0) * 0.5 * viewport.width,
                (1.0 - ndc_y) * 0.5 * viewport.height,
            ),
            depth,
            scale: focal * viewport.height * 0.5 / depth,
        })
    }
}

// =============================================================================
// Primitives
// =============================================================================

/// Position, orientation and uniform scale of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,
    /// Rotation around X, applied first (radians)
    pub rotation_x: f32,
    /// Rotation around Y (radians)
    pub rotation_y: f32,
    /// Uniform scale
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation_x: 0.0,
        rotation_y: 0.0,
        scale: 1.0,
    };

    /// Pure translation.
    #[must_use]
    pub const fn at(translation: Vec3) -> Self {
        Self {
            translation,
            rotation_x: 0.0,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }

    /// Builder: set the uniform scale.
    #[must_use]
    pub const fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set the rotation.
    #[must_use]
    pub const fn rotated(mut self, rotation_x: f32, rotation_y: f32) -> Self {
        self.rotation_x = rotation_x;
        self.rotation_y = rotation_y;
        self
    }

    /// Map a local point into world space.
    #[must_use]
    pub fn apply(&self, local: Vec3) -> Vec3 {
        (local * self.scale)
            .rotate_x(self.rotation_x)
            .rotate_y(self.rotation_y)
            + self.translation
    }
}

/// Surface appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color
    pub color: Color,
    /// Emissive color
    pub emissive: Color,
    /// Emissive intensity
    pub emissive_intensity: f32,
    /// Opacity (1 = opaque)
    pub opacity: f32,
    /// Draw edges only
    pub wireframe: bool,
}

impl Material {
    /// An opaque, non-emissive material.
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            opacity: 1.0,
            wireframe: false,
        }
    }

    /// A material glowing in its own color.
    #[must_use]
    pub const fn glowing(color: Color, intensity: f32) -> Self {
        Self {
            color,
            emissive: color,
            emissive_intensity: intensity,
            opacity: 1.0,
            wireframe: false,
        }
    }

    /// Builder: set opacity.
    #[must_use]
    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Builder: draw as wireframe.
    #[must_use]
    pub const fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }
}

/// Geometry of a primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Sphere
    Sphere {
        /// Radius
        radius: f32,
    },
    /// Torus lying in the XY plane
    Torus {
        /// Ring radius
        radius: f32,
        /// Tube radius
        tube: f32,
    },
    /// Flat annulus
    Ring {
        /// Inner radius
        inner: f32,
        /// Outer radius
        outer: f32,
    },
    /// Short cylinder
    Cylinder {
        /// Radius
        radius: f32,
        /// Height
        height: f32,
    },
    /// Axis-aligned cube
    Cube {
        /// Edge length
        size: f32,
    },
    /// Independently sized points in world space
    PointCloud {
        /// Point positions
        positions: Vec<Vec3>,
        /// Point sizes, parallel to `positions`
        sizes: Vec<f32>,
    },
    /// Randomly scattered glints inside a box
    Sparkles {
        /// Number of sparkles
        count: u32,
        /// Extent of the box
        scale: f32,
        /// Size of each sparkle
        size: f32,
    },
    /// Text anchored in world space
    Label {
        /// Text to draw
        text: String,
    },
}

/// A drawable element of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Stable identifier (e.g. `"segment-2"`, `"lane-4"`)
    pub id: String,
    /// Geometry
    pub shape: Shape,
    /// Placement
    pub transform: Transform,
    /// Appearance
    pub material: Material,
}

impl Primitive {
    /// Create a primitive.
    #[must_use]
    pub fn new(id: impl Into<String>, shape: Shape, transform: Transform, material: Material) -> Self {
        Self {
            id: id.into(),
            shape,
            transform,
            material,
        }
    }
}

/// Scene lighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    /// Uniform ambient light
    Ambient {
        /// Intensity
        intensity: f32,
    },
    /// Omnidirectional point light
    Point {
        /// Position
        position: Vec3,
        /// Intensity
        intensity: f32,
        /// Color
        color: Color,
    },
}

/// Screen-space post-processing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PostEffect {
    /// Bloom around bright pixels
    Bloom {
        /// Strength
        intensity: f32,
        /// Luminance threshold
        luminance_threshold: f32,
        /// Luminance smoothing
        luminance_smoothing: f32,
    },
    /// Color fringing offset
    ChromaticAberration {
        /// Channel offset
        offset: f32,
    },
}

// =============================================================================
// Overlays
// =============================================================================

/// Screen corner or edge an overlay attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Top-left corner
    TopLeft,
    /// Top-right corner
    TopRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-right corner
    BottomRight,
    /// Screen centre
    Center,
}

/// A labelled value with an optional trend ("+2.3%").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card title
    pub title: String,
    /// Formatted value
    pub value: String,
    /// Trend annotation
    pub trend: Option<String>,
}

impl Card {
    /// Card without a trend.
    #[must_use]
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            trend: None,
        }
    }

    /// Builder: attach a trend annotation.
    #[must_use]
    pub fn with_trend(mut self, trend: impl Into<String>) -> Self {
        self.trend = Some(trend.into());
        self
    }
}

/// A toggle or action button in a control panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Button label
    pub label: String,
    /// Whether the control is currently on
    pub active: bool,
}

/// 2D content drawn over the 3D scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Overlay {
    /// A titled panel of cards with an optional bar chart
    Panel {
        /// Placement
        anchor: Anchor,
        /// Panel title
        title: String,
        /// Stat cards
        cards: Vec<Card>,
        /// Bar heights in percent
        chart: Vec<f32>,
    },
    /// A row of controls
    Controls {
        /// Placement
        anchor: Anchor,
        /// Buttons
        controls: Vec<Control>,
    },
    /// A world-anchored info card
    Tooltip {
        /// World position the card points at
        anchor: Vec3,
        /// Accent color
        color: Color,
        /// Heading
        title: String,
        /// Body lines
        lines: Vec<String>,
    },
    /// Progress bar with status text
    Progress {
        /// Percent complete (0-100)
        percent: u8,
        /// Status text
        text: String,
    },
}

// =============================================================================
// Frame
// =============================================================================

/// Everything a back-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    /// Seconds since the engine started
    pub time: f64,
    /// Background color
    pub background: Color,
    /// Camera for this frame
    pub camera: CameraState,
    /// Lights
    pub lights: Vec<Light>,
    /// Drawable primitives, back to front in declaration order
    pub primitives: Vec<Primitive>,
    /// Post-processing chain
    pub effects: Vec<PostEffect>,
    /// 2D overlays
    pub overlays: Vec<Overlay>,
}

impl SceneFrame {
    /// Find a primitive by id.
    #[must_use]
    pub fn primitive(&self, id: &str) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.id == id)
    }

    /// Total number of points across all point clouds.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.primitives
            .iter()
            .map(|p| match &p.shape {
                Shape::PointCloud { positions, .. } => positions.len(),
                _ => 0,
            })
            .sum()
    }
}

/// A rendering capability.
///
/// Back-ends that cannot obtain a drawing context report
/// [`RenderError::ContextUnavailable`]; the engine then asks for the
/// loading placeholder via [`RenderBackend::present_fallback`].
pub trait RenderBackend {
    /// Draw a full scene frame.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the frame could not be drawn.
    fn render(&mut self, frame: &SceneFrame) -> Result<(), RenderError>;

    /// Draw the loading placeholder instead of the scene.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when even the placeholder cannot be drawn.
    fn present_fallback(&mut self, percent: u8, text: &str) -> Result<(), RenderError> {
        let _ = (percent, text);
        Ok(())
    }
}

/// A back-end that records frames instead of drawing them.
///
/// Useful for tests and for headless simulation output.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    last_frame: Option<SceneFrame>,
    frames_rendered: usize,
    fallbacks: Vec<(u8, String)>,
    context_unavailable: bool,
}

impl RecordingRenderer {
    /// Create a new recorder with a working context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that behaves as if no drawing context exists.
    #[must_use]
    pub fn without_context() -> Self {
        Self {
            context_unavailable: true,
            ..Self::default()
        }
    }

    /// The most recently rendered frame.
    #[must_use]
    pub const fn last_frame(&self) -> Option<&SceneFrame> {
        self.last_frame.as_ref()
    }

    /// Number of frames rendered successfully.
    #[must_use]
    pub const fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    /// Placeholder presentations as `(percent, text)`.
    #[must_use]
    pub fn fallbacks(&self) -> &[(u8, String)] {
        &self.fallbacks
    }

    /// Clear everything recorded so far.
    pub fn clear(&mut self) {
        self.last_frame = None;
        self.frames_rendered = 0;
        self.fallbacks.clear();
    }
}

impl RenderBackend for RecordingRenderer {
    fn render(&mut self, frame: &SceneFrame) -> Result<(), RenderError> {
        if self.context_unavailable {
            return Err(RenderError::ContextUnavailable(
                "recording renderer has no context".to_string(),
            ));
        }
        self.last_frame = Some(frame.clone());
        self.frames_rendered += 1;
        Ok(())
    }

    fn present_fallback(&mut self, percent: u8, text: &str) -> Result<(), RenderError> {
        self.fallbacks.push((percent, text.to_string()));
        Ok(())
    }
}
