//! Core types and traits for the ParticlesWay scene engine.
//!
//! This crate provides the renderer-independent building blocks:
//! - Geometry: [`Vec3`], [`Point2`], [`Viewport`]
//! - Color: [`Color`] parsed from and written to hex
//! - Motion: [`Interpolate`], [`SmoothingMode`], [`Easing`], [`pulse`], [`QuadraticBezier`]
//! - Time: [`FrameClock`], [`Interval`], [`DeferredAction`]
//! - State: [`State`], [`Command`], [`ViewState`]
//! - Rendering: [`SceneFrame`] and the [`RenderBackend`] capability

pub mod animation;
pub mod clock;
mod color;
pub mod curve;
pub mod deferred;
pub mod draw;
mod error;
mod geometry;
mod state;

pub use animation::{pulse, Easing, Interpolate, SmoothingMode, Tween};
pub use clock::{FrameClock, Interval};
pub use color::Color;
pub use curve::QuadraticBezier;
pub use deferred::DeferredAction;
pub use draw::{
    Anchor, CameraState, Card, Control, Light, Material, Overlay, PostEffect, Primitive,
    Projected, RecordingRenderer, RenderBackend, SceneFrame, Shape, Transform,
};
pub use error::{EngineError, RenderError};
pub use geometry::{Point2, Vec3, Viewport};
pub use state::{Command, SegmentIndex, State, ViewMessage, ViewState, EXPLOSION_DURATION};
