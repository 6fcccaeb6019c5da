//! ParticlesWay: animation and visual-state engine for a 3D data-flow scene.
//!
//! A central "heart" sphere of four selectable segments sits between two
//! cache platforms, linked by lanes of particles flowing along curves.
//! The engine advances every animated part per frame and describes the
//! result as a [`SceneFrame`] for a [`RenderBackend`] to draw.
//!
//! # Native Usage
//!
//! ```
//! use particlesway::{EngineConfig, ParticlesWayEngine, RecordingRenderer};
//!
//! let mut engine = ParticlesWayEngine::new(EngineConfig {
//!     seed: Some(7),
//!     ..EngineConfig::default()
//! });
//! engine.handle_segment_click(1).unwrap();
//! engine.advance(1.0 / 60.0);
//!
//! let mut backend = RecordingRenderer::new();
//! engine.render(&mut backend).unwrap();
//! assert_eq!(backend.frames_rendered(), 1);
//! ```
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { EngineApp } from './particlesway.js';
//!
//! async function main() {
//!     await init();
//!     const app = new EngineApp('canvas', '{"particle_density": "medium"}');
//!     const frame = (t) => { app.frame(t); requestAnimationFrame(frame); };
//!     requestAnimationFrame(frame);
//! }
//! ```

#![allow(
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::struct_excessive_bools,
    clippy::cast_lossless,
    clippy::needless_pass_by_value
)]

pub use particlesway_core::*;

pub mod analytics;
pub mod browser;
pub mod camera;
pub mod config;
pub mod decor;
pub mod engine;
pub mod heart;
pub mod loading;
pub mod stats;
pub mod stream;

pub use analytics::{AnalyticsEvent, AnalyticsSink, MemorySink, NullSink, TracingSink};
pub use camera::{CameraInput, CameraRig};
pub use config::{ConfigError, Density, DeviceProfile, EngineConfig};
pub use engine::{ControlAction, EngineSnapshot, ParticlesWayEngine, RenderOutcome};
pub use heart::HeartSphere;
pub use stats::{DashboardSide, LiveStats, RandomWalkStats, StatsSource};
pub use stream::{ParticleStream, StreamLane};

#[cfg(target_arch = "wasm32")]
pub use browser::{Canvas2DBackend, EngineApp};
