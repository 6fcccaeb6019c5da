//! Browser runtime for the ParticlesWay engine.
//!
//! Bridges the engine to the browser's canvas and pointer input.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

// Cross-platform modules
pub mod pointer;

#[cfg(target_arch = "wasm32")]
pub use app::EngineApp;
#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2DBackend;
pub use pointer::{wheel_zoom, PointerRelease, PointerTracker};
