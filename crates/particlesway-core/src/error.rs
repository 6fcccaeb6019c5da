//! Error types shared by the scene engine.

use thiserror::Error;

/// Errors raised by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A segment index outside the four heart segments.
    #[error("segment index {index} out of range (expected 0..{count})")]
    InvalidSegment {
        /// Index that was requested
        index: usize,
        /// Number of segments available
        count: usize,
    },

    /// Operation attempted after the engine was shut down.
    #[error("engine has been shut down")]
    ShutDown,

    /// Unknown particle density name.
    #[error("unknown particle density '{0}' (expected low, medium or high)")]
    UnknownDensity(String),
}

/// Errors reported by a render backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// No drawing context could be obtained (e.g. WebGL/Canvas unavailable).
    #[error("rendering context unavailable: {0}")]
    ContextUnavailable(String),

    /// The backend failed while drawing a frame.
    #[error("backend failed to draw frame: {0}")]
    Backend(String),
}
