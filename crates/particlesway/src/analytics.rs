//! Interaction analytics.
//!
//! Sinks are fire-and-forget: a failing sink is logged and never blocks the
//! interaction that produced the event.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{info, warn};

/// Category used for all scene interactions.
pub const VISUALIZATION_CATEGORY: &str = "ParticlesWay Visualization";

/// A single analytics event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event category
    pub category: String,
    /// What happened
    pub action: String,
    /// Free-form label (JSON details for interactions)
    pub label: Option<String>,
    /// Numeric value
    pub value: Option<f64>,
}

impl AnalyticsEvent {
    /// A scene interaction, with optional details serialized into the label.
    pub fn interaction(action: impl Into<String>, details: Option<&serde_json::Value>) -> Self {
        Self {
            category: VISUALIZATION_CATEGORY.to_string(),
            action: action.into(),
            label: details.map(serde_json::Value::to_string),
            value: None,
        }
    }
}

/// Errors a sink may report.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The analytics backend is not reachable.
    #[error("analytics backend unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the event.
    #[error("analytics event rejected: {0}")]
    Rejected(String),
}

/// Destination for analytics events.
pub trait AnalyticsSink {
    /// Deliver one event.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError`] if delivery failed.
    fn send(&mut self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Send `event`, logging and discarding any failure.
pub fn dispatch(sink: &mut dyn AnalyticsSink, event: &AnalyticsEvent) {
    if let Err(err) = sink.send(event) {
        warn!(action = %event.action, error = %err, "analytics event dropped");
    }
}

/// Writes events to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        info!(
            category = %event.category,
            action = %event.action,
            label = event.label.as_deref().unwrap_or(""),
            value = event.value,
            "analytics event"
        );
        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AnalyticsSink for NullSink {
    fn send(&mut self, _event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

/// Keeps events in memory; clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnalyticsSink for MemorySink {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        self.events
            .lock()
            .map_err(|_| AnalyticsError::Unavailable("memory sink poisoned".to_string()))?
            .push(event.clone());
        Ok(())
    }
}
