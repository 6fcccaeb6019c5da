//! Single-slot deferred messages.
//!
//! Scheduling replaces whatever was pending, so at most one deferred message
//! exists per slot and a stale one can never fire after a newer schedule.

use std::time::Duration;

/// A message due at a point on the frame clock.
#[derive(Debug, Clone, PartialEq)]
struct Pending<M> {
    /// Clock time in seconds at which the message becomes due.
    deadline: f64,
    message: M,
}

/// A cancellable deferred action holding at most one pending message.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredAction<M> {
    pending: Option<Pending<M>>,
}

impl<M> Default for DeferredAction<M> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<M> DeferredAction<M> {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `message` to fire `delay` after `now` (seconds), cancelling
    /// any previously pending message. Returns the message that was
    /// cancelled, if any.
    pub fn schedule(&mut self, now: f64, delay: Duration, message: M) -> Option<M> {
        let deadline = now + delay.as_secs_f64();
        self.pending
            .replace(Pending { deadline, message })
            .map(|p| p.message)
    }

    /// Drop the pending message without firing it.
    pub fn cancel(&mut self) -> Option<M> {
        self.pending.take().map(|p| p.message)
    }

    /// Take the message if it is due at `now`. Never fires early.
    pub fn poll(&mut self, now: f64) -> Option<M> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.message),
            _ => None,
        }
    }

    /// Whether a message is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Clock time at which the pending message fires.
    #[must_use]
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Seconds remaining until the pending message fires.
    #[must_use]
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.deadline().map(|d| (d - now).max(0.0))
    }
}
