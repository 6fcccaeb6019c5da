//! View-state management for the scene.
//!
//! Follows the Elm Architecture: `State + Message → (State, Command)`.
//! Timed effects are returned as [`Command::Defer`] and executed by the
//! owner of the state, which keeps the state itself free of timers.
//!
//! # Examples
//!
//! ```
//! use particlesway_core::{Command, SegmentIndex, State, ViewMessage, ViewState};
//!
//! let mut view = ViewState::default();
//! let index = SegmentIndex::new(2).expect("valid segment");
//! let command = view.update(ViewMessage::Select(index));
//!
//! assert_eq!(view.selected, Some(index));
//! assert!(view.exploding);
//! assert!(matches!(command, Command::Defer { message: ViewMessage::EndExplosion, .. }));
//! ```

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long the "exploded" view lasts after a selection.
pub const EXPLOSION_DURATION: Duration = Duration::from_millis(2_000);

/// Application state trait.
pub trait State: Clone + Serialize + for<'de> Deserialize<'de> {
    /// Message type for state updates
    type Message;

    /// Update state in response to a message.
    ///
    /// Returns a command describing follow-up effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;
}

/// Effects requested by a state update.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Command<M> {
    /// No command
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Command<M>>),
    /// Deliver `message` back to the state after `delay`, replacing any
    /// previously deferred message.
    Defer {
        /// Delay before delivery
        delay: Duration,
        /// Message to deliver
        message: M,
    },
}

impl<M> Command<M> {
    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flatten into the list of deferred `(delay, message)` pairs.
    pub fn into_deferred(self) -> Vec<(Duration, M)> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(cmds) => cmds.into_iter().flat_map(Self::into_deferred).collect(),
            Self::Defer { delay, message } => vec![(delay, message)],
        }
    }
}

/// Index of one of the four heart segments, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SegmentIndex(u8);

impl SegmentIndex {
    /// Number of segments in the heart sphere.
    pub const COUNT: usize = 4;

    /// Validate a raw index.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSegment`] when `index >= 4`.
    pub fn new(index: usize) -> Result<Self, EngineError> {
        if index < Self::COUNT {
            Ok(Self(index as u8))
        } else {
            Err(EngineError::InvalidSegment {
                index,
                count: Self::COUNT,
            })
        }
    }

    /// The raw index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// All four segment indices in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl TryFrom<usize> for SegmentIndex {
    type Error = EngineError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SegmentIndex> for usize {
    fn from(index: SegmentIndex) -> Self {
        index.get()
    }
}

impl std::fmt::Display for SegmentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared view state: which segment is selected and whether the exploded
/// view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    /// Currently selected segment
    pub selected: Option<SegmentIndex>,
    /// Whether the exploded view is active
    pub exploding: bool,
}

impl ViewState {
    /// Whether `index` is the selected segment.
    #[must_use]
    pub fn is_selected(&self, index: SegmentIndex) -> bool {
        self.selected == Some(index)
    }
}

/// Messages that modify the view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMessage {
    /// A segment was clicked
    Select(SegmentIndex),
    /// The exploded view timed out
    EndExplosion,
    /// Explicit "Reset View"
    Reset,
}

impl State for ViewState {
    type Message = ViewMessage;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            ViewMessage::Select(index) => {
                self.selected = Some(index);
                self.exploding = true;
                Command::Defer {
                    delay: EXPLOSION_DURATION,
                    message: ViewMessage::EndExplosion,
                }
            }
            ViewMessage::EndExplosion => {
                self.exploding = false;
                Command::None
            }
            ViewMessage::Reset => {
                *self = Self::default();
                Command::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_index_bounds() {
        assert!(SegmentIndex::new(0).is_ok());
        assert!(SegmentIndex::new(3).is_ok());
        assert_eq!(
            SegmentIndex::new(4),
            Err(EngineError::InvalidSegment { index: 4, count: 4 })
        );
        assert_eq!(SegmentIndex::all().count(), 4);
    }

    #[test]
    fn test_segment_index_serde_validates() {
        let ok: SegmentIndex = serde_json::from_str("2").unwrap();
        assert_eq!(ok.get(), 2);
        assert!(serde_json::from_str::<SegmentIndex>("9").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "2");
    }

    #[test]
    fn test_select_sets_state_and_defers_revert() {
        for i in 0..4 {
            let index = SegmentIndex::new(i).unwrap();
            let mut view = ViewState::default();
            let cmd = view.update(ViewMessage::Select(index));
            assert_eq!(view.selected, Some(index));
            assert!(view.exploding);
            assert_eq!(
                cmd.into_deferred(),
                vec![(EXPLOSION_DURATION, ViewMessage::EndExplosion)]
            );
        }
    }

    #[test]
    fn test_end_explosion_keeps_selection() {
        let index = SegmentIndex::new(1).unwrap();
        let mut view = ViewState::default();
        let _ = view.update(ViewMessage::Select(index));
        assert!(view.update(ViewMessage::EndExplosion).is_none());
        assert!(!view.exploding);
        assert!(view.is_selected(index));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut view = ViewState {
            selected: SegmentIndex::new(3).ok(),
            exploding: true,
        };
        assert!(view.update(ViewMessage::Reset).is_none());
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn test_batch_flattens() {
        let cmd: Command<u8> = Command::Batch(vec![
            Command::None,
            Command::Defer {
                delay: Duration::from_millis(5),
                message: 1,
            },
            Command::Batch(vec![Command::Defer {
                delay: Duration::from_millis(9),
                message: 2,
            }]),
        ]);
        let deferred = cmd.into_deferred();
        assert_eq!(deferred.len(), 2);
        assert_eq!(deferred[1], (Duration::from_millis(9), 2));
    }
}
