//! Drag gesture guard.
//!
//! Exactly one gesture may be in flight at a time. The state machine
//! replaces ambient drag globals: a gesture is created on drag start,
//! destroyed on drop or cancel, and force-reset by a safety timeout when
//! a pointer-up is lost. Drag-move position sampling is advisory and
//! never reaches the engine; only the terminal drop commits a transition.

use crate::core::{CardId, StackId};
use crate::rules::validator::Sequence;

/// A gesture that never completes is force-reset after this long.
pub const GESTURE_TIMEOUT_MS: u64 = 60_000;

/// Minimum spacing between two drag starts.
pub const DRAG_DEBOUNCE_MS: u64 = 300;

/// An in-flight drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GestureSession {
    /// The grabbed card.
    pub anchor: CardId,
    /// The anchor plus the run dragged along with it.
    pub sequence: Sequence,
    /// Where the drag started.
    pub from: StackId,
    /// Host-supplied monotonic start time.
    pub started_at_ms: u64,
}

impl GestureSession {
    /// Has this gesture outlived the safety timeout?
    #[must_use]
    pub fn timed_out(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) >= GESTURE_TIMEOUT_MS
    }
}

/// The session's gesture slot.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(GestureSession),
}

impl GestureState {
    /// Is no gesture in flight?
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    /// The in-flight gesture, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<&GestureSession> {
        match self {
            GestureState::Idle => None,
            GestureState::Dragging(gesture) => Some(gesture),
        }
    }
}

/// How a drop resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The transfer was legal and applied.
    Moved,
    /// Illegal or missing target; the sequence returns to its origin.
    SnappedBack,
}
