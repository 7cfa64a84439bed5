//! Session orchestration.
//!
//! The `GameSession` is the single writer of board state. It applies
//! player actions (draw, reshuffle, move), detects topic completion,
//! schedules deferred slot clears, guards drag gestures against
//! re-entrancy, evaluates win/loss, and emits typed boundary events for
//! the rendering shell to drain.

pub mod controller;
pub mod events;
pub mod gesture;

pub use controller::{ActionError, GameSession, PendingClear};
pub use events::SessionEvent;
pub use gesture::{DropOutcome, GestureSession, GestureState};
