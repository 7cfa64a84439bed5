//! Boundary events emitted by the session.
//!
//! The engine never calls into the presentation layer; it queues these
//! events and the shell drains them after each action. They replace the
//! original custom-DOM-event messaging with explicit message types.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, GameStatus, StackId};

/// Something the presentation layer should react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A card moved from the draw pile to the waste top.
    CardDrawn { card: CardId },

    /// A validated transfer was applied.
    CardsMoved {
        cards: Vec<CardId>,
        from: StackId,
        to: StackId,
    },

    /// A topic slot's deferred clear resolved; the slot is empty again.
    TopicCleared { slot: u8 },

    /// The session transitioned between Playing/Won/Lost.
    StatusChanged { status: GameStatus },

    /// The move budget changed.
    MoveCountChanged { remaining: i32 },
}
