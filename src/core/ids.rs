//! Identifier newtypes and small shared enums.
//!
//! ## CardId / TopicId
//!
//! Card names are interned by the catalog; the rest of the engine only
//! passes these opaque IDs around. A card name is unique across the union
//! of topic names and member names, so a `CardId` identifies a card on the
//! board unambiguously.
//!
//! ## StackId
//!
//! Addresses the stacks a drag gesture can start from or land on. The draw
//! pile is deliberately absent: drawing is its own action, not a drag.

use serde::{Deserialize, Serialize};

/// Unique identifier for an interned card name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Unique identifier for a registered topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicId(pub u16);

impl TopicId {
    /// Create a new topic ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Topic({})", self.0)
    }
}

/// Address of a stack a card can be dragged from or dropped onto.
///
/// Slot and tableau indices are in `0..4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackId {
    /// One of the four topic-collection slots.
    TopicSlot(u8),
    /// One of the four general-purpose tableau stacks.
    Tableau(u8),
    /// The face-up drawn-cards pile. Only its top card is interactable,
    /// and it is never a drop target.
    Waste,
}

impl StackId {
    /// Is this a topic slot?
    #[must_use]
    pub const fn is_topic_slot(self) -> bool {
        matches!(self, StackId::TopicSlot(_))
    }

    /// Topic-slot index, if this is a topic slot.
    #[must_use]
    pub const fn slot_index(self) -> Option<usize> {
        match self {
            StackId::TopicSlot(i) => Some(i as usize),
            _ => None,
        }
    }

    /// Tableau index, if this is a tableau stack.
    #[must_use]
    pub const fn tableau_index(self) -> Option<usize> {
        match self {
            StackId::Tableau(i) => Some(i as usize),
            _ => None,
        }
    }
}

impl std::fmt::Display for StackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackId::TopicSlot(i) => write!(f, "topic{}", i + 1),
            StackId::Tableau(i) => write!(f, "stack{}", i + 1),
            StackId::Waste => write!(f, "drawn-cards"),
        }
    }
}

/// Difficulty tier. Affects which catalog tier is sampled and the move
/// budget multiplier, never the dealing mechanics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Move budget multiplier applied to the session's total card count.
    #[must_use]
    pub const fn move_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 2.5,
            Difficulty::Medium => 2.2,
            Difficulty::Hard => 2.0,
        }
    }

    /// Parse a host-supplied difficulty parameter.
    ///
    /// Invalid or unknown values fall back to `Easy`, per the session-start
    /// contract with the hosting shell.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Session status. `Won` and `Lost` are terminal: once reached, the
/// session accepts no further actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Has the session ended?
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}
