//! Topic data: a topic card and the member cards collected under it.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Difficulty, TopicId};

/// A registered topic.
///
/// Invariants (enforced by `TopicCatalog` at registration):
/// - `members` never contains the topic card itself
/// - every member belongs to exactly this one topic
/// - the topic name collides with no other card name in the catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier for this topic.
    pub id: TopicId,

    /// The topic card (the card whose name is the topic's name).
    pub card: CardId,

    /// Which difficulty tier this topic is sampled from.
    pub tier: Difficulty,

    /// Member cards collected under this topic.
    pub members: Vec<CardId>,
}

impl Topic {
    /// Number of member cards (excluding the topic card).
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Cards a completed collection holds: all members plus the topic card.
    #[must_use]
    pub fn collection_size(&self) -> usize {
        self.members.len() + 1
    }

    /// Is `card` a member of this topic?
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.members.contains(&card)
    }
}
