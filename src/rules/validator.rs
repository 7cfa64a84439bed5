//! Sequence derivation and transfer legality.
//!
//! ## Sequences
//!
//! A card drags together with the contiguous same-topic run above it.
//! Topic cards always move alone, and never ride along in anyone else's
//! run. Any card of a homogeneous run can anchor a drag of itself plus
//! everything above it, provided the run reaches the stack top.
//!
//! ## Drop targets
//!
//! Topic slots accept a lone topic card into an empty (or already
//! complete) slot, and same-topic cards onto a seated topic card. Tableau
//! stacks accept topic-card-free sequences onto an empty stack, or onto a
//! matching same-topic regular top card. A slot locked for its deferred
//! clear accepts nothing.

use smallvec::{smallvec, SmallVec};

use crate::board::BoardState;
use crate::catalog::TopicCatalog;
use crate::core::{CardId, StackId, TopicId};

/// A dragged run of cards. Short in practice; inline up to 8.
pub type Sequence = SmallVec<[CardId; 8]>;

/// The cards that accompany `card` when dragged from `stack`.
///
/// Topic cards and cards without a topic move alone. Otherwise the
/// sequence is the contiguous run from `card` toward the top while each
/// follower shares its topic and is not a topic card. A card not present
/// in `stack` also yields just itself (the waste-top case).
#[must_use]
pub fn sequence_of(catalog: &TopicCatalog, stack: &[CardId], card: CardId) -> Sequence {
    let Some(topic) = catalog.card_topic(card) else {
        return smallvec![card];
    };
    if catalog.is_topic_card(card) {
        return smallvec![card];
    }
    let Some(position) = stack.iter().position(|&c| c == card) else {
        return smallvec![card];
    };

    let mut sequence: Sequence = smallvec![card];
    for &follower in &stack[position + 1..] {
        if catalog.card_topic(follower) == Some(topic) && !catalog.is_topic_card(follower) {
            sequence.push(follower);
        } else {
            break;
        }
    }
    sequence
}

/// Drag eligibility: can `card` be lifted out of `stack`?
///
/// True iff the card's sequence reaches the stack top — the top card is
/// always liftable, a buried card only as anchor of a homogeneous
/// same-topic run ending at the top.
#[must_use]
pub fn can_lift(catalog: &TopicCatalog, stack: &[CardId], card: CardId) -> bool {
    let Some(position) = stack.iter().position(|&c| c == card) else {
        return false;
    };
    position + sequence_of(catalog, stack, card).len() == stack.len()
}

/// The topic currently seated in a slot: the topic of the last topic card
/// among `cards`, if any.
#[must_use]
pub fn slot_topic(catalog: &TopicCatalog, cards: &[CardId]) -> Option<TopicId> {
    cards
        .iter()
        .rev()
        .find(|&&card| catalog.is_topic_card(card))
        .and_then(|&card| catalog.card_topic(card))
}

/// Is a slot's collection exactly complete: all of the topic's members
/// plus the topic card itself resident?
#[must_use]
pub fn is_collection_complete(catalog: &TopicCatalog, cards: &[CardId], topic: TopicId) -> bool {
    let topic_card = catalog.topic(topic).card;
    let resident = cards
        .iter()
        .filter(|&&card| catalog.belongs_to(card, topic) || card == topic_card)
        .count();
    resident == catalog.topic(topic).collection_size()
}

/// Transfer legality: may `sequence` move from `from` onto `to`?
#[must_use]
pub fn can_drop(
    catalog: &TopicCatalog,
    board: &BoardState,
    sequence: &[CardId],
    from: StackId,
    to: StackId,
) -> bool {
    let Some(&anchor) = sequence.first() else {
        return false;
    };
    if to == from {
        return false;
    }

    match to {
        StackId::TopicSlot(slot) => {
            if board.is_clearing(slot as usize) {
                return false;
            }
            let slot_cards = board.stack(to);

            if sequence.len() == 1 && catalog.is_topic_card(anchor) {
                // A lone topic card seats into an empty slot, or replaces
                // a collection that is already complete.
                match slot_topic(catalog, slot_cards) {
                    None => true,
                    Some(seated) => is_collection_complete(catalog, slot_cards, seated),
                }
            } else {
                match slot_topic(catalog, slot_cards) {
                    Some(seated) => {
                        let seated_card = catalog.topic(seated).card;
                        sequence
                            .iter()
                            .all(|&card| catalog.belongs_to(card, seated) || card == seated_card)
                    }
                    None => false,
                }
            }
        }

        StackId::Tableau(_) => {
            let target = board.stack(to);

            match target.last() {
                None => sequence.iter().all(|&card| !catalog.is_topic_card(card)),
                Some(&top) => {
                    let top_topic = catalog.card_topic(top);
                    let anchor_topic = catalog.card_topic(anchor);

                    let homogeneous = sequence.iter().all(|&card| {
                        catalog.card_topic(card) == anchor_topic && !catalog.is_topic_card(card)
                    });

                    top_topic.is_some()
                        && anchor_topic.is_some()
                        && top_topic == anchor_topic
                        && !catalog.is_topic_card(top)
                        && !catalog.is_topic_card(anchor)
                        && homogeneous
                }
            }
        }

        // The waste pile only ever gives cards up.
        StackId::Waste => false,
    }
}
