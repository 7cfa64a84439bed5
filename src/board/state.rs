//! Mutable board model.
//!
//! Stacks are ordered card vectors: the last element is the top. The draw
//! pile is the exception, consumed from the front. Per-slot clearing locks
//! mark topic slots whose completed collection is waiting for its deferred
//! clear; locked slots accept no drops and release no cards.

use std::collections::VecDeque;

use crate::core::{CardId, GameRng, GameStatus, StackId};
use crate::deal::Deal;

/// Number of general-purpose tableau stacks.
pub const TABLEAU_COUNT: usize = 4;

/// Number of topic-collection slots.
pub const TOPIC_SLOT_COUNT: usize = 4;

/// The complete mutable state of a session's board.
#[derive(Clone, Debug)]
pub struct BoardState {
    topic_slots: [Vec<CardId>; TOPIC_SLOT_COUNT],
    tableau: [Vec<CardId>; TABLEAU_COUNT],
    draw_pile: VecDeque<CardId>,
    waste: Vec<CardId>,
    /// Completion-detected slots awaiting their deferred clear.
    clearing: [bool; TOPIC_SLOT_COUNT],
    moves_left: i32,
    status: GameStatus,
    /// Did the deal put at least one card on the tableau?
    game_started: bool,
    /// Cards the deal actually placed (tableau + draw pile).
    dealt_cards: usize,
    pub(crate) rng: GameRng,
}

impl BoardState {
    /// Create a board from a deal and an initial move budget.
    #[must_use]
    pub fn new(deal: Deal, move_budget: i32, rng: GameRng) -> Self {
        let dealt_cards =
            deal.tableau.iter().map(Vec::len).sum::<usize>() + deal.draw_pile.len();
        let game_started = deal.tableau.iter().any(|stack| !stack.is_empty());

        Self {
            topic_slots: Default::default(),
            tableau: deal.tableau,
            draw_pile: deal.draw_pile.into(),
            waste: Vec::new(),
            clearing: [false; TOPIC_SLOT_COUNT],
            moves_left: move_budget,
            status: GameStatus::Playing,
            game_started,
            dealt_cards,
            rng,
        }
    }

    // === Reads ===

    /// Cards of a drag-addressable stack, bottom to top.
    #[must_use]
    pub fn stack(&self, id: StackId) -> &[CardId] {
        match id {
            StackId::TopicSlot(i) => &self.topic_slots[i as usize],
            StackId::Tableau(i) => &self.tableau[i as usize],
            StackId::Waste => &self.waste,
        }
    }

    /// Top card of a stack.
    #[must_use]
    pub fn top_of(&self, id: StackId) -> Option<CardId> {
        self.stack(id).last().copied()
    }

    /// Number of cards left in the draw pile.
    #[must_use]
    pub fn draw_len(&self) -> usize {
        self.draw_pile.len()
    }

    /// The card a draw would surface next.
    #[must_use]
    pub fn draw_front(&self) -> Option<CardId> {
        self.draw_pile.front().copied()
    }

    /// Top card of the waste pile (the only interactable one).
    #[must_use]
    pub fn waste_top(&self) -> Option<CardId> {
        self.waste.last().copied()
    }

    /// Number of cards in the waste pile.
    #[must_use]
    pub fn waste_len(&self) -> usize {
        self.waste.len()
    }

    /// Is this topic slot locked for its deferred clear?
    #[must_use]
    pub fn is_clearing(&self, slot: usize) -> bool {
        self.clearing[slot]
    }

    /// Remaining move budget.
    #[must_use]
    pub fn moves_left(&self) -> i32 {
        self.moves_left
    }

    /// Current session status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Did the deal put at least one card on the tableau?
    #[must_use]
    pub fn game_started(&self) -> bool {
        self.game_started
    }

    /// Cards the deal placed into play.
    #[must_use]
    pub fn dealt_cards(&self) -> usize {
        self.dealt_cards
    }

    /// Total cards currently anywhere on the board.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.draw_pile.len()
            + self.waste.len()
            + self.tableau.iter().map(Vec::len).sum::<usize>()
            + self.topic_slots.iter().map(Vec::len).sum::<usize>()
    }

    /// Are the draw pile, waste, tableau, and every topic slot all empty?
    #[must_use]
    pub fn is_empty_everywhere(&self) -> bool {
        self.cards_in_play() == 0
    }

    // === Mutations (session controller only) ===

    /// Move the draw pile's front card to the top of the waste.
    pub(crate) fn draw_to_waste(&mut self) -> Option<CardId> {
        let card = self.draw_pile.pop_front()?;
        self.waste.push(card);
        Some(card)
    }

    /// Randomly permute the waste into a new draw pile, emptying the waste.
    ///
    /// Returns the number of cards returned to the draw pile.
    pub(crate) fn reshuffle_waste(&mut self) -> usize {
        self.rng.shuffle(&mut self.waste);
        let count = self.waste.len();
        self.draw_pile = self.waste.drain(..).collect();
        count
    }

    /// Remove `cards` from a stack by identity, preserving the order of
    /// what remains.
    pub(crate) fn take_cards(&mut self, from: StackId, cards: &[CardId]) {
        let stack = self.stack_mut(from);
        stack.retain(|card| !cards.contains(card));
    }

    /// Append `cards` to a stack in their given order.
    pub(crate) fn place_cards(&mut self, to: StackId, cards: &[CardId]) {
        self.stack_mut(to).extend_from_slice(cards);
    }

    /// Lock a slot between completion detection and its deferred clear.
    pub(crate) fn set_clearing(&mut self, slot: usize) {
        self.clearing[slot] = true;
    }

    /// Empty a topic slot and release its clearing lock.
    pub(crate) fn clear_slot(&mut self, slot: usize) -> Vec<CardId> {
        self.clearing[slot] = false;
        std::mem::take(&mut self.topic_slots[slot])
    }

    /// Spend one move of the budget.
    pub(crate) fn spend_move(&mut self) {
        self.moves_left -= 1;
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    fn stack_mut(&mut self, id: StackId) -> &mut Vec<CardId> {
        match id {
            StackId::TopicSlot(i) => &mut self.topic_slots[i as usize],
            StackId::Tableau(i) => &mut self.tableau[i as usize],
            StackId::Waste => &mut self.waste,
        }
    }
}
