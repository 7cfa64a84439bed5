//! The session controller: the engine's single writer.
//!
//! A `GameSession` owns the catalog, the board, the gesture guard, the
//! pending deferred clears, and the outgoing event queue. Every state
//! transition funnels through it: player actions spend one move each and
//! are validated up front; rejected actions are no-ops. Win/loss is
//! re-evaluated after every mutation.

use smallvec::smallvec;
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, info};

use super::events::SessionEvent;
use super::gesture::{DropOutcome, GestureSession, GestureState, DRAG_DEBOUNCE_MS};
use crate::board::{BoardState, TABLEAU_COUNT, TOPIC_SLOT_COUNT};
use crate::catalog::TopicCatalog;
use crate::core::{CardId, Difficulty, GameRng, GameStatus, StackId, TopicId};
use crate::deal::Deal;
use crate::rules;
use crate::rules::validator::Sequence;

/// No session starts with fewer moves than this.
const MIN_MOVE_BUDGET: i32 = 75;

/// Why an action was rejected. Every rejection is a recoverable no-op;
/// the session has no fatal error class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the session has already ended")]
    GameOver,
    #[error("the draw pile is empty")]
    EmptyDrawPile,
    #[error("the draw pile must run out before a reshuffle")]
    DrawPileNotEmpty,
    #[error("the waste pile is empty")]
    EmptyWaste,
    #[error("card is not in the source stack")]
    UnknownCard,
    #[error("the transfer is not legal")]
    IllegalMove,
    #[error("a drag gesture is already in flight")]
    DragInFlight,
    #[error("no drag gesture is in flight")]
    NoGesture,
    #[error("no clear is pending for that slot")]
    NoPendingClear,
}

/// A completed topic slot waiting for its deferred clear.
///
/// The host fires `resolve_topic_clear` when its grace timer elapses;
/// restarting the session discards pending clears instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingClear {
    pub slot: u8,
    pub topic: TopicId,
}

/// One solitaire session, from deal to Won/Lost.
#[derive(Clone, Debug)]
pub struct GameSession {
    catalog: TopicCatalog,
    board: BoardState,
    difficulty: Difficulty,
    /// The session's active topic set.
    topics: Vec<TopicId>,
    /// Cards the topic selection brought into the session.
    expected_cards: usize,
    events: VecDeque<SessionEvent>,
    pending_clears: Vec<PendingClear>,
    gesture: GestureState,
    last_drag_start_ms: Option<u64>,
}

impl GameSession {
    /// Start a session: select topics for the difficulty tier, deal, and
    /// size the move budget.
    #[must_use]
    pub fn new(catalog: TopicCatalog, difficulty: Difficulty, seed: u64) -> Self {
        let (topics, board, expected_cards) = Self::setup(&catalog, difficulty, seed);
        Self {
            catalog,
            board,
            difficulty,
            topics,
            expected_cards,
            events: VecDeque::new(),
            pending_clears: Vec::new(),
            gesture: GestureState::Idle,
            last_drag_start_ms: None,
        }
    }

    /// Start a session from an explicit topic set and deal.
    ///
    /// For replays and hosts that deal on their own terms; `new` is the
    /// normal entry point.
    #[must_use]
    pub fn from_deal(
        catalog: TopicCatalog,
        difficulty: Difficulty,
        topics: Vec<TopicId>,
        deal: Deal,
        move_budget: i32,
        seed: u64,
    ) -> Self {
        let expected_cards = catalog.total_cards(&topics);
        let board = BoardState::new(deal, move_budget, GameRng::new(seed));
        Self {
            catalog,
            board,
            difficulty,
            topics,
            expected_cards,
            events: VecDeque::new(),
            pending_clears: Vec::new(),
            gesture: GestureState::Idle,
            last_drag_start_ms: None,
        }
    }

    fn setup(
        catalog: &TopicCatalog,
        difficulty: Difficulty,
        seed: u64,
    ) -> (Vec<TopicId>, BoardState, usize) {
        let base = GameRng::new(seed);

        let mut topics_rng = base.for_context("topics");
        let topics = catalog.select_topics(&mut topics_rng, difficulty);

        let mut deal_rng = base.for_context("deal");
        let deal = crate::deal::generate(catalog, &topics, &mut deal_rng);

        let expected_cards = catalog.total_cards(&topics);
        let budget = initial_move_budget(expected_cards, difficulty);
        let board = BoardState::new(deal, budget, base.for_context("play"));

        (topics, board, expected_cards)
    }

    /// Discard this session and start over with a fresh seed.
    ///
    /// Pending clears, the in-flight gesture, and undrained events are all
    /// dropped; a deferred clear never applies to the new board.
    pub fn restart(&mut self, seed: u64) {
        let (topics, board, expected_cards) = Self::setup(&self.catalog, self.difficulty, seed);
        self.topics = topics;
        self.board = board;
        self.expected_cards = expected_cards;
        self.pending_clears.clear();
        self.gesture = GestureState::Idle;
        self.last_drag_start_ms = None;
        self.events.clear();
        self.push_event(SessionEvent::StatusChanged {
            status: GameStatus::Playing,
        });
        self.push_event(SessionEvent::MoveCountChanged {
            remaining: self.board.moves_left(),
        });
    }

    // === Reads ===

    /// The board, read-only.
    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// The catalog this session plays from.
    #[must_use]
    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Topics selected for this session.
    #[must_use]
    pub fn active_topics(&self) -> &[TopicId] {
        &self.topics
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    #[must_use]
    pub fn moves_left(&self) -> i32 {
        self.board.moves_left()
    }

    /// Slots whose completed collections await their deferred clear.
    #[must_use]
    pub fn pending_clears(&self) -> &[PendingClear] {
        &self.pending_clears
    }

    /// The gesture guard's current state.
    #[must_use]
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Drain everything emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    // === Player actions ===

    /// Draw the front card of the draw pile onto the waste.
    pub fn draw(&mut self) -> Result<CardId, ActionError> {
        self.ensure_playing()?;
        let card = self
            .board
            .draw_to_waste()
            .ok_or(ActionError::EmptyDrawPile)?;
        self.push_event(SessionEvent::CardDrawn { card });
        self.spend_move();
        self.evaluate_status();
        Ok(card)
    }

    /// Shuffle the waste back into an empty draw pile.
    pub fn reshuffle(&mut self) -> Result<usize, ActionError> {
        self.ensure_playing()?;
        if self.board.draw_len() > 0 {
            return Err(ActionError::DrawPileNotEmpty);
        }
        if self.board.waste_len() == 0 {
            return Err(ActionError::EmptyWaste);
        }
        let count = self.board.reshuffle_waste();
        debug!("reshuffled {count} waste cards into the draw pile");
        self.spend_move();
        self.evaluate_status();
        Ok(count)
    }

    /// Move `card` (and the run it anchors) from `from` onto `to`.
    pub fn move_cards(
        &mut self,
        card: CardId,
        from: StackId,
        to: StackId,
    ) -> Result<(), ActionError> {
        self.ensure_playing()?;
        let sequence = self.liftable_sequence(card, from)?;
        if !rules::can_drop(&self.catalog, &self.board, &sequence, from, to) {
            return Err(ActionError::IllegalMove);
        }

        self.board.take_cards(from, &sequence);
        self.board.place_cards(to, &sequence);
        self.push_event(SessionEvent::CardsMoved {
            cards: sequence.to_vec(),
            from,
            to,
        });
        self.spend_move();

        if let StackId::TopicSlot(slot) = to {
            self.detect_completion(slot);
        }
        self.evaluate_status();
        Ok(())
    }

    /// Resolve the deferred clear for `slot` (the host's grace timer
    /// elapsed). Returns the cards that left play.
    pub fn resolve_topic_clear(&mut self, slot: u8) -> Result<Vec<CardId>, ActionError> {
        self.ensure_playing()?;
        let position = self
            .pending_clears
            .iter()
            .position(|pending| pending.slot == slot)
            .ok_or(ActionError::NoPendingClear)?;
        self.pending_clears.remove(position);

        let cleared = self.board.clear_slot(slot as usize);
        self.push_event(SessionEvent::TopicCleared { slot });
        self.evaluate_status();
        Ok(cleared)
    }

    // === Drag gestures ===

    /// Start a drag. Returns the sequence that lifts with the card.
    ///
    /// Rejected while another gesture is in flight (unless it outlived
    /// the safety timeout) and within the debounce window of the previous
    /// start.
    pub fn begin_drag(
        &mut self,
        card: CardId,
        from: StackId,
        now_ms: u64,
    ) -> Result<Sequence, ActionError> {
        self.ensure_playing()?;

        if let GestureState::Dragging(gesture) = &self.gesture {
            if !gesture.timed_out(now_ms) {
                return Err(ActionError::DragInFlight);
            }
            // Lost pointer-up: the stale gesture is abandoned.
            self.gesture = GestureState::Idle;
        }

        if let Some(last) = self.last_drag_start_ms {
            if now_ms.saturating_sub(last) < DRAG_DEBOUNCE_MS {
                return Err(ActionError::DragInFlight);
            }
        }

        let sequence = self.liftable_sequence(card, from)?;
        self.last_drag_start_ms = Some(now_ms);
        self.gesture = GestureState::Dragging(GestureSession {
            anchor: card,
            sequence: sequence.clone(),
            from,
            started_at_ms: now_ms,
        });
        Ok(sequence)
    }

    /// Finish the in-flight drag on `target`.
    ///
    /// `None` (the drop point resolved to no stack) and every illegal
    /// target snap the sequence back; only a validated transfer commits.
    pub fn drop_on(&mut self, target: Option<StackId>) -> Result<DropOutcome, ActionError> {
        let GestureState::Dragging(gesture) = std::mem::take(&mut self.gesture) else {
            return Err(ActionError::NoGesture);
        };

        let Some(to) = target else {
            return Ok(DropOutcome::SnappedBack);
        };

        match self.move_cards(gesture.anchor, gesture.from, to) {
            Ok(()) => Ok(DropOutcome::Moved),
            Err(_) => Ok(DropOutcome::SnappedBack),
        }
    }

    /// Abandon the in-flight drag, if any.
    pub fn cancel_drag(&mut self) {
        self.gesture = GestureState::Idle;
    }

    // === Internals ===

    fn ensure_playing(&self) -> Result<(), ActionError> {
        if self.board.status().is_terminal() {
            return Err(ActionError::GameOver);
        }
        Ok(())
    }

    /// The sequence `card` would lift from `from`, or why it cannot.
    fn liftable_sequence(&self, card: CardId, from: StackId) -> Result<Sequence, ActionError> {
        match from {
            StackId::Waste => {
                if self.board.waste_top() == Some(card) {
                    Ok(smallvec![card])
                } else {
                    Err(ActionError::IllegalMove)
                }
            }
            StackId::TopicSlot(slot) if self.board.is_clearing(slot as usize) => {
                Err(ActionError::IllegalMove)
            }
            _ => {
                let stack = self.board.stack(from);
                if !stack.contains(&card) {
                    return Err(ActionError::UnknownCard);
                }
                if !rules::can_lift(&self.catalog, stack, card) {
                    return Err(ActionError::IllegalMove);
                }
                Ok(rules::sequence_of(&self.catalog, stack, card))
            }
        }
    }

    fn spend_move(&mut self) {
        self.board.spend_move();
        self.push_event(SessionEvent::MoveCountChanged {
            remaining: self.board.moves_left(),
        });
    }

    fn detect_completion(&mut self, slot: u8) {
        let index = slot as usize;
        if self.board.is_clearing(index) {
            return;
        }
        let cards = self.board.stack(StackId::TopicSlot(slot));
        let Some(topic) = rules::slot_topic(&self.catalog, cards) else {
            return;
        };
        if rules::is_collection_complete(&self.catalog, cards, topic) {
            self.board.set_clearing(index);
            self.pending_clears.push(PendingClear { slot, topic });
            debug!(
                "collection {:?} complete in slot {slot}",
                self.catalog.card_name(self.catalog.topic(topic).card)
            );
        }
    }

    fn evaluate_status(&mut self) {
        if self.board.status().is_terminal() {
            return;
        }

        // Win before loss: spending the final move to empty the board
        // still wins.
        let won = self.board.game_started()
            && self.expected_cards > 0
            && !self.topics.is_empty()
            && self.board.is_empty_everywhere();
        if won {
            self.board.set_status(GameStatus::Won);
            info!("session won with {} moves to spare", self.board.moves_left());
            self.push_event(SessionEvent::StatusChanged {
                status: GameStatus::Won,
            });
            return;
        }

        if self.board.moves_left() <= 0 {
            // A zero-card degenerate deal has nothing left to lose over.
            if self.board.moves_left() == 0 && self.expected_cards == 0 {
                return;
            }
            if self.outstanding_cards() > 0 {
                self.board.set_status(GameStatus::Lost);
                info!(
                    "move budget exhausted with {} cards outstanding",
                    self.outstanding_cards()
                );
                self.push_event(SessionEvent::StatusChanged {
                    status: GameStatus::Lost,
                });
            }
        }
    }

    /// Cards not yet settled into a complete (clearing) topic slot.
    fn outstanding_cards(&self) -> usize {
        let mut total = self.board.draw_len() + self.board.waste_len();
        for i in 0..TABLEAU_COUNT {
            total += self.board.stack(StackId::Tableau(i as u8)).len();
        }
        for i in 0..TOPIC_SLOT_COUNT {
            if !self.board.is_clearing(i) {
                total += self.board.stack(StackId::TopicSlot(i as u8)).len();
            }
        }
        total
    }

    fn push_event(&mut self, event: SessionEvent) {
        self.events.push_back(event);
    }
}

/// Initial move budget: total card count scaled by the difficulty
/// multiplier, floored at 75.
#[must_use]
pub fn initial_move_budget(total_cards: usize, difficulty: Difficulty) -> i32 {
    let scaled = (total_cards as f64 * difficulty.move_multiplier()).floor() as i32;
    scaled.max(MIN_MOVE_BUDGET)
}
