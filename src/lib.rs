//! # topic-solitaire
//!
//! A single-player card-matching solitaire engine. Players sort randomly
//! drawn cards into "topic" stacks by relating them to a topic card, within
//! a limited move budget.
//!
//! ## Design Principles
//!
//! 1. **Engine, not app**: No rendering, timers, or input handling. The
//!    host drives the engine with discrete events (draw, drop, clear-timer
//!    elapse) and reacts to the typed events the session emits.
//!
//! 2. **Data-Driven Catalog**: The engine ships no card content. Hosts
//!    register topics (name + member cards) per difficulty tier at startup.
//!
//! 3. **Deterministic**: All randomness flows through a seeded RNG, so a
//!    session is fully replayable from its seed.
//!
//! 4. **One Writer**: Board mutators are crate-private; `GameSession` is
//!    the only component that mutates board state.
//!
//! ## Modules
//!
//! - `core`: Card/topic/stack identifiers, difficulty, status, RNG
//! - `catalog`: Topic registry with difficulty tiers and card lookup
//! - `board`: Board state (tableau, topic slots, draw and waste piles)
//! - `deal`: Solvability-biased initial deal generation
//! - `rules`: Pure move validation and sequence detection
//! - `session`: Session controller, drag gesture guard, boundary events

pub mod core;
pub mod catalog;
pub mod board;
pub mod deal;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardId, TopicId, StackId,
    Difficulty, GameStatus,
    GameRng,
};

pub use crate::catalog::{Topic, TopicCatalog};

pub use crate::board::{BoardState, TABLEAU_COUNT, TOPIC_SLOT_COUNT};

pub use crate::deal::Deal;

pub use crate::rules::{can_drop, can_lift, is_collection_complete, sequence_of, slot_topic, Sequence};

pub use crate::session::{
    ActionError, DropOutcome, GameSession, GestureSession, GestureState,
    PendingClear, SessionEvent,
};
