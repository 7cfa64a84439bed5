//! Core engine types: card/topic/stack identifiers, difficulty, status, RNG.
//!
//! These are the fundamental building blocks shared by every other module.
//! Card content itself lives in the `catalog`; the core only knows opaque
//! identifiers.

pub mod ids;
pub mod rng;

pub use ids::{CardId, Difficulty, GameStatus, StackId, TopicId};
pub use rng::GameRng;
