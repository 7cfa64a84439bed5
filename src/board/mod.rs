//! Board state: the mutable model of one solitaire session.
//!
//! A board holds four topic slots, four tableau stacks, the draw pile, the
//! waste pile, the move counter, and the status flag. All mutators are
//! crate-private: the session controller is the single writer, everything
//! else reads.

pub mod state;

pub use state::{BoardState, TABLEAU_COUNT, TOPIC_SLOT_COUNT};
