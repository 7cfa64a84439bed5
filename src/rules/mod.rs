//! Move validation: pure rules over board and catalog.
//!
//! Nothing in this module mutates state. The session controller calls
//! these functions to gate every transfer; hosts can call them too, e.g.
//! to grey out illegal targets while a drag is in progress.

pub mod validator;

pub use validator::{can_drop, can_lift, is_collection_complete, sequence_of, slot_topic, Sequence};
