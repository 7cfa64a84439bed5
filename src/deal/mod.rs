//! Initial deal generation.
//!
//! Builds the opening board for a session: partitions the selected topics'
//! cards between the four tableau stacks and the draw pile, biased so that
//! at least one legal move exists at the start. Heuristic, not a solver —
//! it reduces but does not provably eliminate unwinnable boards.

pub mod generator;

pub use generator::{distribute, generate, Deal};
