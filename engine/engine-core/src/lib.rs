//! Core traits and types shared by the search engine and the games it plays
//!
//! This crate provides the fundamental abstractions for tree search:
//! - `Side`: the two seats of a two-player, zero-sum game
//! - `GameState`: the capability contract a game exposes to the search
//! - `score_for`: normalisation of a match outcome to `[0.0, 1.0]`

pub mod outcome;
pub mod side;
pub mod state;

// Re-export main types for convenience
pub use outcome::{score_for, DRAW, LOSS, WIN};
pub use side::Side;
pub use state::GameState;
