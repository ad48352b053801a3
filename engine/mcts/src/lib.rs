//! Monte Carlo Tree Search with the UCT selection rule.
//!
//! This crate provides a game-agnostic UCT implementation that works with any
//! position implementing the `engine-core` [`GameState`](engine_core::GameState)
//! trait.
//!
//! # Overview
//!
//! Each iteration clones the root position and runs four phases:
//!
//! 1. **Selection**: descend fully expanded nodes, picking the child with the
//!    highest UCB1 score `mean + c * sqrt(2 * ln(N_parent) / N_child)`
//! 2. **Expansion**: add one child for a uniformly random untried move
//! 3. **Simulation**: play uniformly random moves until the game ends
//! 4. **Backpropagation**: walk back to the root, crediting every node with the
//!    result from the point of view of the side that moved into it
//!
//! After the iteration budget is spent the most visited root child is
//! returned. UCB1 is only used while descending; the final answer is the
//! robust most-visited child.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcts::{run_uct, UctConfig};
//! use rand_chacha::ChaCha20Rng;
//! use rand::SeedableRng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_uct(state, UctConfig::for_play().with_iterations(500), &mut rng)?;
//!
//! println!("Best move: {:?}", result.best_move);
//! println!("Visits: {} / {}", result.visits, result.iterations);
//! ```
//!
//! # Configuration
//!
//! The [`UctConfig`] struct controls search behavior:
//!
//! - `iterations`: Number of iterations per search (default: 1000)
//! - `exploration`: Multiplier on the UCB1 exploration term (default: 1.0)
//! - `zero_budget`: Fail or pick a random move when `iterations` is 0
//! - `max_rollout_plies`: Optional cap on rollout length
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      UctSearch                       │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌────────────┐  ┌─────────────┐  ┌──────────────┐   │
//! │  │  UctTree   │  │  GameState  │  │   Rollout    │   │
//! │  │  (arena)   │  │  (cloned)   │  │  (random)    │   │
//! │  └─────┬──────┘  └──────┬──────┘  └──────┬───────┘   │
//! │        ▼                ▼                ▼           │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │   select → expand → simulate → backpropagate   │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

#[cfg(test)]
mod test_games;

// Re-export main types
pub use config::{UctConfig, ZeroBudgetPolicy};
pub use node::{NodeId, UctNode};
pub use rollout::{RandomRollout, Rollout};
pub use search::{run_uct, SearchError, SearchResult, SearchStats, UctSearch};
pub use tree::{TreeStats, UctTree};
