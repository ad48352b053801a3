//! Brave Rats for the UCT engine
//!
//! Two sides hold the same eight cards and play one against one per round.
//! The first to four points wins; after eight rounds without a winner the
//! match is a tie. Played cards are public once their round resolves, so a
//! side's view of the match determines the opponent's hand exactly.
//!
//! # Usage
//!
//! ```rust
//! use games_brave_rats::{choose_move, Card, Match};
//! use engine_core::Side;
//! use mcts::UctConfig;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut game = Match::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(1);
//! let config = UctConfig::default().with_iterations(100);
//!
//! let red = choose_move(game.player(Side::Red), game.status(), None, &config, &mut rng)?;
//! game.play(red, Card::Musician)?;
//! assert_eq!(game.status().round_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapter;
pub mod brain;
pub mod cards;
pub mod fight;
pub mod game;
pub mod status;
pub mod view;

pub use adapter::{DuelState, ReconstructionError};
pub use brain::{choose_move, BrainError, UctBrain};
pub use cards::{Card, Hand, HAND_SIZE};
pub use fight::{judge, resolve_fight, Verdict};
pub use game::{Match, MatchError, Player};
pub use status::{CarriedEffects, MatchStatus, RoundOutcome, RoundRecord, WINNING_POINTS};
pub use view::MatchView;

#[cfg(test)]
mod tests;
