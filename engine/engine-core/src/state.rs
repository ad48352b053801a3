//! The capability contract between a game and the tree search.
//!
//! The search never inspects a game's internals. It only clones positions,
//! enumerates and applies moves, and asks for a normalised result once a
//! rollout has finished.

use crate::side::Side;
use std::fmt::Debug;

/// A fully specified, searchable position of a two-player game.
///
/// Implementations must be cheap to [`Clone`] and the clone must be deep:
/// the search clones the root once per iteration and mutates the copy freely.
///
/// # Move identity
///
/// Moves are compared by value. Two clones of the same position produce
/// distinct `Move` instances for the same logical move, and the search relies
/// on `PartialEq` to match them.
///
/// # Example
///
/// ```rust
/// use engine_core::{score_for, GameState, Side};
///
/// /// Players alternately take one or two stones; taking the last stone wins.
/// #[derive(Debug, Clone)]
/// struct Nim {
///     stones: u8,
///     to_move: Side,
///     last_mover: Side,
/// }
///
/// impl GameState for Nim {
///     type Move = u8;
///
///     fn legal_moves(&self) -> Vec<u8> {
///         (1..=self.stones.min(2)).collect()
///     }
///
///     fn apply(&mut self, take: &u8) {
///         self.stones -= take;
///         self.last_mover = self.to_move;
///         self.to_move = self.to_move.opponent();
///     }
///
///     fn is_terminal(&self) -> bool {
///         self.stones == 0
///     }
///
///     fn player_just_moved(&self) -> Side {
///         self.last_mover
///     }
///
///     fn result(&self, side: Side) -> f32 {
///         let winner = self.is_terminal().then_some(self.last_mover);
///         score_for(winner, side)
///     }
/// }
///
/// let mut nim = Nim { stones: 3, to_move: Side::Red, last_mover: Side::Blue };
/// assert_eq!(nim.legal_moves(), vec![1, 2]);
/// nim.apply(&2);
/// nim.apply(&1);
/// assert!(nim.is_terminal());
/// assert_eq!(nim.result(Side::Blue), 1.0);
/// ```
pub trait GameState: Clone {
    /// A move, compared by value.
    type Move: Clone + PartialEq + Debug;

    /// Moves available to the side about to move.
    ///
    /// Returns an empty list once that side has nothing left to play.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play `mv` for the side to move and advance the turn.
    fn apply(&mut self, mv: &Self::Move);

    /// Whether the match is over.
    fn is_terminal(&self) -> bool;

    /// The side whose move produced this position.
    ///
    /// Node statistics are stored from this side's point of view.
    fn player_just_moved(&self) -> Side;

    /// Outcome from `side`'s point of view: 1.0 win, 0.0 loss, 0.5 otherwise.
    ///
    /// Only meaningful once [`is_terminal`](Self::is_terminal) holds, but must
    /// tolerate being asked earlier (no winner yet is reported as 0.5).
    fn result(&self, side: Side) -> f32;
}
