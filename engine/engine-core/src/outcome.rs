//! Normalised match results.
//!
//! Search statistics are accumulated as sums of results in `[0.0, 1.0]`, so
//! every game reports its outcome through the same three values.

use crate::side::Side;

pub const WIN: f32 = 1.0;
pub const DRAW: f32 = 0.5;
pub const LOSS: f32 = 0.0;

/// Result of a match from `side`'s point of view.
///
/// A missing winner counts as a draw. That covers both a finished tie and a
/// rollout that stopped before the match was decided.
#[inline]
pub fn score_for(winner: Option<Side>, side: Side) -> f32 {
    match winner {
        Some(w) if w == side => WIN,
        Some(_) => LOSS,
        None => DRAW,
    }
}
