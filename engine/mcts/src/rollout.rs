//! Rollout policies for the simulation phase.
//!
//! A rollout plays a cloned position forward until the game ends so that the
//! terminal result can be backpropagated. The search only depends on the
//! [`Rollout`] trait; [`RandomRollout`] is the reference uniform policy.

use engine_core::GameState;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Trait for rollout (simulation) policies.
pub trait Rollout<S: GameState> {
    /// Play `state` forward in place, stopping at a terminal position, at a
    /// position with no legal moves, or after `max_plies` moves.
    ///
    /// Returns the number of moves played.
    fn play_out(&self, state: &mut S, max_plies: Option<u32>, rng: &mut ChaCha20Rng) -> u32;
}

/// Plays uniformly random legal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRollout;

impl RandomRollout {
    pub fn new() -> Self {
        Self
    }
}

impl<S: GameState> Rollout<S> for RandomRollout {
    fn play_out(&self, state: &mut S, max_plies: Option<u32>, rng: &mut ChaCha20Rng) -> u32 {
        let mut plies = 0u32;

        while !state.is_terminal() {
            if max_plies.is_some_and(|cap| plies >= cap) {
                break;
            }
            let moves = state.legal_moves();
            let Some(mv) = moves.choose(rng) else {
                // Nothing to play but not over; the result reads as undecided.
                break;
            };
            state.apply(mv);
            plies += 1;
        }

        plies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_games::{Countdown, HighLow};
    use rand::SeedableRng;

    #[test]
    fn test_random_rollout_reaches_terminal() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for _ in 0..50 {
            let mut state = HighLow::new();
            let plies = RandomRollout.play_out(&mut state, None, &mut rng);
            assert!(state.is_terminal());
            assert!(plies >= 2 && plies <= 4);
        }
    }

    #[test]
    fn test_rollout_from_terminal_is_noop() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut state = Countdown::new(0);
        assert!(state.is_terminal());
        assert_eq!(RandomRollout.play_out(&mut state, None, &mut rng), 0);
    }

    #[test]
    fn test_rollout_respects_ply_cap() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut state = Countdown::new(100);
        let plies = RandomRollout.play_out(&mut state, Some(5), &mut rng);
        assert_eq!(plies, 5);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_rollout_is_reproducible_per_seed() {
        let play = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut state = Countdown::new(30);
            RandomRollout.play_out(&mut state, None, &mut rng)
        };
        assert_eq!(play(99), play(99));
    }
}
