//! Choosing a card with UCT search.

use crate::adapter::{DuelState, ReconstructionError};
use crate::cards::Card;
use crate::game::Player;
use crate::status::MatchStatus;
use crate::view::MatchView;
use mcts::{run_uct, SearchError, UctConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BrainError {
    #[error("Could not rebuild the match from the player's view: {0}")]
    Reconstruction(#[from] ReconstructionError),

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),
}

/// Pick the card `player` should play this round.
///
/// `revealed` is the opponent's card when a Spy made it show first. The
/// returned card is always in `player.hand`.
pub fn choose_move(
    player: &Player,
    status: &MatchStatus,
    revealed: Option<Card>,
    config: &UctConfig,
    rng: &mut ChaCha20Rng,
) -> Result<Card, BrainError> {
    let view = MatchView::new(player, status).with_revealed(revealed);
    let state = DuelState::from_view(&view)?;

    if let Some(card) = revealed {
        debug!(side = %player.side, %card, "Opponent revealed its card");
    }

    let result = run_uct(state, config.clone(), rng)?;
    debug!(
        side = %player.side,
        card = %result.best_move,
        visits = result.visits,
        mean_score = result.mean_score,
        nodes = result.stats.nodes,
        "Card chosen"
    );
    Ok(result.best_move)
}

/// A UCT player with its own configuration and random stream.
#[derive(Debug, Clone)]
pub struct UctBrain {
    config: UctConfig,
    rng: ChaCha20Rng,
}

impl UctBrain {
    pub fn new(config: UctConfig) -> Self {
        Self {
            config,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(config: UctConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &UctConfig {
        &self.config
    }

    pub fn choose(
        &mut self,
        player: &Player,
        status: &MatchStatus,
        revealed: Option<Card>,
    ) -> Result<Card, BrainError> {
        choose_move(player, status, revealed, &self.config, &mut self.rng)
    }
}
