//! Card selection brains for the referee.

use anyhow::{anyhow, Result};
use games_brave_rats::{Card, MatchStatus, Player, UctBrain};
use mcts::UctConfig;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

/// Which brain plays a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrainKind {
    Uct,
    Random,
}

impl BrainKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "uct" | "mcts" => Some(Self::Uct),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Uct => "uct",
            Self::Random => "random",
        }
    }
}

/// Something that picks a card for one side each round.
pub trait Brain: Send {
    fn name(&self) -> &'static str;

    /// Pick a card from `player.hand`. `revealed` is the opponent's card when
    /// a Spy forced it to show first.
    fn choose_card(
        &mut self,
        player: &Player,
        status: &MatchStatus,
        revealed: Option<Card>,
    ) -> Result<Card>;
}

/// Plays a uniformly random card from its hand.
#[derive(Debug)]
pub struct RandomBrain {
    rng: ChaCha20Rng,
}

impl Default for RandomBrain {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomBrain {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Brain for RandomBrain {
    fn name(&self) -> &'static str {
        BrainKind::Random.name()
    }

    fn choose_card(
        &mut self,
        player: &Player,
        _status: &MatchStatus,
        _revealed: Option<Card>,
    ) -> Result<Card> {
        player
            .hand
            .to_vec()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("{} has no cards left to play", player.side))
    }
}

impl Brain for UctBrain {
    fn name(&self) -> &'static str {
        BrainKind::Uct.name()
    }

    fn choose_card(
        &mut self,
        player: &Player,
        status: &MatchStatus,
        revealed: Option<Card>,
    ) -> Result<Card> {
        Ok(self.choose(player, status, revealed)?)
    }
}

/// Build a brain, seeded when `seed` is given.
pub fn build_brain(kind: BrainKind, config: UctConfig, seed: Option<u64>) -> Box<dyn Brain> {
    match (kind, seed) {
        (BrainKind::Uct, Some(seed)) => Box::new(UctBrain::with_seed(config, seed)),
        (BrainKind::Uct, None) => Box::new(UctBrain::new(config)),
        (BrainKind::Random, Some(seed)) => Box::new(RandomBrain::with_seed(seed)),
        (BrainKind::Random, None) => Box::new(RandomBrain::new()),
    }
}
