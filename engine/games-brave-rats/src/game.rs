//! The real match, where both hands are known.

use crate::cards::{Card, Hand};
use crate::fight::resolve_fight;
use crate::status::{MatchStatus, RoundOutcome};
use crate::view::MatchView;
use engine_core::Side;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    #[error("{side} does not hold the {card}")]
    CardNotInHand { side: Side, card: Card },

    #[error("The match is already over")]
    MatchOver,
}

/// A side and the cards it still holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub side: Side,
    pub hand: Hand,
}

impl Player {
    /// A side at the start of a match, holding all eight cards.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            hand: Hand::full(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Match {
    players: [Player; 2],
    status: MatchStatus,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    pub fn new() -> Self {
        Self {
            players: [Player::new(Side::Red), Player::new(Side::Blue)],
            status: MatchStatus::new(),
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn status(&self) -> &MatchStatus {
        &self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.status.winner()
    }

    /// Side that must show its card before the other chooses this round.
    pub fn reveals_first(&self) -> Option<Side> {
        self.status.reveals_first()
    }

    /// The view handed to `side`'s brain.
    pub fn view(&self, side: Side, revealed: Option<Card>) -> MatchView<'_> {
        MatchView::new(self.player(side), &self.status).with_revealed(revealed)
    }

    /// Play one round. Both cards are checked before either leaves its hand.
    pub fn play(&mut self, red: Card, blue: Card) -> Result<RoundOutcome, MatchError> {
        if self.is_over() {
            return Err(MatchError::MatchOver);
        }
        for (side, card) in [(Side::Red, red), (Side::Blue, blue)] {
            if !self.player(side).hand.contains(card) {
                return Err(MatchError::CardNotInHand { side, card });
            }
        }

        self.players[Side::Red.index()].hand.remove(red);
        self.players[Side::Blue.index()].hand.remove(blue);
        let outcome = resolve_fight(red, blue, &mut self.status);

        debug!(
            round = self.status.round_count(),
            %red,
            %blue,
            ?outcome,
            score = %self.status.score_summary(),
            "Round resolved"
        );
        Ok(outcome)
    }
}
