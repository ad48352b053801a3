//! What one side knows when it has to choose a card.

use crate::cards::{Card, Hand};
use crate::game::Player;
use crate::status::MatchStatus;
use engine_core::Side;

/// A single side's view of the match: its own hand, the public history, and
/// the opponent's card if a Spy forced it to be revealed.
#[derive(Debug, Clone, Copy)]
pub struct MatchView<'a> {
    pub side: Side,
    pub hand: Hand,
    pub status: &'a MatchStatus,
    pub revealed_opponent_card: Option<Card>,
}

impl<'a> MatchView<'a> {
    pub fn new(player: &Player, status: &'a MatchStatus) -> Self {
        Self {
            side: player.side,
            hand: player.hand,
            status,
            revealed_opponent_card: None,
        }
    }

    pub fn with_revealed(mut self, card: Option<Card>) -> Self {
        self.revealed_opponent_card = card;
        self
    }

    pub fn opponent(&self) -> Side {
        self.side.opponent()
    }
}
