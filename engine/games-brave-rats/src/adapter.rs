//! Search state for the UCT engine.
//!
//! A [`DuelState`] is rebuilt from one side's [`MatchView`]. Every played card
//! is revealed when its round resolves, so the opponent's remaining hand is
//! known exactly: the full hand minus its public history, minus the card a
//! Spy forced it to reveal. Within the search a round is two plies. The side
//! that must reveal moves first, Red otherwise, and the round resolves once
//! both have committed a card.

use crate::cards::{Card, Hand, HAND_SIZE};
use crate::fight::resolve_fight;
use crate::status::MatchStatus;
use crate::view::MatchView;
use engine_core::{score_for, GameState, Side};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructionError {
    #[error("{side} should hold {expected} cards but holds {actual}")]
    HandSizeMismatch {
        side: Side,
        expected: usize,
        actual: usize,
    },

    #[error("{side} is recorded playing the {card} more than once")]
    DuplicatePlay { side: Side, card: Card },

    #[error("The {card} is in {side}'s hand but was already played")]
    PlayedCardInHand { side: Side, card: Card },

    #[error("{side} revealed the {card}, which it can no longer hold")]
    RevealedCardUnavailable { side: Side, card: Card },

    #[error("{side} must reveal first but no revealed card was given")]
    MissingReveal { side: Side },

    #[error("{side} revealed the {card} without being forced to reveal first")]
    UnexpectedReveal { side: Side, card: Card },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuelState {
    hands: [Hand; 2],
    pending: [Option<Card>; 2],
    to_move: Side,
    just_moved: Side,
    status: MatchStatus,
}

impl DuelState {
    /// Both sides holding all eight cards, Red to move.
    pub fn new_match() -> Self {
        Self {
            hands: [Hand::full(); 2],
            pending: [None; 2],
            to_move: Side::Red,
            just_moved: Side::Blue,
            status: MatchStatus::new(),
        }
    }

    /// Rebuild the full state from `view`, with the viewing side to move.
    ///
    /// A revealed card must be given exactly when the opponent is forced to
    /// reveal first in a match that is still running.
    pub fn from_view(view: &MatchView<'_>) -> Result<Self, ReconstructionError> {
        let mine = view.side;
        let theirs = view.opponent();
        let rounds = view.status.round_count();

        let my_played = played_hand(view.status, mine)?;
        let their_played = played_hand(view.status, theirs)?;

        if let Some(card) = view.hand.iter().find(|card| my_played.contains(*card)) {
            return Err(ReconstructionError::PlayedCardInHand { side: mine, card });
        }
        let expected = HAND_SIZE.saturating_sub(rounds);
        if view.hand.len() != expected {
            return Err(ReconstructionError::HandSizeMismatch {
                side: mine,
                expected,
                actual: view.hand.len(),
            });
        }

        let must_reveal = !view.status.is_over() && view.status.reveals_first() == Some(theirs);
        match (must_reveal, view.revealed_opponent_card) {
            (true, None) => return Err(ReconstructionError::MissingReveal { side: theirs }),
            (false, Some(card)) => {
                return Err(ReconstructionError::UnexpectedReveal { side: theirs, card })
            }
            _ => {}
        }

        let mut their_hand = Hand::full().difference(their_played);
        let mut pending = [None; 2];
        if let Some(card) = view.revealed_opponent_card {
            if !their_hand.remove(card) {
                return Err(ReconstructionError::RevealedCardUnavailable { side: theirs, card });
            }
            pending[theirs.index()] = Some(card);
        }

        let expected = expected.saturating_sub(usize::from(pending[theirs.index()].is_some()));
        if their_hand.len() != expected {
            return Err(ReconstructionError::HandSizeMismatch {
                side: theirs,
                expected,
                actual: their_hand.len(),
            });
        }

        let mut hands = [Hand::empty(); 2];
        hands[mine.index()] = view.hand;
        hands[theirs.index()] = their_hand;

        Ok(Self {
            hands,
            pending,
            to_move: mine,
            just_moved: theirs,
            status: view.status.clone(),
        })
    }

    pub fn hand(&self, side: Side) -> Hand {
        self.hands[side.index()]
    }

    /// Card `side` has committed to the current round, if any.
    pub fn pending(&self, side: Side) -> Option<Card> {
        self.pending[side.index()]
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn status(&self) -> &MatchStatus {
        &self.status
    }

    /// Cards `side` still holds, has committed, or has played.
    ///
    /// Always eight for a consistent state.
    pub fn cards_accounted(&self, side: Side) -> usize {
        self.hand(side).len()
            + usize::from(self.pending(side).is_some())
            + self.status.round_count()
    }

    fn round_opener(&self) -> Side {
        self.status.reveals_first().unwrap_or(Side::Red)
    }
}

/// Cards `side` has played so far, rejecting repeats.
fn played_hand(status: &MatchStatus, side: Side) -> Result<Hand, ReconstructionError> {
    let mut played = Hand::empty();
    for card in status.played_by(side) {
        if !played.insert(card) {
            return Err(ReconstructionError::DuplicatePlay { side, card });
        }
    }
    Ok(played)
}

impl GameState for DuelState {
    type Move = Card;

    fn legal_moves(&self) -> Vec<Card> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.hand(self.to_move).to_vec()
    }

    fn apply(&mut self, card: &Card) {
        let side = self.to_move;
        let held = self.hands[side.index()].remove(*card);
        debug_assert!(held, "{side} played the {card} without holding it");

        self.pending[side.index()] = Some(*card);
        self.just_moved = side;

        if let [Some(red), Some(blue)] = self.pending {
            resolve_fight(red, blue, &mut self.status);
            self.pending = [None; 2];
            self.to_move = self.round_opener();
        } else {
            self.to_move = side.opponent();
        }
    }

    fn is_terminal(&self) -> bool {
        self.status.is_over()
    }

    fn player_just_moved(&self) -> Side {
        self.just_moved
    }

    fn result(&self, side: Side) -> f32 {
        score_for(self.status.winner(), side)
    }
}
