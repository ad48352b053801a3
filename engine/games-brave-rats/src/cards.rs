//! Cards and hands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cards each side starts with.
pub const HAND_SIZE: usize = 8;

/// One of the eight rat cards, numbered by strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Card {
    /// Round is put on hold.
    Musician = 0,
    /// Wins the match outright against the Prince.
    Princess = 1,
    /// The opponent reveals their next card first.
    Spy = 2,
    /// Lowest strength wins.
    Assassin = 3,
    /// Counts as two victories when it wins.
    Ambassador = 4,
    /// Nullifies the opponent's power.
    Wizard = 5,
    /// Next card gets +2 strength.
    General = 6,
    /// Wins unless facing the Musician or the Princess.
    Prince = 7,
}

impl Card {
    /// Every card, in strength order.
    pub const ALL: [Card; HAND_SIZE] = [
        Card::Musician,
        Card::Princess,
        Card::Spy,
        Card::Assassin,
        Card::Ambassador,
        Card::Wizard,
        Card::General,
        Card::Prince,
    ];

    /// Printed strength.
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Card> {
        Self::ALL.get(value as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Card::Musician => "Musician",
            Card::Princess => "Princess",
            Card::Spy => "Spy",
            Card::Assassin => "Assassin",
            Card::Ambassador => "Ambassador",
            Card::Wizard => "Wizard",
            Card::General => "General",
            Card::Prince => "Prince",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << self.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of cards, stored as one bit per card.
///
/// Copying a hand is a byte copy, which keeps cloning search states cheap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hand(u8);

impl Hand {
    pub const fn empty() -> Self {
        Hand(0)
    }

    /// The eight cards every side starts with.
    pub const fn full() -> Self {
        Hand(u8::MAX)
    }

    #[inline]
    pub fn contains(self, card: Card) -> bool {
        self.0 & card.bit() != 0
    }

    /// Add `card`. Returns false if it was already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let fresh = !self.contains(card);
        self.0 |= card.bit();
        fresh
    }

    /// Remove `card`. Returns false if it was not present.
    pub fn remove(&mut self, card: Card) -> bool {
        let present = self.contains(card);
        self.0 &= !card.bit();
        present
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Cards in `self` that are not in `other`.
    pub fn difference(self, other: Hand) -> Hand {
        Hand(self.0 & !other.0)
    }

    /// Cards in ascending strength.
    pub fn iter(self) -> impl Iterator<Item = Card> {
        Card::ALL.into_iter().filter(move |card| self.contains(*card))
    }

    pub fn to_vec(self) -> Vec<Card> {
        self.iter().collect()
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut hand = Hand::empty();
        for card in iter {
            hand.insert(card);
        }
        hand
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
