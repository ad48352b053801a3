//! Match-outcome tracking: points, rounds on hold and carried card effects.

use crate::cards::{Card, HAND_SIZE};
use engine_core::Side;
use serde::{Deserialize, Serialize};

/// Points needed to win the match.
pub const WINNING_POINTS: u8 = 4;

/// How a single round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// `side` took the round and scored `points`, held rounds included.
    Won { side: Side, points: u8 },
    /// No winner; the round's point goes to the next round's winner.
    OnHold,
    /// The round decided the match, either by points or by the Princess.
    MatchWon(Side),
}

/// One resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub red: Card,
    pub blue: Card,
    pub outcome: RoundOutcome,
}

impl RoundRecord {
    #[inline]
    pub fn card_of(&self, side: Side) -> Card {
        match side {
            Side::Red => self.red,
            Side::Blue => self.blue,
        }
    }
}

/// Effects a round leaves on the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarriedEffects {
    /// Side played an active General and gets +2 strength next round.
    pub general_bonus: [bool; 2],
    /// Side must reveal its next card before the opponent chooses.
    pub reveals_first: Option<Side>,
}

/// Public state of a match: everything both sides can see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchStatus {
    rounds: Vec<RoundRecord>,
    points: [u8; 2],
    on_hold: u8,
    winner: Option<Side>,
    effects: CarriedEffects,
}

impl MatchStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn points(&self, side: Side) -> u8 {
        self.points[side.index()]
    }

    /// Rounds waiting to be claimed by the next round winner.
    pub fn on_hold(&self) -> u8 {
        self.on_hold
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// True once a side has won or every card has been played.
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.rounds.len() >= HAND_SIZE
    }

    pub fn general_bonus(&self, side: Side) -> bool {
        self.effects.general_bonus[side.index()]
    }

    /// Side that must reveal its card first in the coming round.
    pub fn reveals_first(&self) -> Option<Side> {
        self.effects.reveals_first
    }

    pub fn effects(&self) -> CarriedEffects {
        self.effects
    }

    /// Cards `side` has played, in round order.
    pub fn played_by(&self, side: Side) -> impl Iterator<Item = Card> + '_ {
        self.rounds.iter().map(move |round| round.card_of(side))
    }

    pub fn score_summary(&self) -> String {
        let red = self.points(Side::Red);
        let blue = self.points(Side::Blue);
        match self.winner {
            Some(side) => format!("{side} wins, red {red} - {blue} blue"),
            None if self.is_over() => format!("tie, red {red} - {blue} blue"),
            None if self.on_hold > 0 => {
                format!("red {red} - {blue} blue ({} on hold)", self.on_hold)
            }
            None => format!("red {red} - {blue} blue"),
        }
    }

    /// Record a round that ended on hold.
    pub(crate) fn hold(&mut self, red: Card, blue: Card, effects: CarriedEffects) -> RoundOutcome {
        self.on_hold += 1;
        self.push(red, blue, RoundOutcome::OnHold, effects)
    }

    /// Credit `side` with `points` plus every held round.
    pub(crate) fn award(
        &mut self,
        red: Card,
        blue: Card,
        side: Side,
        points: u8,
        effects: CarriedEffects,
    ) -> RoundOutcome {
        let points = points + std::mem::take(&mut self.on_hold);
        let total = &mut self.points[side.index()];
        *total = total.saturating_add(points);

        let outcome = if *total >= WINNING_POINTS {
            self.winner = Some(side);
            RoundOutcome::MatchWon(side)
        } else {
            RoundOutcome::Won { side, points }
        };
        self.push(red, blue, outcome, effects)
    }

    /// End the match immediately in favour of `side`.
    pub(crate) fn concede(
        &mut self,
        red: Card,
        blue: Card,
        side: Side,
        effects: CarriedEffects,
    ) -> RoundOutcome {
        self.winner = Some(side);
        self.push(red, blue, RoundOutcome::MatchWon(side), effects)
    }

    fn push(
        &mut self,
        red: Card,
        blue: Card,
        outcome: RoundOutcome,
        effects: CarriedEffects,
    ) -> RoundOutcome {
        self.rounds.push(RoundRecord { red, blue, outcome });
        self.effects = effects;
        outcome
    }
}
