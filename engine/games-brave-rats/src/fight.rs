//! Round resolution.
//!
//! Both sides commit a card, then the round is settled in this order:
//!
//! 1. A card's power is active unless the opponent played the Wizard.
//! 2. An active Musician on either side puts the round on hold.
//! 3. An active Princess facing the Prince wins the match.
//! 4. Prince against Prince is on hold, otherwise an active Prince wins.
//! 5. Strength is the card value, +2 after an active General. A single active
//!    Assassin makes the lower strength win. Equal strength is on hold.
//!
//! A round winner scores 1, or 2 with an active Ambassador, plus every round
//! on hold.

use crate::cards::Card;
use crate::status::{CarriedEffects, MatchStatus, RoundOutcome};
use engine_core::Side;

/// Strength bonus granted by a General on the following round.
pub const GENERAL_BONUS: u8 = 2;

/// The rule-level result of a round, before points are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    OnHold,
    Round { winner: Side, points: u8 },
    Match { winner: Side },
}

/// The two cards of a round together with the bonuses carried into it.
#[derive(Debug, Clone, Copy)]
struct Round {
    cards: [Card; 2],
    bonus: [bool; 2],
}

impl Round {
    fn card(&self, side: Side) -> Card {
        self.cards[side.index()]
    }

    fn active(&self, side: Side) -> bool {
        self.card(side.opponent()) != Card::Wizard
    }

    /// `side` played `card` and its power is in effect.
    fn plays(&self, side: Side, card: Card) -> bool {
        self.card(side) == card && self.active(side)
    }

    fn either_plays(&self, card: Card) -> bool {
        Side::BOTH.iter().any(|&side| self.plays(side, card))
    }

    fn strength(&self, side: Side) -> u8 {
        let bonus = if self.bonus[side.index()] { GENERAL_BONUS } else { 0 };
        self.card(side).value() + bonus
    }

    fn points(&self, winner: Side) -> u8 {
        if self.plays(winner, Card::Ambassador) {
            2
        } else {
            1
        }
    }

    fn won_by(&self, winner: Side) -> Verdict {
        Verdict::Round {
            winner,
            points: self.points(winner),
        }
    }

    fn verdict(&self) -> Verdict {
        if self.either_plays(Card::Musician) {
            return Verdict::OnHold;
        }

        for side in Side::BOTH {
            if self.plays(side, Card::Princess) && self.card(side.opponent()) == Card::Prince {
                return Verdict::Match { winner: side };
            }
        }

        match (
            self.plays(Side::Red, Card::Prince),
            self.plays(Side::Blue, Card::Prince),
        ) {
            (true, true) => return Verdict::OnHold,
            (true, false) => return self.won_by(Side::Red),
            (false, true) => return self.won_by(Side::Blue),
            (false, false) => {}
        }

        let red = self.strength(Side::Red);
        let blue = self.strength(Side::Blue);
        let reversed = self.plays(Side::Red, Card::Assassin) != self.plays(Side::Blue, Card::Assassin);
        let ordering = if reversed { blue.cmp(&red) } else { red.cmp(&blue) };

        match ordering {
            std::cmp::Ordering::Equal => Verdict::OnHold,
            std::cmp::Ordering::Greater => self.won_by(Side::Red),
            std::cmp::Ordering::Less => self.won_by(Side::Blue),
        }
    }

    fn carried(&self) -> CarriedEffects {
        let spy = |side| self.plays(side, Card::Spy);
        let reveals_first = match (spy(Side::Red), spy(Side::Blue)) {
            (true, false) => Some(Side::Blue),
            (false, true) => Some(Side::Red),
            _ => None,
        };
        CarriedEffects {
            general_bonus: [
                self.plays(Side::Red, Card::General),
                self.plays(Side::Blue, Card::General),
            ],
            reveals_first,
        }
    }
}

/// Judge a round without touching any match state.
///
/// `general_bonus` holds, per side, whether the previous card was an active
/// General.
pub fn judge(red: Card, blue: Card, general_bonus: [bool; 2]) -> (Verdict, CarriedEffects) {
    let round = Round {
        cards: [red, blue],
        bonus: general_bonus,
    };
    (round.verdict(), round.carried())
}

/// Resolve a round against `status`, updating points, held rounds, the winner
/// and the effects carried into the next round.
pub fn resolve_fight(red: Card, blue: Card, status: &mut MatchStatus) -> RoundOutcome {
    debug_assert!(!status.is_over(), "resolving a round after the match ended");

    let bonus = [status.general_bonus(Side::Red), status.general_bonus(Side::Blue)];
    let (verdict, effects) = judge(red, blue, bonus);

    match verdict {
        Verdict::OnHold => status.hold(red, blue, effects),
        Verdict::Round { winner, points } => status.award(red, blue, winner, points, effects),
        Verdict::Match { winner } => status.concede(red, blue, winner, effects),
    }
}
