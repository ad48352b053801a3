//! Tiny games used by the search tests.

use engine_core::{score_for, GameState, Side};

/// A two-card duel. Each side holds {High, Low}. Red commits first, Blue
/// answers, the higher card takes the round, and the first decided round
/// wins the match. Two tied rounds are a draw.
#[derive(Debug, Clone)]
pub struct HighLow {
    pub hands: [Vec<HlCard>; 2],
    pub pending: Option<HlCard>,
    pub to_move: Side,
    pub last_mover: Side,
    pub winner: Option<Side>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HlCard {
    Low,
    High,
}

impl HighLow {
    pub fn new() -> Self {
        Self {
            hands: [
                vec![HlCard::High, HlCard::Low],
                vec![HlCard::High, HlCard::Low],
            ],
            pending: None,
            to_move: Side::Red,
            last_mover: Side::Blue,
            winner: None,
        }
    }
}

impl GameState for HighLow {
    type Move = HlCard;

    fn legal_moves(&self) -> Vec<HlCard> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.hands[self.to_move.index()].clone()
    }

    fn apply(&mut self, mv: &HlCard) {
        let side = self.to_move;
        let hand = &mut self.hands[side.index()];
        let pos = hand.iter().position(|c| c == mv).expect("card in hand");
        hand.remove(pos);

        match self.pending.take() {
            None => self.pending = Some(*mv),
            Some(red) => {
                let blue = *mv;
                if red > blue {
                    self.winner = Some(Side::Red);
                } else if blue > red {
                    self.winner = Some(Side::Blue);
                }
            }
        }

        self.last_mover = side;
        self.to_move = side.opponent();
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || (self.hands.iter().all(|h| h.is_empty()) && self.pending.is_none())
    }

    fn player_just_moved(&self) -> Side {
        self.last_mover
    }

    fn result(&self, side: Side) -> f32 {
        score_for(self.winner, side)
    }
}

/// Single-pile Nim: take one or two stones, taking the last stone wins.
#[derive(Debug, Clone)]
pub struct Countdown {
    pub stones: u32,
    pub to_move: Side,
    pub last_mover: Side,
}

impl Countdown {
    pub fn new(stones: u32) -> Self {
        Self {
            stones,
            to_move: Side::Red,
            last_mover: Side::Blue,
        }
    }
}

impl GameState for Countdown {
    type Move = u32;

    fn legal_moves(&self) -> Vec<u32> {
        (1..=self.stones.min(2)).collect()
    }

    fn apply(&mut self, take: &u32) {
        self.stones -= take;
        self.last_mover = self.to_move;
        self.to_move = self.to_move.opponent();
    }

    fn is_terminal(&self) -> bool {
        self.stones == 0
    }

    fn player_just_moved(&self) -> Side {
        self.last_mover
    }

    fn result(&self, side: Side) -> f32 {
        score_for(self.is_terminal().then_some(self.last_mover), side)
    }
}
