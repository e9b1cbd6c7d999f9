//! Jest scoring.
//!
//! Scoring walks a jest with a [`ScoreVisitor`] in four passes:
//! 1. facts (joker present, per-suit counts)
//! 2. flag-setting effects of every extension card
//! 3. base value of every card, reading the flags
//! 4. bonuses of every extension card, reading the flags
//!
//! Passes 2 and 4 are separate so a bonus never depends on the order in which
//! extension cards sit in the jest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Face, Suit};
use super::extensions::{ExtensionKind, NO_NEGATIVE_DIAMONDS, NO_NEGATIVE_HEARTS};

const JOKER_WITHOUT_HEARTS: i32 = 4;
const BLACK_PAIR_BONUS: i32 = 2;
const LONE_ACE_VALUE: i32 = 5;

/// Double dispatch over the card variants.
pub trait CardVisitor {
    fn visit_suited(&mut self, suit: Suit, face: Face);
    fn visit_joker(&mut self);
    fn visit_extension(&mut self, kind: ExtensionKind);
}

impl Card {
    pub fn accept<V: CardVisitor + ?Sized>(&self, visitor: &mut V) {
        match *self {
            Card::Suited { suit, face } => visitor.visit_suited(suit, face),
            Card::Joker => visitor.visit_joker(),
            Card::Extension(kind) => visitor.visit_extension(kind),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Signed card values (suits, joker, extension face values).
    pub base: i32,
    /// Black-pair bonus.
    pub pairs: i32,
    /// Extension bonuses and penalties.
    pub bonus: i32,
    pub total: i32,
}

/// Accumulates the score of one jest.
#[derive(Debug, Clone, Default)]
pub struct ScoreVisitor {
    flags: BTreeMap<String, bool>,
    has_joker: bool,
    suit_counts: [u8; 4],
    base: i32,
    bonus: i32,
}

impl ScoreVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.flags.insert(key.to_string(), value);
    }

    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    pub fn has_joker(&self) -> bool {
        self.has_joker
    }

    pub fn add_bonus(&mut self, points: i32) {
        self.bonus += points;
    }

    pub fn bonus(&self) -> i32 {
        self.bonus
    }

    fn count(&self, suit: Suit) -> u8 {
        self.suit_counts[suit_index(suit)]
    }

    fn observe(&mut self, cards: &[Card]) {
        for card in cards {
            match card {
                Card::Suited { suit, .. } => self.suit_counts[suit_index(*suit)] += 1,
                Card::Joker => self.has_joker = true,
                Card::Extension(_) => {}
            }
        }
    }

    fn apply_flags(&mut self, cards: &[Card]) {
        for kind in cards.iter().filter_map(Card::extension) {
            for effect in kind.effects() {
                effect.apply_flags(self);
            }
        }
    }

    fn apply_bonuses(&mut self, cards: &[Card]) {
        for kind in cards.iter().filter_map(Card::extension) {
            for effect in kind.effects() {
                let points = effect.compute_bonus(self);
                self.add_bonus(points);
            }
        }
    }
}

impl CardVisitor for ScoreVisitor {
    fn visit_suited(&mut self, suit: Suit, face: Face) {
        let value = if face == Face::Ace && self.count(suit) == 1 {
            LONE_ACE_VALUE
        } else {
            i32::from(face.value())
        };
        self.base += match suit {
            Suit::Spades | Suit::Clubs => value,
            Suit::Diamonds => {
                if self.flag(NO_NEGATIVE_DIAMONDS) {
                    0
                } else {
                    -value
                }
            }
            Suit::Hearts => {
                if !self.has_joker {
                    0
                } else if self.count(Suit::Hearts) == 4 {
                    value
                } else if self.flag(NO_NEGATIVE_HEARTS) {
                    0
                } else {
                    -value
                }
            }
        };
    }

    fn visit_joker(&mut self) {
        if self.count(Suit::Hearts) == 0 {
            self.base += JOKER_WITHOUT_HEARTS;
        }
    }

    fn visit_extension(&mut self, kind: ExtensionKind) {
        self.base += i32::from(kind.face_value());
    }
}

fn suit_index(suit: Suit) -> usize {
    match suit {
        Suit::Diamonds => 0,
        Suit::Hearts => 1,
        Suit::Clubs => 2,
        Suit::Spades => 3,
    }
}

fn black_pairs(cards: &[Card]) -> i32 {
    let pairs = Face::ALL
        .iter()
        .filter(|&&face| {
            cards.contains(&Card::suited(face, Suit::Spades))
                && cards.contains(&Card::suited(face, Suit::Clubs))
        })
        .count();
    pairs as i32 * BLACK_PAIR_BONUS
}

/// Score a jest.
pub fn score_jest(cards: &[Card]) -> ScoreBreakdown {
    let mut visitor = ScoreVisitor::new();
    visitor.observe(cards);
    visitor.apply_flags(cards);
    for card in cards {
        card.accept(&mut visitor);
    }
    visitor.apply_bonuses(cards);

    let pairs = black_pairs(cards);
    ScoreBreakdown {
        base: visitor.base,
        pairs,
        bonus: visitor.bonus(),
        total: visitor.base + pairs + visitor.bonus(),
    }
}

/// Score change `extra` would cause if it joined `cards`.
pub fn marginal_score(cards: &[Card], extra: Card) -> i32 {
    let mut with_extra = cards.to_vec();
    with_extra.push(extra);
    score_jest(&with_extra).total - score_jest(cards).total
}
