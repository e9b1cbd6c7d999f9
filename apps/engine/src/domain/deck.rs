//! The shared pool of undealt cards.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::cards_types::{Card, Face, Suit};
use super::extensions::ExtensionKind;
use super::trophies::{Trophy, TrophyCategory};
use crate::errors::domain::DomainError;

/// Ordered pool of remaining cards. Cards are dealt from the front and
/// returned to the back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// 16 suit cards (Diamonds..Spades, Ace..Four) plus the joker, followed by
    /// the requested extension cards, in a fixed unshuffled order.
    pub fn standard(extensions: &[ExtensionKind]) -> Self {
        let mut cards = VecDeque::with_capacity(17 + extensions.len());
        for suit in Suit::ALL {
            for face in Face::ALL {
                cards.push_back(Card::suited(face, suit));
            }
        }
        cards.push_back(Card::Joker);
        cards.extend(extensions.iter().copied().map(Card::Extension));
        Self { cards }
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl ExactSizeIterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Remove and return the next card.
    pub fn deal(&mut self) -> Result<Card, DomainError> {
        self.cards.pop_front().ok_or(DomainError::EmptyDeck)
    }

    /// Remove `n` cards at once; leaves the deck untouched when short.
    pub fn deal_many(&mut self, n: usize) -> Result<Vec<Card>, DomainError> {
        if self.cards.len() < n {
            return Err(DomainError::InsufficientCards {
                needed: n,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn return_card(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Pre-select `n` trophies. Category `i` goes to the `i`-th drawn card,
    /// cycling through [`TrophyCategory::ALL`]. The cards leave the pool for
    /// the rest of the game.
    pub fn choose_trophies(&mut self, n: usize) -> Result<Vec<Trophy>, DomainError> {
        let cards = self.deal_many(n)?;
        let trophies: Vec<Trophy> = cards
            .into_iter()
            .zip(TrophyCategory::ALL.iter().cycle())
            .map(|(card, &category)| Trophy { card, category })
            .collect();
        debug!(count = trophies.len(), remaining = self.len(), "trophies chosen");
        Ok(trophies)
    }
}
