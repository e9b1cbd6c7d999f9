//! A player's two-card commitment for one round.

use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use crate::errors::domain::DomainError;

/// Which half of an offer a claim takes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    FaceUp,
    FaceDown,
}

/// Two-slot offer.
///
/// - open: both slots filled, claimable exactly once
/// - retired: one slot left, the remainder waiting for the end of the round
/// - spent: both slots empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    face_up: Option<Card>,
    face_down: Option<Card>,
}

impl Offer {
    pub fn new(face_up: Card, face_down: Card) -> Self {
        Self {
            face_up: Some(face_up),
            face_down: Some(face_down),
        }
    }

    /// Rebuild an offer in any sub-state (used by snapshot restore).
    pub fn from_slots(face_up: Option<Card>, face_down: Option<Card>) -> Self {
        Self { face_up, face_down }
    }

    /// Split a two-card hand into an offer showing `hand[face_up_index]`.
    pub fn from_hand(hand: &[Card], face_up_index: usize) -> Result<Self, DomainError> {
        let [a, b] = hand else {
            return Err(DomainError::InvalidHandIndex {
                index: face_up_index,
                len: hand.len(),
            });
        };
        match face_up_index {
            0 => Ok(Self::new(*a, *b)),
            1 => Ok(Self::new(*b, *a)),
            _ => Err(DomainError::InvalidHandIndex {
                index: face_up_index,
                len: hand.len(),
            }),
        }
    }

    pub fn is_open(&self) -> bool {
        self.face_up.is_some() && self.face_down.is_some()
    }

    /// Publicly visible card. Only meaningful while the offer is open or when
    /// the face-up card is the remainder.
    pub fn face_up(&self) -> Option<Card> {
        self.face_up
    }

    /// Concealed card; engine-internal (public views only expose its presence).
    pub fn face_down(&self) -> Option<Card> {
        self.face_down
    }

    /// Take one side of an open offer. The other card stays as the remainder.
    pub fn claim(&mut self, side: Side) -> Option<Card> {
        if !self.is_open() {
            return None;
        }
        match side {
            Side::FaceUp => self.face_up.take(),
            Side::FaceDown => self.face_down.take(),
        }
    }

    /// The card left behind once the offer has been claimed from.
    pub fn remainder(&self) -> Option<Card> {
        if self.is_open() {
            return None;
        }
        self.face_up.or(self.face_down)
    }

    /// Drain every card still held by the offer.
    pub fn take_cards(&mut self) -> Vec<Card> {
        self.face_up
            .take()
            .into_iter()
            .chain(self.face_down.take())
            .collect()
    }

    pub fn card_count(&self) -> usize {
        usize::from(self.face_up.is_some()) + usize::from(self.face_down.is_some())
    }
}
