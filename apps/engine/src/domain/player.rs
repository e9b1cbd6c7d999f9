//! Participants: identity, hand, jest, pending offer, and score.

use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::offer::Offer;
use crate::errors::domain::DomainError;

/// Seat index into the game's ordered player list.
pub type PlayerId = usize;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 4;
/// Cards dealt to each player per round.
pub const HAND_SIZE: usize = 2;

/// Scripted behaviours available to virtual players.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    Random,
    Aggressive,
    Cautious,
}

impl StrategyType {
    pub const ALL: [StrategyType; 3] = [
        StrategyType::Random,
        StrategyType::Aggressive,
        StrategyType::Cautious,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            StrategyType::Random => "random",
            StrategyType::Aggressive => "aggressive",
            StrategyType::Cautious => "cautious",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Who supplies this player's decisions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "strategy", rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Virtual(StrategyType),
}

/// Claimed cards scored at game end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jest {
    cards: Vec<Card>,
}

impl Jest {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn has_joker(&self) -> bool {
        self.cards.iter().any(Card::is_joker)
    }

    pub(crate) fn add(&mut self, card: Card) {
        self.cards.push(card);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    kind: PlayerKind,
    hand: Vec<Card>,
    jest: Jest,
    offer: Option<Offer>,
    score: i32,
}

impl Player {
    /// Names are trimmed and must be non-empty; uniqueness is enforced by the game.
    pub fn new(name: &str, kind: PlayerKind) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidPlayerName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            kind,
            hand: Vec::with_capacity(HAND_SIZE),
            jest: Jest::default(),
            offer: None,
            score: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    pub fn strategy(&self) -> Option<StrategyType> {
        match self.kind {
            PlayerKind::Human => None,
            PlayerKind::Virtual(strategy) => Some(strategy),
        }
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn jest(&self) -> &Jest {
        &self.jest
    }

    pub fn offer(&self) -> Option<&Offer> {
        self.offer.as_ref()
    }

    pub fn has_open_offer(&self) -> bool {
        self.offer.as_ref().is_some_and(Offer::is_open)
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Cards this player currently accounts for (hand, offer, jest).
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.jest.len() + self.offer.as_ref().map_or(0, Offer::card_count)
    }

    pub(crate) fn add_to_hand(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub(crate) fn set_hand(&mut self, cards: Vec<Card>) {
        self.hand = cards;
    }

    pub(crate) fn take_hand(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }

    pub(crate) fn jest_mut(&mut self) -> &mut Jest {
        &mut self.jest
    }

    pub(crate) fn set_offer(&mut self, offer: Option<Offer>) {
        self.offer = offer;
    }

    pub(crate) fn offer_mut(&mut self) -> Option<&mut Offer> {
        self.offer.as_mut()
    }

    pub(crate) fn take_offer(&mut self) -> Option<Offer> {
        self.offer.take()
    }

    pub(crate) fn set_score(&mut self, score: i32) {
        self.score = score;
    }
}

/// Seat lookup by name; names are the only stable cross-reference key.
pub fn find_by_name(players: &[Player], name: &str) -> Option<PlayerId> {
    players.iter().position(|p| p.name() == name)
}
