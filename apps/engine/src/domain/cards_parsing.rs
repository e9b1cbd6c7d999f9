//! Card parsing from compact tokens ("AS", "3D", "JK", "X:The Crown")

use std::str::FromStr;

use super::cards_types::{Card, Face, Suit};
use super::extensions::ExtensionKind;
use crate::errors::domain::DomainError;

const JOKER_TOKEN: &str = "JK";
const EXTENSION_PREFIX: &str = "X:";

impl Card {
    /// Compact token used by snapshots; inverse of `FromStr`.
    pub fn token(&self) -> String {
        match self {
            Card::Suited { suit, face } => {
                let face_ch = match face {
                    Face::Ace => 'A',
                    Face::Two => '2',
                    Face::Three => '3',
                    Face::Four => '4',
                };
                let suit_ch = match suit {
                    Suit::Diamonds => 'D',
                    Suit::Hearts => 'H',
                    Suit::Clubs => 'C',
                    Suit::Spades => 'S',
                };
                format!("{face_ch}{suit_ch}")
            }
            Card::Joker => JOKER_TOKEN.to_string(),
            Card::Extension(kind) => format!("{EXTENSION_PREFIX}{}", kind.name()),
        }
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == JOKER_TOKEN {
            return Ok(Card::Joker);
        }
        if let Some(name) = s.strip_prefix(EXTENSION_PREFIX) {
            return ExtensionKind::from_name(name)
                .map(Card::Extension)
                .ok_or_else(|| DomainError::ParseCard(format!("unknown extension: {name}")));
        }

        let mut chars = s.chars();
        let (Some(face_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(DomainError::ParseCard(s.to_string()));
        };
        let face = match face_ch {
            'A' => Face::Ace,
            '2' => Face::Two,
            '3' => Face::Three,
            '4' => Face::Four,
            _ => return Err(DomainError::ParseCard(s.to_string())),
        };
        let suit = match suit_ch {
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'C' => Suit::Clubs,
            'S' => Suit::Spades,
            _ => return Err(DomainError::ParseCard(s.to_string())),
        };
        Ok(Card::Suited { suit, face })
    }
}

/// Non-panicking helper to parse card tokens into Card instances.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
