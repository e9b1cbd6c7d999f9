//! Core card-related types: Card, Face, Suit

use std::cmp::Ordering;
use std::fmt;

use super::extensions::ExtensionKind;

/// Suits in increasing strength order; the derived `Ord` follows strength.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Diamonds,
    Hearts,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Clubs, Suit::Spades];

    /// Tie-break strength used when comparing equal faces (Diamonds=1 .. Spades=4).
    pub const fn strength(self) -> u8 {
        match self {
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Clubs => 3,
            Suit::Spades => 4,
        }
    }

    pub const fn is_black(self) -> bool {
        matches!(self, Suit::Clubs | Suit::Spades)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Face {
    Ace,
    Two,
    Three,
    Four,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::Ace, Face::Two, Face::Three, Face::Four];

    pub const fn value(self) -> u8 {
        match self {
            Face::Ace => 1,
            Face::Two => 2,
            Face::Three => 3,
            Face::Four => 4,
        }
    }
}

/// One physical card.
///
/// Value functions (`face_value`, `suit_value`) are total over every variant:
/// the joker and extension cards report a suit value of 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Card {
    Suited { suit: Suit, face: Face },
    Joker,
    Extension(ExtensionKind),
}

impl Card {
    pub const fn suited(face: Face, suit: Suit) -> Self {
        Card::Suited { suit, face }
    }

    pub fn face_value(&self) -> u8 {
        match self {
            Card::Suited { face, .. } => face.value(),
            Card::Joker => 0,
            Card::Extension(kind) => kind.face_value(),
        }
    }

    pub fn suit_value(&self) -> u8 {
        match self {
            Card::Suited { suit, .. } => suit.strength(),
            Card::Joker | Card::Extension(_) => 0,
        }
    }

    pub fn suit(&self) -> Option<Suit> {
        match self {
            Card::Suited { suit, .. } => Some(*suit),
            _ => None,
        }
    }

    pub fn face(&self) -> Option<Face> {
        match self {
            Card::Suited { face, .. } => Some(*face),
            _ => None,
        }
    }

    pub fn is_joker(&self) -> bool {
        matches!(self, Card::Joker)
    }

    pub fn extension(&self) -> Option<ExtensionKind> {
        match self {
            Card::Extension(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Comparison key used to pick the starting player: face value first,
    /// then suit strength.
    pub fn starter_key(&self) -> (u8, u8) {
        (self.face_value(), self.suit_value())
    }
}

// Note: Ord on Card is only for stable sorting (suited cards by suit then face,
// then the joker, then extensions). Use `starter_key` for game comparisons.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        fn bucket(card: &Card) -> u8 {
            match card {
                Card::Suited { .. } => 0,
                Card::Joker => 1,
                Card::Extension(_) => 2,
            }
        }
        match (self, other) {
            (Card::Suited { suit: sa, face: fa }, Card::Suited { suit: sb, face: fb }) => {
                sa.cmp(sb).then(fa.cmp(fb))
            }
            (Card::Extension(a), Card::Extension(b)) => a.cmp(b),
            _ => bucket(self).cmp(&bucket(other)),
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Face::Ace => "Ace",
            Face::Two => "Two",
            Face::Three => "Three",
            Face::Four => "Four",
        };
        f.write_str(s)
    }
}

/// Human-readable names for presentation ("Four of Spades", "Joker").
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Suited { suit, face } => write!(f, "{face} of {suit}"),
            Card::Joker => f.write_str("Joker"),
            Card::Extension(kind) => write!(f, "{} (ext)", kind.name()),
        }
    }
}
