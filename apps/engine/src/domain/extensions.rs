//! Extension cards: a closed registry of optional cards with scoring effects
//! and a decision heuristic for scripted players.
//!
//! Effects are plain data ([`Effect`]) interpreted by the score visitor, so
//! extension cards stay `Copy` and serialize by name only.

use super::cards_types::Card;
use super::player::StrategyType;
use super::scoring::ScoreVisitor;

/// Visitor flag: Diamonds never score negatively.
pub const NO_NEGATIVE_DIAMONDS: &str = "NO_NEGATIVE_DIAMONDS";
/// Visitor flag: Hearts never score negatively.
pub const NO_NEGATIVE_HEARTS: &str = "NO_NEGATIVE_HEARTS";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ExtensionKind {
    Shield,
    Crown,
    Spy,
    Jester,
}

/// Scoring behaviour contributed by an extension card.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Effect {
    /// Sets a visitor flag that affects every card of the jest.
    SetFlag(&'static str),
    /// Fixed bonus (or malus when negative).
    FlatBonus(i32),
    /// Bonus that depends on whether the jest holds the joker.
    JokerBonus { with_joker: i32, without_joker: i32 },
}

impl Effect {
    /// Flag-setting half of the effect; always runs before any bonus is read.
    pub fn apply_flags(&self, visitor: &mut ScoreVisitor) {
        if let Effect::SetFlag(flag) = self {
            visitor.set_flag(flag, true);
        }
    }

    pub fn compute_bonus(&self, visitor: &ScoreVisitor) -> i32 {
        match *self {
            Effect::SetFlag(_) => 0,
            Effect::FlatBonus(points) => points,
            Effect::JokerBonus {
                with_joker,
                without_joker,
            } => {
                if visitor.has_joker() {
                    with_joker
                } else {
                    without_joker
                }
            }
        }
    }
}

const SHIELD_EFFECTS: &[Effect] = &[
    Effect::SetFlag(NO_NEGATIVE_DIAMONDS),
    Effect::SetFlag(NO_NEGATIVE_HEARTS),
];
const CROWN_EFFECTS: &[Effect] = &[Effect::FlatBonus(5)];
const JESTER_EFFECTS: &[Effect] = &[Effect::JokerBonus {
    with_joker: 10,
    without_joker: -5,
}];

impl ExtensionKind {
    pub const ALL: [ExtensionKind; 4] = [
        ExtensionKind::Shield,
        ExtensionKind::Crown,
        ExtensionKind::Spy,
        ExtensionKind::Jester,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ExtensionKind::Shield => "The Shield",
            ExtensionKind::Crown => "The Crown",
            ExtensionKind::Spy => "The Spy",
            ExtensionKind::Jester => "The Jester",
        }
    }

    /// Lookup by display name; also accepts the bare word ("shield", "Crown").
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        let bare = wanted.strip_prefix("The ").unwrap_or(wanted);
        Self::ALL.into_iter().find(|kind| {
            let full = kind.name();
            full.eq_ignore_ascii_case(wanted)
                || full
                    .strip_prefix("The ")
                    .is_some_and(|short| short.eq_ignore_ascii_case(bare))
        })
    }

    pub const fn face_value(self) -> u8 {
        match self {
            ExtensionKind::Spy => 2,
            ExtensionKind::Shield | ExtensionKind::Crown | ExtensionKind::Jester => 0,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ExtensionKind::Shield => {
                "Protects against penalties: your Diamonds and Hearts never score negative points."
            }
            ExtensionKind::Crown => "A royal treasure: adds 5 points to your final score.",
            ExtensionKind::Spy => "An undercover agent: a neutral card worth 2.",
            ExtensionKind::Jester => {
                "The Joker's friend: worth +10 if you hold the Joker, otherwise -5."
            }
        }
    }

    pub const fn effects(self) -> &'static [Effect] {
        match self {
            ExtensionKind::Shield => SHIELD_EFFECTS,
            ExtensionKind::Crown => CROWN_EFFECTS,
            ExtensionKind::Spy => &[],
            ExtensionKind::Jester => JESTER_EFFECTS,
        }
    }

    /// How much a scripted player of `strategy` wants this card given its jest.
    pub fn ai_value(self, strategy: StrategyType, jest: &[Card]) -> i32 {
        match self {
            ExtensionKind::Shield => match strategy {
                StrategyType::Cautious => 1000,
                _ => 0,
            },
            ExtensionKind::Crown => 20,
            ExtensionKind::Spy => 2,
            ExtensionKind::Jester => {
                if strategy == StrategyType::Cautious {
                    -100
                } else if jest.iter().any(Card::is_joker) {
                    50
                } else {
                    -5
                }
            }
        }
    }
}
