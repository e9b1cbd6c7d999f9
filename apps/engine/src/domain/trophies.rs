//! Trophy categories and end-of-game adjudication.

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Face, Suit};
use super::player::PlayerId;
use super::scoring::{marginal_score, score_jest};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrophyCategory {
    HighestFace,
    LowestFace,
    MajorityFaceValue,
    Joker,
    BestJest,
    BestJestWithoutJoker,
}

impl TrophyCategory {
    pub const ALL: [TrophyCategory; 6] = [
        TrophyCategory::HighestFace,
        TrophyCategory::LowestFace,
        TrophyCategory::MajorityFaceValue,
        TrophyCategory::Joker,
        TrophyCategory::BestJest,
        TrophyCategory::BestJestWithoutJoker,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            TrophyCategory::HighestFace => "Highest Face",
            TrophyCategory::LowestFace => "Lowest Face",
            TrophyCategory::MajorityFaceValue => "Majority Face Value",
            TrophyCategory::Joker => "Joker",
            TrophyCategory::BestJest => "Best Jest",
            TrophyCategory::BestJestWithoutJoker => "Best Jest without Joker",
        }
    }
}

/// A card set aside at game start together with the rule that awards it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Trophy {
    pub card: Card,
    pub category: TrophyCategory,
}

impl Trophy {
    /// Human-readable rule, e.g. "Highest Face (Spades)".
    pub fn describe(&self) -> String {
        match (self.category, self.card) {
            (
                TrophyCategory::HighestFace | TrophyCategory::LowestFace,
                Card::Suited { suit, .. },
            ) => format!("{} ({suit})", self.category.label()),
            (TrophyCategory::MajorityFaceValue, Card::Suited { face, .. }) => {
                format!("{} ({})", self.category.label(), face.value())
            }
            _ => self.category.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrophyWinner {
    pub player: PlayerId,
    /// Score change the trophy card makes when added to this player's jest.
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrophyAward {
    pub trophy: Trophy,
    /// Every tied qualifier receives the full award; empty when nobody qualifies.
    pub winners: Vec<TrophyWinner>,
}

/// Trophy count for a table size (3 players: 2 trophies, 4 players: 1).
pub fn trophy_count_for(players: usize) -> usize {
    if players <= 3 {
        2
    } else {
        1
    }
}

/// Adjudicate every trophy against the final jests (indexed by `PlayerId`).
pub fn assign_trophies(jests: &[&[Card]], trophies: &[Trophy]) -> Vec<TrophyAward> {
    trophies
        .iter()
        .map(|trophy| {
            let winners = qualifiers(trophy, jests)
                .into_iter()
                .map(|player| TrophyWinner {
                    player,
                    points: marginal_score(jests[player], trophy.card),
                })
                .collect();
            TrophyAward {
                trophy: *trophy,
                winners,
            }
        })
        .collect()
}

/// Players satisfying the trophy's rule, in player order.
pub fn qualifiers(trophy: &Trophy, jests: &[&[Card]]) -> Vec<PlayerId> {
    match trophy.category {
        TrophyCategory::HighestFace => {
            let suit = trophy.card.suit();
            best_by(jests, |jest| suited_in(jest, suit).max())
        }
        TrophyCategory::LowestFace => {
            let suit = trophy.card.suit();
            // Negate so the lowest face ranks best.
            best_by(jests, |jest| suited_in(jest, suit).min().map(|v| -v))
        }
        TrophyCategory::MajorityFaceValue => {
            let Some(face) = trophy.card.face().or_else(|| most_common_face(jests)) else {
                return Vec::new();
            };
            best_by(jests, |jest| {
                let n = jest.iter().filter(|c| c.face() == Some(face)).count() as i32;
                (n > 0).then_some(n)
            })
        }
        TrophyCategory::Joker => (0..jests.len())
            .filter(|&p| jests[p].iter().any(Card::is_joker))
            .collect(),
        TrophyCategory::BestJest => best_by(jests, |jest| Some(score_jest(jest).total)),
        TrophyCategory::BestJestWithoutJoker => best_by(jests, |jest| {
            (!jest.iter().any(Card::is_joker)).then(|| score_jest(jest).total)
        }),
    }
}

fn suited_in<'a>(jest: &'a [Card], suit: Option<Suit>) -> impl Iterator<Item = i32> + 'a {
    jest.iter()
        .filter(move |c| matches!(c, Card::Suited { .. }) && (suit.is_none() || c.suit() == suit))
        .map(|c| i32::from(c.face_value()))
}

fn most_common_face(jests: &[&[Card]]) -> Option<Face> {
    Face::ALL
        .iter()
        .rev()
        .map(|&face| {
            let n = jests
                .iter()
                .flat_map(|jest| jest.iter())
                .filter(|c| c.face() == Some(face))
                .count();
            (face, n)
        })
        .filter(|&(_, n)| n > 0)
        // High to low: a lower face needs a strictly larger count.
        .fold(None, |best: Option<(Face, usize)>, (face, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((face, n)),
        })
        .map(|(face, _)| face)
}

/// All players whose metric equals the maximum; players with `None` are out.
fn best_by<F>(jests: &[&[Card]], metric: F) -> Vec<PlayerId>
where
    F: Fn(&[Card]) -> Option<i32>,
{
    let values: Vec<Option<i32>> = jests.iter().map(|jest| metric(jest)).collect();
    let Some(best) = values.iter().flatten().max().copied() else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == Some(best))
        .map(|(p, _)| p)
        .collect()
}
