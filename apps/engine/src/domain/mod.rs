//! Domain layer: cards, the round engine, scoring and snapshots.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod extensions;
pub mod game;
pub mod offer;
pub mod player;
pub mod player_view;
pub mod round;
pub mod scoring;
pub mod snapshot;
pub mod trophies;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_conservation;
#[cfg(test)]
mod tests_props_snapshot;
#[cfg(test)]
mod tests_round;
#[cfg(test)]
mod tests_trophies;

// Re-exports for ergonomics
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, Face, Suit};
pub use deck::Deck;
pub use extensions::{Effect, ExtensionKind};
pub use game::{winners_of, Game, GameResult, GameStatus, PlayerScore};
pub use offer::{Offer, Side};
pub use player::{Jest, Player, PlayerId, PlayerKind, StrategyType};
pub use player_view::{decision_view, table_view, DecisionView, OfferPublic, PlayerPublic, TablePublic};
pub use round::{ChoosingRules, ClaimOutcome, Round, RoundPhase, SelfClaimPolicy, TurnOrder};
pub use scoring::{marginal_score, score_jest, CardVisitor, ScoreBreakdown, ScoreVisitor};
pub use snapshot::{
    restore_game, restore_round, snapshot_game, snapshot_round, GameSnapshot, LoadedRound,
    RoundSnapshot,
};
pub use trophies::{assign_trophies, Trophy, TrophyAward, TrophyCategory, TrophyWinner};
