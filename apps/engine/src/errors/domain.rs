//! Domain-level error type used by the round engine, scoring, and snapshots.
//!
//! Every variant belongs to exactly one [`ErrorClass`]. Presentation layers
//! should branch on the class (re-prompt, end game, abort round) and show the
//! `Display` text to the user.

use thiserror::Error;

/// Coarse error taxonomy callers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Game-rule violation; caller re-prompts or chooses differently.
    Rule,
    /// Shared deck exhausted; the game-level loop ends the game.
    Exhausted,
    /// Operation invoked in the wrong round phase; an integration defect.
    IllegalTransition,
    /// Snapshot is malformed or cannot rebuild the player set.
    Persistence,
    /// Invalid configuration value.
    Config,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("out of turn: {player} cannot act now")]
    OutOfTurn { player: String },
    #[error("{player} may not claim from their own offer")]
    SelfClaim { player: String },
    #[error("offer of {owner} is not open")]
    OfferNotOpen { owner: String },
    #[error("{player} has already made an offer this round")]
    AlreadyOffered { player: String },
    #[error("hand index {index} out of range for a hand of {len} cards")]
    InvalidHandIndex { index: usize, len: usize },
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    #[error("player name already taken: {0}")]
    DuplicatePlayerName(String),
    #[error("invalid player name: {0:?}")]
    InvalidPlayerName(String),
    #[error("a game needs 3 or 4 players, got {0}")]
    PlayerCount(usize),

    #[error("the deck is empty")]
    EmptyDeck,
    #[error("insufficient cards: {needed} needed, {available} available")]
    InsufficientCards { needed: usize, available: usize },

    #[error("illegal state transition: {op} during {phase}")]
    IllegalStateTransition { op: &'static str, phase: String },

    #[error("snapshot error: {0}")]
    Snapshot(String),
    #[error("parse card: {0}")]
    ParseCard(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn class(&self) -> ErrorClass {
        match self {
            DomainError::OutOfTurn { .. }
            | DomainError::SelfClaim { .. }
            | DomainError::OfferNotOpen { .. }
            | DomainError::AlreadyOffered { .. }
            | DomainError::InvalidHandIndex { .. }
            | DomainError::UnknownPlayer(_)
            | DomainError::DuplicatePlayerName(_)
            | DomainError::InvalidPlayerName(_)
            | DomainError::PlayerCount(_) => ErrorClass::Rule,
            DomainError::EmptyDeck | DomainError::InsufficientCards { .. } => {
                ErrorClass::Exhausted
            }
            DomainError::IllegalStateTransition { .. } => ErrorClass::IllegalTransition,
            DomainError::Snapshot(_) | DomainError::ParseCard(_) => ErrorClass::Persistence,
            DomainError::Config(_) => ErrorClass::Config,
        }
    }

    pub fn illegal(op: &'static str, phase: impl std::fmt::Debug) -> Self {
        Self::IllegalStateTransition {
            op,
            phase: format!("{phase:?}"),
        }
    }

    pub fn snapshot(detail: impl Into<String>) -> Self {
        Self::Snapshot(detail.into())
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }
}
