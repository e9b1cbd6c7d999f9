//! Game flow orchestration - drives rounds and games through decision providers.
//!
//! The engine itself never blocks; this layer asks one provider for one
//! decision at a time, validates it against the round, and applies it.

mod orchestration;
mod player_actions;
mod round_lifecycle;

use std::collections::HashMap;

pub use orchestration::{play_game, GameOutcome};
pub use round_lifecycle::{drive_round, play_round, resume_round, RoundReport};
use thiserror::Error;

use crate::ai::{create_ai, AiConfig, AiError, DecisionProvider};
use crate::domain::{Game, PlayerKind};
use crate::errors::domain::DomainError;
use crate::persistence::StoreError;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no decision provider for player {0}")]
    MissingProvider(String),
}

/// Decision providers keyed by player name.
#[derive(Default)]
pub struct Providers {
    by_name: HashMap<String, Box<dyn DecisionProvider>>,
}

impl Providers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry providers for every scripted player of `game`. Seats get
    /// distinct seeds derived from `config.seed`. Humans must be added with
    /// [`Providers::insert`].
    pub fn scripted(game: &Game, config: &AiConfig) -> Self {
        let mut providers = Self::new();
        for (seat, player) in game.players().iter().enumerate() {
            let PlayerKind::Virtual(strategy) = player.kind() else {
                continue;
            };
            let seat_config = config.seed().map(|seed| {
                serde_json::json!({ "seed": seed.wrapping_add(seat as u64) })
            });
            if let Some(provider) = create_ai(strategy, seat_config.as_ref()) {
                providers.insert(player.name(), provider);
            }
        }
        providers
    }

    pub fn insert(&mut self, name: &str, provider: Box<dyn DecisionProvider>) {
        self.by_name.insert(name.to_string(), provider);
    }

    pub fn get(&self, name: &str) -> Result<&dyn DecisionProvider, FlowError> {
        self.by_name
            .get(name)
            .map(|p| p.as_ref())
            .ok_or_else(|| FlowError::MissingProvider(name.to_string()))
    }

    /// Fails on the first player of `game` without a provider.
    pub fn check_complete(&self, game: &Game) -> Result<(), FlowError> {
        for player in game.players() {
            self.get(player.name())?;
        }
        Ok(())
    }

    pub(crate) fn all(&self) -> impl Iterator<Item = &dyn DecisionProvider> + '_ {
        self.by_name.values().map(|p| p.as_ref())
    }
}
