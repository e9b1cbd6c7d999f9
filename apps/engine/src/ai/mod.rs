//! Decision providers - scripted players and the seam for human input.
//!
//! - `DecisionProvider`: one decision at a time, validated by the engine
//! - `RandomPlayer`: uniform legal choices (seedable)
//! - `HeuristicPlayer`: aggressive and cautious styles
//! - `registry`: factories by name or strategy

pub mod config;
mod heuristic;
mod random;
pub mod registry;
mod trait_def;

pub use config::AiConfig;
pub use heuristic::HeuristicPlayer;
pub use random::RandomPlayer;
use serde_json::Value as JsonValue;
pub use trait_def::{AiError, DecisionProvider};

use crate::domain::StrategyType;

/// Build the provider for a scripted strategy, seeded from `config`.
pub fn create_ai(strategy: StrategyType, config: Option<&JsonValue>) -> Option<Box<dyn DecisionProvider>> {
    let seed = AiConfig::from_json(config).seed();
    registry::for_strategy(strategy).map(|factory| (factory.make)(seed))
}
