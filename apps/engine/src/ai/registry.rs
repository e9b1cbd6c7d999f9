//! Registered decision providers, one per scripted strategy.
//!
//! Keep `name` and `version` stable; the same seed must give the same play.

use crate::ai::{DecisionProvider, HeuristicPlayer, RandomPlayer};
use crate::domain::StrategyType;

/// Factory definition for constructing providers.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub strategy: StrategyType,
    pub make: fn(seed: Option<u64>) -> Box<dyn DecisionProvider>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        strategy: StrategyType::Random,
        make: make_random_player,
    },
    AiFactory {
        name: HeuristicPlayer::AGGRESSIVE,
        version: HeuristicPlayer::VERSION,
        strategy: StrategyType::Aggressive,
        make: make_aggressive,
    },
    AiFactory {
        name: HeuristicPlayer::CAUTIOUS,
        version: HeuristicPlayer::VERSION,
        strategy: StrategyType::Cautious,
        make: make_cautious,
    },
];

/// Returns the statically registered factories.
pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Finds a registered factory by its name.
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|factory| factory.name == name)
}

/// Finds the factory playing `strategy`.
pub fn for_strategy(strategy: StrategyType) -> Option<&'static AiFactory> {
    registered_ais()
        .iter()
        .find(|factory| factory.strategy == strategy)
}

fn make_random_player(seed: Option<u64>) -> Box<dyn DecisionProvider> {
    Box::new(RandomPlayer::new(seed))
}

fn make_aggressive(seed: Option<u64>) -> Box<dyn DecisionProvider> {
    Box::new(HeuristicPlayer::aggressive(seed))
}

fn make_cautious(seed: Option<u64>) -> Box<dyn DecisionProvider> {
    Box::new(HeuristicPlayer::cautious(seed))
}
