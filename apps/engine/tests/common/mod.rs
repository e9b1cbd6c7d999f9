#![allow(dead_code)]

use jest_engine::ai::AiConfig;
use jest_engine::domain::{ExtensionKind, StrategyType};
use jest_engine::{Game, GameConfig, Providers};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

pub const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

/// A game of scripted players cycling through the three strategies.
pub fn scripted_game(players: usize, seed: u64, extensions: Vec<ExtensionKind>) -> Game {
    let config = GameConfig {
        extensions,
        ..GameConfig::seeded(seed)
    };
    let mut game = Game::new(config);
    for (i, name) in NAMES[..players].iter().enumerate() {
        let strategy = StrategyType::ALL[i % StrategyType::ALL.len()];
        game.add_virtual(name, strategy).unwrap();
    }
    game
}

pub fn scripted_providers(game: &Game, seed: u64) -> Providers {
    Providers::scripted(game, &AiConfig::with_seed(seed))
}

/// Cards accounted for anywhere in the game.
pub fn card_total(game: &Game) -> usize {
    game.total_cards()
}
