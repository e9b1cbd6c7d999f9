//! Game-level loop: rounds until the deck runs dry, then scoring.

use tracing::{info, warn};

use super::round_lifecycle::{play_round, RoundReport};
use super::{FlowError, Providers};
use crate::domain::player::HAND_SIZE;
use crate::domain::snapshot::snapshot_game;
use crate::domain::{Game, GameResult, GameStatus};
use crate::errors::domain::{DomainError, ErrorClass};
use crate::persistence::{Snapshot, SnapshotStore};

#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub result: GameResult,
    pub rounds: Vec<RoundReport>,
    /// Ids of the autosaves written after each round.
    pub saved: Vec<String>,
}

/// Play a game to the end, autosaving after every round when a store is given.
pub fn play_game(
    game: &mut Game,
    providers: &Providers,
    mut store: Option<&mut dyn SnapshotStore>,
) -> Result<GameOutcome, FlowError> {
    if game.status() == GameStatus::Setup {
        game.start()?;
    }
    providers.check_complete(game)?;

    let mut rounds = Vec::new();
    let mut saved = Vec::new();
    loop {
        if game.is_over() {
            notify_exhausted(game, providers);
            break;
        }
        let report = match play_round(game, providers) {
            Ok(report) => report,
            Err(FlowError::Domain(e)) if e.class() == ErrorClass::Exhausted => {
                warn!(error = %e, "deck exhausted mid-game");
                notify_exhausted(game, providers);
                break;
            }
            Err(e) => return Err(e),
        };
        rounds.push(report);

        if let Some(store) = store.as_deref_mut() {
            let id = store.write_snapshot(&Snapshot::Game(snapshot_game(game)))?;
            saved.push(id);
        }
    }

    let result = game.finish()?;
    info!(rounds = rounds.len(), autosaves = saved.len(), "game over");
    Ok(GameOutcome {
        result,
        rounds,
        saved,
    })
}

fn notify_exhausted(game: &Game, providers: &Providers) {
    let needed = game.players().len() * HAND_SIZE;
    let available = game.deck().len();
    info!(
        error = %DomainError::InsufficientCards { needed, available },
        "no full deal left"
    );
    for player in game.players() {
        if let Ok(provider) = providers.get(player.name()) {
            provider.on_insufficient_cards(player.name(), needed, available);
        }
    }
}
