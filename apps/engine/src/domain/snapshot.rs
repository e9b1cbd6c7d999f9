//! Serializable session snapshots keyed by player name.
//!
//! Live state refers to players by seat; snapshots only ever store names so
//! they survive a process restart. Restore resolves every name against the
//! rebuilt roster and drops (with a warning) what it cannot resolve.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cards_types::Card;
use super::deck::Deck;
use super::game::Game;
use super::offer::Offer;
use super::player::{find_by_name, Player, PlayerId, PlayerKind, StrategyType, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use super::round::{ChoosingRules, Round, RoundPhase};
use super::trophies::Trophy;
use crate::config::GameConfig;
use crate::errors::domain::DomainError;

/// Per-player persistent facts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub human: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyType>,
    pub jest: Vec<Card>,
    pub score: i32,
}

/// Completed-round (between rounds) session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<PlayerRecord>,
    pub deck: Vec<Card>,
    pub trophies: Vec<Trophy>,
    pub round_counter: u32,
    #[serde(default)]
    pub rules: ChoosingRules,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    pub player: String,
    pub cards: Vec<Card>,
}

/// An offer by owner name; a claimed side is `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub owner: String,
    pub face_up: Option<Card>,
    pub face_down: Option<Card>,
}

/// In-progress round on top of the session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    #[serde(flatten)]
    pub game: GameSnapshot,
    pub round_no: u32,
    pub phase: RoundPhase,
    pub hands: Vec<HandRecord>,
    pub offers: Vec<OfferRecord>,
    pub acted: Vec<String>,
    pub current: Option<String>,
    #[serde(default)]
    pub starter: Option<String>,
}

/// A restored mid-round session.
#[derive(Debug, Clone)]
pub struct LoadedRound {
    pub game: Game,
    pub round: Round,
}

pub fn snapshot_game(game: &Game) -> GameSnapshot {
    let players = game
        .players()
        .iter()
        .map(|p| PlayerRecord {
            name: p.name().to_string(),
            human: p.is_human(),
            strategy: p.strategy(),
            jest: p.jest().cards().to_vec(),
            score: p.score(),
        })
        .collect();
    GameSnapshot {
        players,
        deck: game.deck().cards().copied().collect(),
        trophies: game.trophies().to_vec(),
        round_counter: game.round_counter(),
        rules: game.config().choosing,
    }
}

pub fn snapshot_round(game: &Game, round: &Round) -> RoundSnapshot {
    let players = game.players();
    let name_of = |id: PlayerId| players.get(id).map(|p| p.name().to_string());

    let hands = players
        .iter()
        .filter(|p| !p.hand().is_empty())
        .map(|p| HandRecord {
            player: p.name().to_string(),
            cards: p.hand().to_vec(),
        })
        .collect();
    let offers = players
        .iter()
        .filter_map(|p| {
            p.offer().map(|o| OfferRecord {
                owner: p.name().to_string(),
                face_up: o.face_up(),
                face_down: o.face_down(),
            })
        })
        .collect();

    RoundSnapshot {
        game: snapshot_game(game),
        round_no: round.round_no(),
        phase: round.phase(),
        hands,
        offers,
        acted: round.already_acted().iter().filter_map(|&p| name_of(p)).collect(),
        current: round.to_act().and_then(name_of),
        starter: round.starter().and_then(name_of),
    }
}

/// Rebuild the roster, deck, trophies and round counter, in that order.
pub fn restore_game(snapshot: &GameSnapshot) -> Result<Game, DomainError> {
    let n = snapshot.players.len();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
        return Err(DomainError::snapshot(format!(
            "cannot rebuild a game of {n} players"
        )));
    }

    let mut players: Vec<Player> = Vec::with_capacity(n);
    for record in &snapshot.players {
        let kind = match (record.human, record.strategy) {
            (true, _) => PlayerKind::Human,
            (false, Some(strategy)) => PlayerKind::Virtual(strategy),
            (false, None) => {
                warn!(player = %record.name, "virtual player without strategy, using random");
                PlayerKind::Virtual(StrategyType::Random)
            }
        };
        let mut player = Player::new(&record.name, kind)
            .map_err(|e| DomainError::snapshot(e.to_string()))?;
        if find_by_name(&players, player.name()).is_some() {
            return Err(DomainError::snapshot(format!(
                "duplicate player name {}",
                player.name()
            )));
        }
        for &card in &record.jest {
            player.jest_mut().add(card);
        }
        player.set_score(record.score);
        players.push(player);
    }

    let deck = Deck::from_cards(snapshot.deck.iter().copied());
    let config = GameConfig {
        choosing: snapshot.rules,
        ..GameConfig::default()
    };
    debug!(players = n, deck = deck.len(), round_counter = snapshot.round_counter, "game restored");
    Ok(Game::from_parts(
        config,
        players,
        deck,
        snapshot.trophies.clone(),
        snapshot.round_counter,
    ))
}

/// Layer hands, offers and turn state over [`restore_game`].
pub fn restore_round(snapshot: &RoundSnapshot) -> Result<LoadedRound, DomainError> {
    let mut game = restore_game(&snapshot.game)?;

    let resolve = |players: &[Player], name: &str, what: &str| -> Option<PlayerId> {
        let found = find_by_name(players, name);
        if found.is_none() {
            warn!(player = name, what, "dropping unresolved name from snapshot");
        }
        found
    };

    {
        let players = game.players_mut();
        for hand in &snapshot.hands {
            let Some(id) = resolve(&*players, &hand.player, "hand") else {
                continue;
            };
            if hand.cards.len() > HAND_SIZE {
                return Err(DomainError::snapshot(format!(
                    "hand of {} holds {} cards",
                    hand.player,
                    hand.cards.len()
                )));
            }
            players[id].set_hand(hand.cards.clone());
        }
        for offer in &snapshot.offers {
            let Some(id) = resolve(&*players, &offer.owner, "offer") else {
                continue;
            };
            players[id].set_offer(Some(Offer::from_slots(offer.face_up, offer.face_down)));
        }
    }

    let players = game.players();
    let acted: Vec<PlayerId> = snapshot
        .acted
        .iter()
        .filter_map(|name| resolve(players, name, "acted"))
        .collect();
    let current = snapshot
        .current
        .as_deref()
        .and_then(|name| resolve(players, name, "current"));
    let starter = snapshot
        .starter
        .as_deref()
        .and_then(|name| resolve(players, name, "starter"));

    let mut round = Round::resume(
        snapshot.round_no,
        snapshot.phase,
        snapshot.game.rules,
        starter,
        current,
        acted,
    );
    round.recover_turn(game.players());
    Ok(LoadedRound { game, round })
}
