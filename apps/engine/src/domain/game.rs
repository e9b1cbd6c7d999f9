//! Game session: player roster, shared deck, trophies and the round counter.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::cards_types::Card;
use super::deck::Deck;
use super::offer::Side;
use super::player::{find_by_name, Player, PlayerId, PlayerKind, StrategyType, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use super::round::{ClaimOutcome, Round};
use super::scoring::{score_jest, ScoreBreakdown};
use super::trophies::{assign_trophies, trophy_count_for, Trophy, TrophyAward};
use crate::config::GameConfig;
use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Players may still join.
    Setup,
    /// Deck shuffled and trophies set aside; rounds may be played.
    InProgress,
    /// Scores and trophies are final.
    Finished,
}

/// Final standing of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player: PlayerId,
    pub name: String,
    pub breakdown: ScoreBreakdown,
    pub trophy_points: i32,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub scores: Vec<PlayerScore>,
    pub awards: Vec<TrophyAward>,
    /// Co-winners in player order.
    pub winners: Vec<PlayerId>,
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    status: GameStatus,
    players: Vec<Player>,
    deck: Deck,
    trophies: Vec<Trophy>,
    round_counter: u32,
    rng: ChaCha8Rng,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            config,
            status: GameStatus::Setup,
            players: Vec::new(),
            deck: Deck::default(),
            trophies: Vec::new(),
            round_counter: 0,
            rng,
        }
    }

    /// Reassemble a started game from restored parts.
    pub(crate) fn from_parts(
        config: GameConfig,
        players: Vec<Player>,
        deck: Deck,
        trophies: Vec<Trophy>,
        round_counter: u32,
    ) -> Self {
        let mut game = Self::new(config);
        game.status = GameStatus::InProgress;
        game.players = players;
        game.deck = deck;
        game.trophies = trophies;
        game.round_counter = round_counter;
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_id(&self, name: &str) -> Option<PlayerId> {
        find_by_name(&self.players, name)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn trophies(&self) -> &[Trophy] {
        &self.trophies
    }

    /// Number of rounds successfully dealt so far.
    pub fn round_counter(&self) -> u32 {
        self.round_counter
    }

    /// Every card the game is tracking, wherever it currently sits.
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.trophies.len()
            + self.players.iter().map(Player::card_count).sum::<usize>()
    }

    pub fn add_human(&mut self, name: &str) -> Result<PlayerId, DomainError> {
        self.add_player(name, PlayerKind::Human)
    }

    pub fn add_virtual(&mut self, name: &str, strategy: StrategyType) -> Result<PlayerId, DomainError> {
        self.add_player(name, PlayerKind::Virtual(strategy))
    }

    fn add_player(&mut self, name: &str, kind: PlayerKind) -> Result<PlayerId, DomainError> {
        if self.status != GameStatus::Setup {
            return Err(DomainError::illegal("add_player", self.status));
        }
        let player = Player::new(name, kind)?;
        if self.player_id(player.name()).is_some() {
            return Err(DomainError::DuplicatePlayerName(player.name().to_string()));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(DomainError::PlayerCount(self.players.len() + 1));
        }
        debug!(player = player.name(), ?kind, "player joined");
        self.players.push(player);
        Ok(self.players.len() - 1)
    }

    /// Build and shuffle the deck, then set the trophies aside.
    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.status != GameStatus::Setup {
            return Err(DomainError::illegal("start", self.status));
        }
        let n = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(DomainError::PlayerCount(n));
        }
        let mut deck = Deck::standard(&self.config.extensions);
        deck.shuffle(&mut self.rng);
        self.trophies = deck.choose_trophies(trophy_count_for(n))?;
        self.deck = deck;
        self.status = GameStatus::InProgress;
        info!(
            players = n,
            deck = self.deck.len(),
            trophies = self.trophies.len(),
            "game started"
        );
        Ok(())
    }

    /// True once the deck cannot cover a full deal.
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Finished
            || (self.status == GameStatus::InProgress
                && self.deck.len() < self.players.len() * HAND_SIZE)
    }

    /// Open the next round and deal it. The round counter advances only when
    /// the deal succeeds.
    pub fn begin_round(&mut self) -> Result<Round, DomainError> {
        if self.status != GameStatus::InProgress {
            return Err(DomainError::illegal("begin_round", self.status));
        }
        let mut round = Round::new(self.round_counter + 1, self.config.choosing);
        self.deal_round(&mut round)?;
        Ok(round)
    }

    /// Deal a round that is still waiting for its cards.
    pub fn deal_round(&mut self, round: &mut Round) -> Result<(), DomainError> {
        round.deal(&mut self.players, &mut self.deck)?;
        self.round_counter = self.round_counter.max(round.round_no());
        Ok(())
    }

    pub fn make_offer(&mut self, round: &mut Round, who: PlayerId, face_up_index: usize) -> Result<(), DomainError> {
        round.make_offer(&mut self.players, who, face_up_index)
    }

    pub fn determine_starter(&mut self, round: &mut Round) -> Result<PlayerId, DomainError> {
        round.determine_starter(&self.players)
    }

    pub fn legal_targets(&self, round: &Round, who: PlayerId) -> Vec<PlayerId> {
        round.legal_targets(&self.players, who)
    }

    pub fn claim(
        &mut self,
        round: &mut Round,
        who: PlayerId,
        owner: PlayerId,
        side: Side,
    ) -> Result<ClaimOutcome, DomainError> {
        round.claim(&mut self.players, who, owner, side)
    }

    pub fn return_remainder(&mut self, round: &mut Round) -> Result<usize, DomainError> {
        round.return_remainder(&mut self.players, &mut self.deck)
    }

    /// Adjudicate trophies and settle final scores.
    pub fn finish(&mut self) -> Result<GameResult, DomainError> {
        if self.status != GameStatus::InProgress {
            return Err(DomainError::illegal("finish", self.status));
        }
        if self.players.iter().any(|p| p.offer().is_some() || !p.hand().is_empty()) {
            warn!("finishing with cards still in hands or offers");
        }

        let awards = {
            let jests: Vec<&[Card]> = self.players.iter().map(|p| p.jest().cards()).collect();
            assign_trophies(&jests, &self.trophies)
        };

        let mut scores = Vec::with_capacity(self.players.len());
        for (id, player) in self.players.iter_mut().enumerate() {
            let breakdown = score_jest(player.jest().cards());
            let trophy_points: i32 = awards
                .iter()
                .flat_map(|a| a.winners.iter())
                .filter(|w| w.player == id)
                .map(|w| w.points)
                .sum();
            let total = breakdown.total + trophy_points;
            player.set_score(total);
            scores.push(PlayerScore {
                player: id,
                name: player.name().to_string(),
                breakdown,
                trophy_points,
                total,
            });
        }

        let totals: Vec<i32> = scores.iter().map(|s| s.total).collect();
        let winners = winners_of(&totals);
        self.status = GameStatus::Finished;
        info!(
            rounds = self.round_counter,
            winners = ?winners.iter().map(|&w| self.players[w].name()).collect::<Vec<_>>(),
            "game finished"
        );
        Ok(GameResult {
            scores,
            awards,
            winners,
        })
    }

    /// Names of every player sharing the highest score, in player order.
    pub fn winners(&self) -> Vec<&str> {
        let totals: Vec<i32> = self.players.iter().map(Player::score).collect();
        winners_of(&totals)
            .into_iter()
            .map(|p| self.players[p].name())
            .collect()
    }
}

/// Indices of all entries equal to the maximum, ascending.
pub fn winners_of(scores: &[i32]) -> Vec<PlayerId> {
    let Some(&best) = scores.iter().max() else {
        return Vec::new();
    };
    scores
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == best)
        .map(|(p, _)| p)
        .collect()
}
