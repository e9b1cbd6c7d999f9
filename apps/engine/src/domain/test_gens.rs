// Proptest generators and table drivers for domain tests.

use proptest::prelude::*;

use crate::config::GameConfig;
use crate::domain::{
    ChoosingRules, ExtensionKind, Game, Round, RoundPhase, SelfClaimPolicy, Side, StrategyType,
    TurnOrder,
};

pub const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

pub fn player_count() -> impl Strategy<Value = usize> {
    3usize..=4
}

pub fn choosing_rules() -> impl Strategy<Value = ChoosingRules> {
    (
        prop_oneof![Just(SelfClaimPolicy::LastResort), Just(SelfClaimPolicy::Never)],
        prop_oneof![Just(TurnOrder::RoundOrder), Just(TurnOrder::VictimNext)],
    )
        .prop_map(|(self_claim, turn_order)| ChoosingRules {
            self_claim,
            turn_order,
        })
}

pub fn extensions() -> impl Strategy<Value = Vec<ExtensionKind>> {
    proptest::sample::subsequence(ExtensionKind::ALL.to_vec(), 0..=ExtensionKind::ALL.len())
}

/// Raw choice material; drivers reduce each entry modulo the options on offer.
pub fn picks() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 16..64)
}

/// A started game with `n` scripted players.
pub fn started_game(
    n: usize,
    seed: u64,
    choosing: ChoosingRules,
    extensions: Vec<ExtensionKind>,
) -> Game {
    let config = GameConfig {
        seed: Some(seed),
        extensions,
        choosing,
        ..GameConfig::default()
    };
    let mut game = Game::new(config);
    for name in &NAMES[..n] {
        game.add_virtual(name, StrategyType::Random).unwrap();
    }
    game.start().unwrap();
    game
}

/// Cycles through `picks`, never running dry.
pub struct Picker<'a> {
    picks: &'a [u8],
    at: usize,
}

impl<'a> Picker<'a> {
    pub fn new(picks: &'a [u8]) -> Self {
        Self { picks, at: 0 }
    }

    pub fn next(&mut self, options: usize) -> usize {
        let raw = self.picks.get(self.at % self.picks.len().max(1)).copied().unwrap_or(0);
        self.at += 1;
        raw as usize % options.max(1)
    }
}

/// Offers from every player plus the starter.
pub fn offer_all(game: &mut Game, round: &mut Round, picker: &mut Picker<'_>) {
    for who in 0..game.players().len() {
        let idx = picker.next(2);
        game.make_offer(round, who, idx).unwrap();
    }
    game.determine_starter(round).unwrap();
}

/// Claim until CHOOSE ends or `max_claims` is reached; returns claims made.
pub fn claim_until(
    game: &mut Game,
    round: &mut Round,
    picker: &mut Picker<'_>,
    max_claims: usize,
) -> usize {
    let mut claims = 0;
    while claims < max_claims && round.phase() == RoundPhase::Choosing {
        let who = round.to_act().unwrap();
        let targets = game.legal_targets(round, who);
        let owner = targets[picker.next(targets.len())];
        let side = if picker.next(2) == 0 {
            Side::FaceUp
        } else {
            Side::FaceDown
        };
        game.claim(round, who, owner, side).unwrap();
        claims += 1;
    }
    claims
}

/// A whole round from deal to END.
pub fn play_full_round(game: &mut Game, picker: &mut Picker<'_>) -> (Round, usize) {
    let mut round = game.begin_round().unwrap();
    offer_all(game, &mut round, picker);
    let claims = claim_until(game, &mut round, picker, usize::MAX);
    game.return_remainder(&mut round).unwrap();
    (round, claims)
}
