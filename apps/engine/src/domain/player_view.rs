//! Public view of the table for presentation layers and decision providers.
//!
//! Face-down cards never appear here; only their presence does.

use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::game::Game;
use super::offer::Offer;
use super::player::{PlayerId, PlayerKind, StrategyType};
use super::round::{Round, RoundPhase};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferPublic {
    pub owner: PlayerId,
    pub face_up: Option<Card>,
    pub has_face_down: bool,
    pub open: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub seat: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub jest: Vec<Card>,
    pub hand_size: usize,
    pub score: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePublic {
    pub round_no: u32,
    pub phase: RoundPhase,
    pub deck_size: usize,
    pub players: Vec<PlayerPublic>,
    /// Offers are hidden until every player has committed one.
    pub offers: Vec<OfferPublic>,
    pub to_act: Option<PlayerId>,
    pub already_acted: Vec<PlayerId>,
}

impl TablePublic {
    pub fn offer_of(&self, owner: PlayerId) -> Option<&OfferPublic> {
        self.offers.iter().find(|o| o.owner == owner)
    }
}

pub fn table_view(game: &Game, round: &Round) -> TablePublic {
    let players = game
        .players()
        .iter()
        .enumerate()
        .map(|(seat, p)| PlayerPublic {
            seat,
            name: p.name().to_string(),
            kind: p.kind(),
            jest: p.jest().cards().to_vec(),
            hand_size: p.hand().len(),
            score: p.score(),
        })
        .collect();

    let revealed = !matches!(round.phase(), RoundPhase::Dealing | RoundPhase::Offering);
    let offers = if revealed {
        game.players()
            .iter()
            .enumerate()
            .filter_map(|(owner, p)| {
                p.offer().map(|o| OfferPublic {
                    owner,
                    face_up: o.face_up(),
                    has_face_down: o.face_down().is_some(),
                    open: o.is_open(),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    TablePublic {
        round_no: round.round_no(),
        phase: round.phase(),
        deck_size: game.deck().len(),
        players,
        offers,
        to_act: round.to_act(),
        already_acted: round.already_acted().to_vec(),
    }
}

/// Everything one player may know when asked for a decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionView {
    pub me: PlayerId,
    pub strategy: Option<StrategyType>,
    pub hand: Vec<Card>,
    pub jest: Vec<Card>,
    pub table: TablePublic,
    /// Owners whose offers `me` may claim from right now.
    pub legal_targets: Vec<PlayerId>,
    /// Cards `me` cannot see (deck, trophies, face-down cards of other
    /// offers), sorted so their order reveals nothing.
    pub unseen: Vec<Card>,
}

impl DecisionView {
    pub fn legal_targets(&self) -> &[PlayerId] {
        &self.legal_targets
    }

    /// Face-up card of `owner`'s offer, if still there.
    pub fn face_up_of(&self, owner: PlayerId) -> Option<Card> {
        self.table.offer_of(owner).and_then(|o| o.face_up)
    }

    pub fn has_face_down(&self, owner: PlayerId) -> bool {
        self.table.offer_of(owner).is_some_and(|o| o.has_face_down)
    }
}

pub fn decision_view(game: &Game, round: &Round, me: PlayerId) -> DecisionView {
    let table = table_view(game, round);
    let player = game.player(me);

    // Until every offer is in, other players' hands and face-up cards are
    // hidden as well.
    let offers_hidden = table.offers.is_empty();
    let mut unseen: Vec<Card> = game.deck().cards().copied().collect();
    unseen.extend(game.trophies().iter().map(|t| t.card));
    for (owner, p) in game.players().iter().enumerate() {
        if owner == me {
            continue;
        }
        unseen.extend(p.offer().and_then(Offer::face_down));
        if offers_hidden {
            unseen.extend_from_slice(p.hand());
            unseen.extend(p.offer().and_then(Offer::face_up));
        }
    }
    unseen.sort();

    DecisionView {
        me,
        strategy: player.and_then(|p| p.strategy()),
        hand: player.map(|p| p.hand().to_vec()).unwrap_or_default(),
        jest: player.map(|p| p.jest().cards().to_vec()).unwrap_or_default(),
        table,
        legal_targets: game.legal_targets(round, me),
        unseen,
    }
}
