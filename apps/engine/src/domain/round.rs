//! Per-round state machine.
//!
//! DEAL → OFFER → DETERMINE_STARTER → CHOOSE (repeated) → RETURN_REMAINDER → END
//!
//! `Round` owns only round-local bookkeeping (phase, turn, already-acted
//! order). Players and the deck belong to the game and are passed into each
//! operation, so the round can be snapshotted next to them at any boundary.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::cards_types::Card;
use super::deck::Deck;
use super::offer::{Offer, Side};
use super::player::{Player, PlayerId, HAND_SIZE};
use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// Waiting for two cards per player.
    Dealing,
    /// Collecting one offer per player.
    Offering,
    /// All offers committed; starter not yet known.
    DeterminingStarter,
    /// Claims in progress; `to_act` is the player expected to claim.
    Choosing,
    /// No further claims possible; remainders still sit in offers.
    ReturningRemainder,
    /// Round complete.
    Ended,
}

/// When a player may claim from their own offer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelfClaimPolicy {
    /// Only when it is the sole open offer left.
    #[default]
    LastResort,
    /// Never; a player with only their own offer left is skipped.
    Never,
}

/// Who acts after a claim.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurnOrder {
    /// Next player in round order who has not acted and has a legal target.
    #[default]
    RoundOrder,
    /// The owner of the claimed offer if they have not acted yet, otherwise
    /// the waiting player whose open offer shows the highest card.
    VictimNext,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct ChoosingRules {
    #[serde(default)]
    pub self_claim: SelfClaimPolicy,
    #[serde(default)]
    pub turn_order: TurnOrder,
}

/// Result of a claim, describing what state changes occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub actor: PlayerId,
    pub owner: PlayerId,
    pub side: Side,
    /// Card moved into the actor's jest.
    pub card: Card,
    /// Player expected to act next, if any.
    pub next: Option<PlayerId>,
    /// Phase transitioned to, if any (None means still choosing).
    pub phase_transitioned: Option<RoundPhase>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    round_no: u32,
    phase: RoundPhase,
    rules: ChoosingRules,
    starter: Option<PlayerId>,
    turn: Option<PlayerId>,
    acted: Vec<PlayerId>,
}

impl Round {
    pub fn new(round_no: u32, rules: ChoosingRules) -> Self {
        Self {
            round_no,
            phase: RoundPhase::Dealing,
            rules,
            starter: None,
            turn: None,
            acted: Vec::new(),
        }
    }

    /// Rebuild a round at an arbitrary sub-state (snapshot restore).
    pub(crate) fn resume(
        round_no: u32,
        phase: RoundPhase,
        rules: ChoosingRules,
        starter: Option<PlayerId>,
        turn: Option<PlayerId>,
        acted: Vec<PlayerId>,
    ) -> Self {
        Self {
            round_no,
            phase,
            rules,
            starter,
            turn,
            acted,
        }
    }

    /// Re-derive the player to act when a restored CHOOSE round lost it:
    /// the first waiting player in round order after the last claimant, or
    /// from the starter when nobody has claimed yet. With nobody waiting the
    /// round moves on to RETURN_REMAINDER.
    pub(crate) fn recover_turn(&mut self, players: &[Player]) -> Option<PlayerId> {
        if self.phase != RoundPhase::Choosing || self.turn.is_some() {
            return self.turn;
        }
        let waiting = self.waiting(players);
        let n = players.len();
        let start = match self.acted.last() {
            Some(&last) => last + 1,
            None => self.starter.unwrap_or(0),
        };
        self.turn = (0..n)
            .map(|step| (start + step) % n)
            .find(|p| waiting.contains(p));
        match self.turn {
            Some(p) => debug!(round_no = self.round_no, player = players[p].name(), "turn recovered"),
            None => {
                warn!(round_no = self.round_no, "no player can claim, ending choosing");
                self.phase = RoundPhase::ReturningRemainder;
            }
        }
        self.turn
    }

    pub fn round_no(&self) -> u32 {
        self.round_no
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn rules(&self) -> ChoosingRules {
        self.rules
    }

    pub fn starter(&self) -> Option<PlayerId> {
        self.starter
    }

    /// Player whose claim is expected; `None` outside CHOOSE.
    pub fn to_act(&self) -> Option<PlayerId> {
        self.turn
    }

    /// Players who have claimed this round, in claim order.
    pub fn already_acted(&self) -> &[PlayerId] {
        &self.acted
    }

    fn expect_phase(&self, op: &'static str, expected: RoundPhase) -> Result<(), DomainError> {
        if self.phase != expected {
            return Err(DomainError::illegal(op, self.phase));
        }
        Ok(())
    }

    /// Deal two cards to every player in round order. All-or-nothing: when
    /// the deck is short nothing is dealt and the phase does not change.
    pub fn deal(&mut self, players: &mut [Player], deck: &mut Deck) -> Result<(), DomainError> {
        self.expect_phase("deal", RoundPhase::Dealing)?;
        let needed = players.len() * HAND_SIZE;
        let cards = deck.deal_many(needed).inspect_err(|_| {
            warn!(round_no = self.round_no, needed, available = deck.len(), "deck cannot cover a full deal");
        })?;
        for (player, pair) in players.iter_mut().zip(cards.chunks(HAND_SIZE)) {
            for &card in pair {
                player.add_to_hand(card);
            }
        }
        self.phase = RoundPhase::Offering;
        debug!(round_no = self.round_no, dealt = needed, remaining = deck.len(), "cards dealt");
        Ok(())
    }

    /// Players who still have to commit an offer, in round order.
    pub fn pending_offers(&self, players: &[Player]) -> Vec<PlayerId> {
        if self.phase != RoundPhase::Offering {
            return Vec::new();
        }
        (0..players.len())
            .filter(|&p| players[p].offer().is_none())
            .collect()
    }

    /// Commit `who`'s offer, showing `hand[face_up_index]`. The hand is
    /// emptied into the offer.
    pub fn make_offer(
        &mut self,
        players: &mut [Player],
        who: PlayerId,
        face_up_index: usize,
    ) -> Result<(), DomainError> {
        self.expect_phase("make_offer", RoundPhase::Offering)?;
        let player = seat_mut(players, who)?;
        if player.offer().is_some() {
            return Err(DomainError::AlreadyOffered {
                player: player.name().to_string(),
            });
        }
        let offer = Offer::from_hand(player.hand(), face_up_index)?;
        player.take_hand();
        player.set_offer(Some(offer));
        debug!(round_no = self.round_no, player = players[who].name(), "offer committed");

        if players.iter().all(|p| p.offer().is_some()) {
            self.phase = RoundPhase::DeterminingStarter;
        }
        Ok(())
    }

    /// The player whose face-up card has the highest (face, suit strength)
    /// key starts; ties go to the first such player in round order.
    pub fn determine_starter(&mut self, players: &[Player]) -> Result<PlayerId, DomainError> {
        self.expect_phase("determine_starter", RoundPhase::DeterminingStarter)?;
        let mut best: Option<(PlayerId, (u8, u8))> = None;
        for (p, player) in players.iter().enumerate() {
            let Some(card) = player.offer().and_then(Offer::face_up) else {
                continue;
            };
            let key = card.starter_key();
            if best.is_none_or(|(_, best_key)| key > best_key) {
                best = Some((p, key));
            }
        }
        let (starter, _) = best.ok_or_else(|| DomainError::illegal("determine_starter", self.phase))?;
        self.starter = Some(starter);
        self.turn = Some(starter);
        self.phase = RoundPhase::Choosing;
        info!(round_no = self.round_no, starter = players[starter].name(), "choosing phase starts");
        Ok(starter)
    }

    /// Owners of the offers `who` may claim from right now.
    pub fn legal_targets(&self, players: &[Player], who: PlayerId) -> Vec<PlayerId> {
        if self.phase != RoundPhase::Choosing || who >= players.len() {
            return Vec::new();
        }
        let others: Vec<PlayerId> = (0..players.len())
            .filter(|&p| p != who && players[p].has_open_offer())
            .collect();
        if others.is_empty()
            && self.rules.self_claim == SelfClaimPolicy::LastResort
            && players[who].has_open_offer()
        {
            return vec![who];
        }
        others
    }

    /// Open offers (owners) in round order.
    pub fn open_offers(&self, players: &[Player]) -> Vec<PlayerId> {
        if !matches!(
            self.phase,
            RoundPhase::DeterminingStarter | RoundPhase::Choosing
        ) {
            return Vec::new();
        }
        (0..players.len())
            .filter(|&p| players[p].has_open_offer())
            .collect()
    }

    /// `who` takes one side of `owner`'s open offer into their jest.
    pub fn claim(
        &mut self,
        players: &mut [Player],
        who: PlayerId,
        owner: PlayerId,
        side: Side,
    ) -> Result<ClaimOutcome, DomainError> {
        self.expect_phase("claim", RoundPhase::Choosing)?;
        let actor_name = seat_mut(players, who)?.name().to_string();
        if self.turn != Some(who) {
            return Err(DomainError::OutOfTurn { player: actor_name });
        }
        let owner_player = seat_mut(players, owner)?;
        if !owner_player.has_open_offer() {
            return Err(DomainError::OfferNotOpen {
                owner: owner_player.name().to_string(),
            });
        }
        if owner == who && !self.legal_targets(players, who).contains(&who) {
            return Err(DomainError::SelfClaim { player: actor_name });
        }

        let card = players[owner]
            .offer_mut()
            .and_then(|offer| offer.claim(side))
            .ok_or_else(|| DomainError::OfferNotOpen {
                owner: players[owner].name().to_string(),
            })?;
        players[who].jest_mut().add(card);
        self.acted.push(who);

        let next = self.next_turn(players, who, owner);
        self.turn = next;
        let phase_transitioned = if next.is_none() {
            self.phase = RoundPhase::ReturningRemainder;
            Some(RoundPhase::ReturningRemainder)
        } else {
            None
        };
        debug!(
            round_no = self.round_no,
            player = players[who].name(),
            target = players[owner].name(),
            ?side,
            "offer claimed"
        );

        Ok(ClaimOutcome {
            actor: who,
            owner,
            side,
            card,
            next,
            phase_transitioned,
        })
    }

    fn waiting(&self, players: &[Player]) -> Vec<PlayerId> {
        (0..players.len())
            .filter(|p| !self.acted.contains(p))
            .filter(|&p| !self.legal_targets(players, p).is_empty())
            .collect()
    }

    fn next_turn(&self, players: &[Player], who: PlayerId, owner: PlayerId) -> Option<PlayerId> {
        let waiting = self.waiting(players);
        let n = players.len();
        let in_round_order = (1..=n).map(|step| (who + step) % n);

        match self.rules.turn_order {
            TurnOrder::RoundOrder => in_round_order.into_iter().find(|p| waiting.contains(p)),
            TurnOrder::VictimNext => {
                if waiting.contains(&owner) {
                    return Some(owner);
                }
                let mut best: Option<(PlayerId, (u8, u8))> = None;
                for p in in_round_order.clone().filter(|p| waiting.contains(p)) {
                    let Some(card) = players[p]
                        .offer()
                        .filter(|o| o.is_open())
                        .and_then(Offer::face_up)
                    else {
                        continue;
                    };
                    let key = card.starter_key();
                    if best.is_none_or(|(_, best_key)| key > best_key) {
                        best = Some((p, key));
                    }
                }
                best.map(|(p, _)| p)
                    .or_else(|| in_round_order.into_iter().find(|p| waiting.contains(p)))
            }
        }
    }

    /// Hand every card still sitting in an offer back to the deck.
    pub fn return_remainder(
        &mut self,
        players: &mut [Player],
        deck: &mut Deck,
    ) -> Result<usize, DomainError> {
        self.expect_phase("return_remainder", RoundPhase::ReturningRemainder)?;
        let mut returned = 0;
        for player in players.iter_mut() {
            if let Some(mut offer) = player.take_offer() {
                for card in offer.take_cards() {
                    deck.return_card(card);
                    returned += 1;
                }
            }
        }
        self.phase = RoundPhase::Ended;
        info!(round_no = self.round_no, returned, deck = deck.len(), "round ended");
        Ok(returned)
    }
}

fn seat_mut(players: &mut [Player], who: PlayerId) -> Result<&mut Player, DomainError> {
    players
        .get_mut(who)
        .ok_or_else(|| DomainError::UnknownPlayer(format!("seat {who}")))
}
