//! One decision per call: ask, validate, retry once, then fall back.

use tracing::warn;

use super::{FlowError, Providers};
use crate::domain::player_view::decision_view;
use crate::domain::{ClaimOutcome, Game, PlayerId, Round, Side};
use crate::errors::domain::{DomainError, ErrorClass};

const ATTEMPTS: usize = 2;

fn is_rule_violation(err: &DomainError) -> bool {
    err.class() == ErrorClass::Rule
}

/// Ask `who` for an offer and commit it.
pub(super) fn take_offer(
    game: &mut Game,
    round: &mut Round,
    providers: &Providers,
    who: PlayerId,
) -> Result<(), FlowError> {
    let name = game.players()[who].name().to_string();
    let provider = providers.get(&name)?;

    for attempt in 1..=ATTEMPTS {
        let view = decision_view(game, round, who);
        let index = provider.choose_face_up_card(&view)?;
        match game.make_offer(round, who, index) {
            Ok(()) => return Ok(()),
            Err(e) if is_rule_violation(&e) => {
                warn!(player = %name, attempt, error = %e, "rejected offer choice");
            }
            Err(e) => return Err(e.into()),
        }
    }
    warn!(player = %name, "falling back to the first card");
    game.make_offer(round, who, 0)?;
    Ok(())
}

/// Ask the player to act for a claim and apply it.
pub(super) fn take_claim(
    game: &mut Game,
    round: &mut Round,
    providers: &Providers,
) -> Result<ClaimOutcome, FlowError> {
    let who = round
        .to_act()
        .ok_or_else(|| DomainError::illegal("claim", round.phase()))?;
    let name = game.players()[who].name().to_string();
    let provider = providers.get(&name)?;

    for attempt in 1..=ATTEMPTS {
        let view = decision_view(game, round, who);
        let owner = provider.choose_offer(&view)?;
        let side = provider.choose_face_up_or_face_down(&view, owner)?;
        match game.claim(round, who, owner, side) {
            Ok(outcome) => return Ok(outcome),
            Err(e) if is_rule_violation(&e) => {
                warn!(player = %name, attempt, error = %e, "rejected claim");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let view = decision_view(game, round, who);
    let owner = view
        .legal_targets()
        .first()
        .copied()
        .ok_or_else(|| DomainError::illegal("claim", round.phase()))?;
    let side = if view.face_up_of(owner).is_some() {
        Side::FaceUp
    } else {
        Side::FaceDown
    };
    warn!(player = %name, target = owner, ?side, "falling back to the first legal claim");
    Ok(game.claim(round, who, owner, side)?)
}
