//! Round lifecycle: DEAL → OFFER → DETERMINE_STARTER → CHOOSE → RETURN_REMAINDER.

use tracing::{debug, info};

use super::player_actions::{take_claim, take_offer};
use super::{FlowError, Providers};
use crate::domain::snapshot::LoadedRound;
use crate::domain::{ClaimOutcome, Game, PlayerId, Round, RoundPhase};
use crate::errors::domain::DomainError;

/// What happened during one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub round_no: u32,
    pub starter: Option<PlayerId>,
    pub claims: Vec<ClaimOutcome>,
    pub returned: usize,
}

/// Deal a fresh round and play it to the end.
///
/// A short deck surfaces as `DomainError::InsufficientCards` with nothing
/// dealt; the caller decides whether the game is over.
pub fn play_round(game: &mut Game, providers: &Providers) -> Result<RoundReport, FlowError> {
    providers.check_complete(game)?;
    let mut round = game.begin_round()?;
    info!(round_no = round.round_no(), "round dealt");
    drive_round(game, &mut round, providers)
}

/// Continue a restored round from its exact sub-state.
pub fn resume_round(loaded: &mut LoadedRound, providers: &Providers) -> Result<RoundReport, FlowError> {
    providers.check_complete(&loaded.game)?;
    info!(
        round_no = loaded.round.round_no(),
        phase = ?loaded.round.phase(),
        "resuming round"
    );
    drive_round(&mut loaded.game, &mut loaded.round, providers)
}

/// Advance `round` from whatever phase it is in until it has ended.
pub fn drive_round(
    game: &mut Game,
    round: &mut Round,
    providers: &Providers,
) -> Result<RoundReport, FlowError> {
    let mut claims = Vec::new();
    let mut returned = 0;

    loop {
        match round.phase() {
            RoundPhase::Dealing => game.deal_round(round)?,
            RoundPhase::Offering => {
                let pending = round.pending_offers(game.players());
                if pending.is_empty() {
                    return Err(DomainError::illegal("offer", round.phase()).into());
                }
                for who in pending {
                    take_offer(game, round, providers, who)?;
                }
            }
            RoundPhase::DeterminingStarter => {
                let starter = game.determine_starter(round)?;
                debug!(starter = game.players()[starter].name(), "starter determined");
            }
            RoundPhase::Choosing => {
                let outcome = take_claim(game, round, providers)?;
                for provider in providers.all() {
                    provider.on_offer_resolved(&outcome);
                }
                claims.push(outcome);
            }
            RoundPhase::ReturningRemainder => {
                returned = game.return_remainder(round)?;
            }
            RoundPhase::Ended => break,
        }
    }

    Ok(RoundReport {
        round_no: round.round_no(),
        starter: round.starter(),
        claims,
        returned,
    })
}
