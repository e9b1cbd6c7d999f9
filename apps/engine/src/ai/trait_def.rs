//! Decision provider trait definition.

use thiserror::Error;

use crate::domain::player_view::DecisionView;
use crate::domain::{ClaimOutcome, PlayerId, Side};

/// Errors that can occur while a provider makes a decision.
#[derive(Debug, Error)]
pub enum AiError {
    /// Provider encountered an internal error
    #[error("decision provider internal error: {0}")]
    Internal(String),
    /// Provider had nothing legal to choose from
    #[error("decision provider invalid choice: {0}")]
    InvalidChoice(String),
    /// No decision can be obtained (input closed or abandoned)
    #[error("decision provider unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the choices of one player, human or scripted.
///
/// The engine asks for one decision at a time and validates every answer;
/// providers only need to read the view they are given.
pub trait DecisionProvider: Send + Sync {
    /// Index into `view.hand` of the card to show face up.
    fn choose_face_up_card(&self, view: &DecisionView) -> Result<usize, AiError>;

    /// Owner of the offer to claim from; should be one of `view.legal_targets()`.
    fn choose_offer(&self, view: &DecisionView) -> Result<PlayerId, AiError>;

    /// Which side of `owner`'s offer to take.
    fn choose_face_up_or_face_down(
        &self,
        view: &DecisionView,
        owner: PlayerId,
    ) -> Result<Side, AiError>;

    /// The deck can no longer cover a full deal; `player` is the one this
    /// provider decides for.
    fn on_insufficient_cards(&self, _player: &str, _needed: usize, _available: usize) {}

    /// A claim by any player has been applied.
    fn on_offer_resolved(&self, _outcome: &ClaimOutcome) {}
}
