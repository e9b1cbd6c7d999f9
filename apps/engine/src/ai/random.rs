//! Random provider - uniform legal choices, seedable for tests.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, DecisionProvider};
use crate::domain::player_view::DecisionView;
use crate::domain::{PlayerId, Side};

/// Picks uniformly among the legal options.
///
/// The RNG sits behind a `Mutex` because provider methods take `&self`.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    /// `Some(seed)` for reproducible play, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T, AiError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(f(&mut *rng))
    }
}

impl DecisionProvider for RandomPlayer {
    fn choose_face_up_card(&self, view: &DecisionView) -> Result<usize, AiError> {
        if view.hand.is_empty() {
            return Err(AiError::InvalidChoice("No cards in hand".into()));
        }
        self.with_rng(|rng| rng.random_range(0..view.hand.len()))
    }

    fn choose_offer(&self, view: &DecisionView) -> Result<PlayerId, AiError> {
        let targets = view.legal_targets();
        if targets.is_empty() {
            return Err(AiError::InvalidChoice("No legal offers available".into()));
        }
        self.with_rng(|rng| targets.choose(rng).copied())?
            .ok_or_else(|| AiError::Internal("Failed to choose random offer".into()))
    }

    fn choose_face_up_or_face_down(
        &self,
        view: &DecisionView,
        owner: PlayerId,
    ) -> Result<Side, AiError> {
        let mut sides = Vec::with_capacity(2);
        if view.face_up_of(owner).is_some() {
            sides.push(Side::FaceUp);
        }
        if view.has_face_down(owner) {
            sides.push(Side::FaceDown);
        }
        self.with_rng(|rng| sides.choose(rng).copied())?
            .ok_or_else(|| AiError::InvalidChoice(format!("Offer of seat {owner} is empty")))
    }
}
