//! Heuristic providers - the aggressive and cautious styles.
//!
//! Both value a card as the score change it would cause in their own jest,
//! except extension cards, which use their per-strategy heuristic. The hidden
//! side of an offer is valued at the mean of every card the player cannot see.
//!
//! Aggressive:
//! - shows its weaker card and keeps the stronger one hidden
//! - targets the offer with the best known or expected card
//! - takes the face-up card only when it beats the expected hidden card
//!
//! Cautious:
//! - shows its stronger card
//! - targets the offer with the least harmful face-up card
//! - takes the known card unless it is negative and the gamble looks better
//!
//! Ties are broken with the seeded RNG.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, DecisionProvider};
use crate::domain::player_view::DecisionView;
use crate::domain::{marginal_score, Card, PlayerId, Side, StrategyType};

pub struct HeuristicPlayer {
    style: StrategyType,
    rng: Mutex<StdRng>,
}

impl HeuristicPlayer {
    pub const AGGRESSIVE: &'static str = "AggressivePlayer";
    pub const CAUTIOUS: &'static str = "CautiousPlayer";
    pub const VERSION: &'static str = "1.0.0";

    pub fn aggressive(seed: Option<u64>) -> Self {
        Self::new(StrategyType::Aggressive, seed)
    }

    pub fn cautious(seed: Option<u64>) -> Self {
        Self::new(StrategyType::Cautious, seed)
    }

    fn new(style: StrategyType, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            style,
            rng: Mutex::new(rng),
        }
    }

    pub fn style(&self) -> StrategyType {
        self.style
    }

    fn worth(&self, jest: &[Card], card: Card) -> i32 {
        match card.extension() {
            Some(kind) => kind.ai_value(self.style, jest),
            None => marginal_score(jest, card),
        }
    }

    fn expected_hidden(&self, view: &DecisionView) -> i32 {
        if view.unseen.is_empty() {
            return 0;
        }
        let total: i32 = view.unseen.iter().map(|&c| self.worth(&view.jest, c)).sum();
        total / view.unseen.len() as i32
    }

    fn offer_value(&self, view: &DecisionView, owner: PlayerId, hidden: i32) -> Option<i32> {
        let known = view.face_up_of(owner).map(|c| self.worth(&view.jest, c));
        let gamble = view.has_face_down(owner).then_some(hidden);
        match self.style {
            StrategyType::Cautious => known.or(gamble),
            _ => known.max(gamble),
        }
    }

    fn pick_best<T: Copy>(&self, scored: &[(T, i32)]) -> Result<Option<T>, AiError> {
        let Some(best) = scored.iter().map(|&(_, v)| v).max() else {
            return Ok(None);
        };
        let ties: Vec<T> = scored
            .iter()
            .filter(|&&(_, v)| v == best)
            .map(|&(t, _)| t)
            .collect();
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(ties.choose(&mut *rng).copied())
    }
}

impl DecisionProvider for HeuristicPlayer {
    fn choose_face_up_card(&self, view: &DecisionView) -> Result<usize, AiError> {
        let values: Vec<(usize, i32)> = view
            .hand
            .iter()
            .enumerate()
            .map(|(i, &c)| (i, self.worth(&view.jest, c)))
            .collect();
        if values.is_empty() {
            return Err(AiError::InvalidChoice("No cards in hand".into()));
        }
        let show_stronger = self.style == StrategyType::Cautious;
        let pick = values
            .iter()
            .copied()
            .reduce(|best, cur| {
                let better = if show_stronger {
                    cur.1 > best.1
                } else {
                    cur.1 < best.1
                };
                if better {
                    cur
                } else {
                    best
                }
            })
            .map(|(i, _)| i)
            .unwrap_or(0);
        Ok(pick)
    }

    fn choose_offer(&self, view: &DecisionView) -> Result<PlayerId, AiError> {
        let hidden = self.expected_hidden(view);
        let scored: Vec<(PlayerId, i32)> = view
            .legal_targets()
            .iter()
            .filter_map(|&owner| self.offer_value(view, owner, hidden).map(|v| (owner, v)))
            .collect();
        self.pick_best(&scored)?
            .ok_or_else(|| AiError::InvalidChoice("No legal offers available".into()))
    }

    fn choose_face_up_or_face_down(
        &self,
        view: &DecisionView,
        owner: PlayerId,
    ) -> Result<Side, AiError> {
        let known = view.face_up_of(owner).map(|c| self.worth(&view.jest, c));
        let hidden = view
            .has_face_down(owner)
            .then(|| self.expected_hidden(view));
        let side = match (known, hidden) {
            (Some(_), None) => Side::FaceUp,
            (None, Some(_)) => Side::FaceDown,
            (None, None) => {
                return Err(AiError::InvalidChoice(format!("Offer of seat {owner} is empty")))
            }
            (Some(k), Some(h)) => match self.style {
                StrategyType::Cautious if k < 0 && h > k => Side::FaceDown,
                StrategyType::Cautious => Side::FaceUp,
                _ if k >= h => Side::FaceUp,
                _ => Side::FaceDown,
            },
        };
        Ok(side)
    }
}
