use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::extensions::ExtensionKind;
use crate::domain::round::{ChoosingRules, SelfClaimPolicy, TurnOrder};
use crate::errors::domain::DomainError;

const DEFAULT_SAVE_DIR: &str = "saves";

/// Session settings. Every field has a default so partial JSON works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed shuffle seed; entropy when absent.
    pub seed: Option<u64>,
    /// Extension cards shuffled into the deck.
    pub extensions: Vec<ExtensionKind>,
    pub choosing: ChoosingRules,
    /// Directory used by the file snapshot store.
    pub save_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            extensions: Vec::new(),
            choosing: ChoosingRules::default(),
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
        }
    }
}

impl GameConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Load from `JEST_*` environment variables.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup (missing or blank means default).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = var("JEST_SEED") {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| DomainError::config(format!("JEST_SEED must be an unsigned integer, got '{raw}'")))?;
            config.seed = Some(seed);
        }
        if let Some(raw) = var("JEST_EXTENSIONS") {
            config.extensions = parse_extensions(&raw)?;
        }
        if let Some(raw) = var("JEST_SELF_CLAIM") {
            config.choosing.self_claim = match raw.trim() {
                "last-resort" => SelfClaimPolicy::LastResort,
                "never" => SelfClaimPolicy::Never,
                other => {
                    return Err(DomainError::config(format!(
                        "JEST_SELF_CLAIM must be 'last-resort' or 'never', got '{other}'"
                    )))
                }
            };
        }
        if let Some(raw) = var("JEST_TURN_ORDER") {
            config.choosing.turn_order = match raw.trim() {
                "round-order" => TurnOrder::RoundOrder,
                "victim-next" => TurnOrder::VictimNext,
                other => {
                    return Err(DomainError::config(format!(
                        "JEST_TURN_ORDER must be 'round-order' or 'victim-next', got '{other}'"
                    )))
                }
            };
        }
        if let Some(raw) = var("JEST_SAVE_DIR") {
            config.save_dir = PathBuf::from(raw.trim());
        }
        Ok(config)
    }
}

fn parse_extensions(raw: &str) -> Result<Vec<ExtensionKind>, DomainError> {
    let mut kinds = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind = ExtensionKind::from_name(name)
            .ok_or_else(|| DomainError::config(format!("unknown extension card '{name}'")))?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}
