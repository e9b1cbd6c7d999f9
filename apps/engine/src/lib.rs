//! Round engine, scoring and session snapshots for the Jest card game.

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod flow;
pub mod persistence;
pub mod telemetry;

// Re-exports for public API
pub use config::GameConfig;
pub use domain::{Game, GameResult, Round, RoundPhase};
pub use errors::{DomainError, ErrorClass};
pub use flow::{play_game, play_round, resume_round, FlowError, Providers};
pub use persistence::{FileStore, MemoryStore, Snapshot, SnapshotStore, StoreError};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
