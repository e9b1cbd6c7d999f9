//! Engine test support utilities
//!
//! Shared between the engine's unit tests and its integration tests.

pub mod logging;
