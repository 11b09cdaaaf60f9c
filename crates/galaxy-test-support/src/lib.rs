//! Shared test mocks and utilities for the Galaxy of Consequence turn engine.

mod clock;
mod oracle;
mod rng;
mod store;

pub use clock::FixedClock;
pub use oracle::{FailingOracle, ScriptedOracle};
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingSessionStore, VanishingSessionStore};
