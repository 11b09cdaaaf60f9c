//! Galaxy Turn — turn resolution and world-state synchronization.
//!
//! Orchestrates one full turn: resolve or create the session, call the
//! oracle gateway, fall back on unreadable output, persist the resulting world
//! state, and hand back the client-facing outcome. Turns for the same session
//! run one at a time.

pub mod application;
pub mod domain;
