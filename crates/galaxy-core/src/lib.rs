//! Galaxy Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that every component
//! of the turn engine depends on: the world-state document, the session store
//! and oracle ports, and the clock/RNG seams used for determinism. It contains
//! no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod json;
pub mod oracle;
pub mod repository;
pub mod rng;
pub mod session_id;
pub mod world_state;
