//! Domain layer for turn resolution.

pub mod commands;
pub mod outcome;
pub mod phase;
