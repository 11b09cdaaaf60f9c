//! Domain layer for the player projection.

pub mod merge;
pub mod player_state;
pub mod player_update;
