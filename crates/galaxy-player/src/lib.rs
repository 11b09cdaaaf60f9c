//! Galaxy Player — the client-held player statistics projection.
//!
//! Responsible for the `PlayerState` shown on the HUD and for folding
//! oracle-declared `playerUpdate` mappings into it. Nothing here is persisted
//! server-side.

pub mod domain;

pub use domain::merge::{MergePolicy, apply, merge_policy};
pub use domain::player_state::{PlayerState, StatValue, ThreatLevel};
pub use domain::player_update::{FieldUpdate, PlayerUpdate};
