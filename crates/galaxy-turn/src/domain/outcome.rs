//! Results of a resolved turn.

use galaxy_core::world_state::WorldState;
use galaxy_oracle::TurnResult;
use galaxy_player::PlayerUpdate;

/// Narrative shown when the oracle's output cannot be read.
pub const FALLBACK_NARRATIVE: &str =
    "The Force shudders. The simulation momentarily destabilizes.";

/// The turn result substituted for unreadable oracle output: fixed narrative,
/// prior world state kept, no choices, game continues.
#[must_use]
pub fn fallback_turn_result(prior: &WorldState) -> TurnResult {
    TurnResult {
        narrative: FALLBACK_NARRATIVE.to_owned(),
        world_state: Some(prior.clone()),
        choices: Vec::new(),
        is_game_over: false,
        player_update: None,
    }
}

/// Everything the caller needs after a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Always set, so the client can pin later turns.
    pub session_id: String,
    pub narrative: String,
    pub choices: Vec<String>,
    pub is_game_over: bool,
    /// Stat changes for the client's player projection.
    pub player_update: Option<PlayerUpdate>,
    /// The world state persisted by this turn.
    pub world_state: WorldState,
    /// The session was created by this turn.
    pub session_created: bool,
    /// The oracle output was unreadable and the fallback was used.
    pub fell_back: bool,
}
