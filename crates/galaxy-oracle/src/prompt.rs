//! Prompt rendering.

use galaxy_core::oracle::OraclePrompt;
use galaxy_core::world_state::WorldState;

use crate::directive::BEGIN_GAME_INPUT;

/// Chooses the literal player input for the prompt.
///
/// Blank content on a session that has not started becomes
/// [`BEGIN_GAME_INPUT`]; blank content otherwise stays empty.
#[must_use]
pub fn resolve_player_input(content: &str, is_new_session: bool) -> &str {
    if !content.trim().is_empty() {
        content
    } else if is_new_session {
        BEGIN_GAME_INPUT
    } else {
        ""
    }
}

/// Renders the two-message prompt for one turn.
#[must_use]
pub fn render_prompt(directive: &str, world_state: &WorldState, player_input: &str) -> OraclePrompt {
    OraclePrompt {
        system: directive.to_owned(),
        user: format!(
            "WORLD STATE:\n{}\n\nPLAYER INPUT:\n{}",
            world_state.to_pretty_json(),
            player_input
        ),
    }
}
