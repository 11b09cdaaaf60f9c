//! Normalization of raw oracle output.

use galaxy_core::json::kind_of;
use galaxy_core::world_state::WorldState;
use galaxy_player::PlayerUpdate;
use serde_json::{Map, Value};

/// The oracle's structured answer for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    /// Display text.
    pub narrative: String,
    /// Replacement world state; `None` keeps the prior one.
    pub world_state: Option<WorldState>,
    /// Selectable actions, in order.
    pub choices: Vec<String>,
    pub is_game_over: bool,
    pub player_update: Option<PlayerUpdate>,
}

/// Signal that the oracle's text could not be read as a turn result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleParseFailure {
    /// The completion exactly as received.
    pub raw: String,
    /// Why it was rejected.
    pub reason: String,
}

/// What the gateway hands back for a completed oracle call.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleOutcome {
    Parsed(TurnResult),
    ParseFailure(OracleParseFailure),
}

/// Reads the oracle's raw text as a turn result.
///
/// The text must be a JSON object (optionally inside one Markdown code fence)
/// with a string `response`. Every other field degrades on its own: a
/// non-object `worldState` is dropped, non-string choices are skipped, a
/// non-boolean `isGameOver` reads as `false`, and a non-object `playerUpdate`
/// is ignored.
#[must_use]
pub fn normalize(raw: &str) -> OracleOutcome {
    let failure = |reason: String| {
        OracleOutcome::ParseFailure(OracleParseFailure {
            raw: raw.to_owned(),
            reason,
        })
    };

    let body = strip_code_fence(raw);
    if body.is_empty() {
        return failure("empty completion".to_owned());
    }

    let mut object = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => object,
        Ok(other) => return failure(format!("expected a JSON object, got {}", kind_of(&other))),
        Err(err) => return failure(format!("invalid JSON: {err}")),
    };

    let narrative = match object.remove("response") {
        Some(Value::String(narrative)) => narrative,
        Some(other) => {
            return failure(format!("`response` must be a string, got {}", kind_of(&other)));
        }
        None => return failure("missing `response`".to_owned()),
    };

    OracleOutcome::Parsed(TurnResult {
        narrative,
        world_state: object
            .remove("worldState")
            .and_then(|value| WorldState::try_from(value).ok()),
        choices: take_choices(&mut object),
        is_game_over: object
            .remove("isGameOver")
            .and_then(|value| value.as_bool())
            .unwrap_or(false),
        player_update: object
            .remove("playerUpdate")
            .and_then(PlayerUpdate::from_value),
    })
}

fn take_choices(object: &mut Map<String, Value>) -> Vec<String> {
    match object.remove("choices") {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(choice) => Some(choice),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Removes a single surrounding ```` ``` ```` fence, with or without a
/// language tag.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };
    match rest.split_once('\n') {
        Some((tag, body)) if !tag.trim_start().starts_with('{') => body.trim(),
        _ => rest.trim(),
    }
}
