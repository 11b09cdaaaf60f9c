//! The open-ended world-state document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Durable, oracle-evolved description of a session's persistent facts.
///
/// Only the seed shape is guaranteed; the oracle may introduce any key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldState(Map<String, Value>);

/// Value of `status` in a freshly seeded world state.
pub const SEED_STATUS: &str = "character_creation";

/// Value of `step` before the first oracle turn has run.
pub const SEED_STEP: &str = "init";

impl WorldState {
    /// The world state every new session starts from.
    #[must_use]
    pub fn seed() -> Self {
        let mut map = Map::new();
        map.insert("status".to_owned(), json!(SEED_STATUS));
        map.insert("step".to_owned(), json!(SEED_STEP));
        map.insert("inventory".to_owned(), json!([]));
        map.insert("factions".to_owned(), json!({}));
        map.insert("location".to_owned(), json!("Unknown"));
        Self(map)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the session has not yet had its opening turn.
    #[must_use]
    pub fn is_awaiting_start(&self) -> bool {
        self.get("step").and_then(Value::as_str) == Some(SEED_STEP)
    }

    /// Borrows the underlying object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Renders the document as indented JSON for prompts and logs.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        // A Map<String, Value> always serializes.
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_owned())
    }
}

impl TryFrom<Value> for WorldState {
    type Error = Value;

    /// Accepts JSON objects only; anything else is handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl From<WorldState> for Value {
    fn from(state: WorldState) -> Self {
        Value::Object(state.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_character_creation_shape() {
        let seed = WorldState::seed();

        assert_eq!(seed.get("status"), Some(&json!("character_creation")));
        assert_eq!(seed.get("inventory"), Some(&json!([])));
        assert_eq!(seed.get("factions"), Some(&json!({})));
        assert_eq!(seed.get("location"), Some(&json!("Unknown")));
        assert!(seed.is_awaiting_start());
    }

    #[test]
    fn test_try_from_rejects_non_objects() {
        assert!(WorldState::try_from(json!(["not", "a", "map"])).is_err());
        assert!(WorldState::try_from(json!("text")).is_err());
        assert!(WorldState::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_try_from_keeps_oracle_introduced_keys() {
        let state = WorldState::try_from(json!({ "bounty": 5000, "step": "travel" })).unwrap();

        assert_eq!(state.get("bounty"), Some(&json!(5000)));
        assert!(!state.is_awaiting_start());
    }

    #[test]
    fn test_serializes_transparently_as_object() {
        let state = WorldState::seed();
        let value = serde_json::to_value(&state).unwrap();
        assert!(value.is_object());
        assert_eq!(value["step"], "init");
    }
}
