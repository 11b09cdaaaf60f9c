//! Oracle-declared player-stat updates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A single field's incoming value, classified by kind.
///
/// On the wire both variants are the bare JSON value; a number always
/// deserializes as [`FieldUpdate::Delta`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldUpdate {
    /// A numeric amount; accumulates onto a numeric current value.
    Delta(Number),
    /// A literal replacement value.
    Override(Value),
}

impl FieldUpdate {
    /// Classifies a raw JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Number(n) => Self::Delta(n),
            other => Self::Override(other),
        }
    }

    /// The value as it would be written verbatim.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Delta(n) => Value::Number(n.clone()),
            Self::Override(v) => v.clone(),
        }
    }
}

/// Mapping of player-stat field name to incoming value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerUpdate(BTreeMap<String, FieldUpdate>);

impl PlayerUpdate {
    /// Builds an update from a JSON object; any other value yields `None`.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(
                map.into_iter()
                    .map(|(key, value)| (key, FieldUpdate::from_value(value)))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Returns the update for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldUpdate> {
        self.0.get(key)
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldUpdate)> {
        self.0.iter()
    }
}

impl FromIterator<(String, FieldUpdate)> for PlayerUpdate {
    fn from_iter<I: IntoIterator<Item = (String, FieldUpdate)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
