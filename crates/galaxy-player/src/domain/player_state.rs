//! The client-held player statistics projection.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

/// Field names of the HUD statistics.
pub mod fields {
    pub const NAME: &str = "name";
    pub const HEALTH: &str = "health";
    pub const STAMINA: &str = "stamina";
    pub const CREDITS: &str = "credits";
    pub const THREAT_LEVEL: &str = "threatLevel";
    pub const LOCATION: &str = "location";
}

/// A single statistic, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(Number),
    Text(String),
    Other(Value),
}

impl StatValue {
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for StatValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            other => Self::Other(other),
        }
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Threat level shown on the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known threat level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown threat level: {0}")]
pub struct ParseThreatLevelError(String);

impl FromStr for ThreatLevel {
    type Err = ParseThreatLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParseThreatLevelError(s.to_owned())),
        }
    }
}

/// Player statistics keyed by field name.
///
/// Kept as a map rather than a fixed record: an override may change a
/// field's kind, and the oracle may name fields the HUD does not know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerState(BTreeMap<String, StatValue>);

impl Default for PlayerState {
    /// The stock character a fresh client starts with.
    fn default() -> Self {
        [
            (fields::NAME, StatValue::from("D'mir Holloràn")),
            (fields::HEALTH, StatValue::from(80_i64)),
            (fields::STAMINA, StatValue::from(65_i64)),
            (fields::CREDITS, StatValue::from(1200_i64)),
            (fields::THREAT_LEVEL, StatValue::from(ThreatLevel::Low.as_str())),
            (fields::LOCATION, StatValue::from("Coruscant - Level 1313")),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
    }
}

impl FromIterator<(String, StatValue)> for PlayerState {
    fn from_iter<I: IntoIterator<Item = (String, StatValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl PlayerState {
    /// A state with no fields at all.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StatValue> {
        self.0.get(key)
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: StatValue) -> Option<StatValue> {
        self.0.insert(key.into(), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StatValue)> {
        self.0.iter()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.text(fields::NAME)
    }

    #[must_use]
    pub fn health(&self) -> Option<f64> {
        self.number(fields::HEALTH)
    }

    #[must_use]
    pub fn stamina(&self) -> Option<f64> {
        self.number(fields::STAMINA)
    }

    #[must_use]
    pub fn credits(&self) -> Option<f64> {
        self.number(fields::CREDITS)
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.text(fields::LOCATION)
    }

    /// `None` when the field is missing or holds an unrecognized value.
    #[must_use]
    pub fn threat_level(&self) -> Option<ThreatLevel> {
        self.text(fields::THREAT_LEVEL)?.parse().ok()
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_number()?.as_f64()
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_text()
    }
}
