//! Delta/override merge of a `PlayerUpdate` onto a `PlayerState`.

use serde_json::Number;
use tracing::trace;

use super::player_state::{PlayerState, StatValue};
use super::player_update::{FieldUpdate, PlayerUpdate};

/// How an incoming value combines with the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Both sides numeric: the result is their sum.
    Accumulate,
    /// Anything else: the incoming value replaces the current one.
    Replace,
}

/// Picks the policy for one field.
#[must_use]
pub fn merge_policy(current: Option<&StatValue>, incoming: &FieldUpdate) -> MergePolicy {
    match (current, incoming) {
        (Some(StatValue::Number(_)), FieldUpdate::Delta(_)) => MergePolicy::Accumulate,
        _ => MergePolicy::Replace,
    }
}

/// Folds `update` into `current`, returning the new state.
///
/// Fields the update does not mention are left as they were. No bounds are
/// applied: health and credits may go negative.
#[must_use]
pub fn apply(current: &PlayerState, update: &PlayerUpdate) -> PlayerState {
    let mut next = current.clone();

    for (key, incoming) in update.iter() {
        let existing = current.get(key);
        let merged = match (merge_policy(existing, incoming), existing, incoming) {
            (MergePolicy::Accumulate, Some(StatValue::Number(a)), FieldUpdate::Delta(b)) => {
                StatValue::Number(add(a, b))
            }
            _ => StatValue::from(incoming.to_value()),
        };
        trace!(field = %key, "player stat merged");
        next.set(key.clone(), merged);
    }

    next
}

impl PlayerState {
    /// See [`apply`].
    #[must_use]
    pub fn apply(&self, update: &PlayerUpdate) -> PlayerState {
        apply(self, update)
    }
}

/// Integer sum when both are integers and it fits, float sum otherwise.
/// A non-finite float sum keeps the current value.
fn add(current: &Number, delta: &Number) -> Number {
    if let (Some(a), Some(b)) = (current.as_i64(), delta.as_i64())
        && let Some(sum) = a.checked_add(b)
    {
        return Number::from(sum);
    }

    let sum = current.as_f64().unwrap_or(0.0) + delta.as_f64().unwrap_or(0.0);
    Number::from_f64(sum).unwrap_or_else(|| current.clone())
}
