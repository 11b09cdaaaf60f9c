//! Requests entering the engine from the HTTP layer.

use uuid::Uuid;

/// A request to advance engine state, traced end to end by its correlation id.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable dotted name used as the `command` log field, e.g. `turn.play_turn`.
    fn command_type(&self) -> &'static str;

    /// Minted per HTTP request; every log line for the request carries it.
    fn correlation_id(&self) -> Uuid;
}
