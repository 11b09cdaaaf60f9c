//! Phases of a single turn.

use std::fmt;

/// Where a turn is in its lifecycle. Used as a logging field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    ResolveSession,
    Invoke,
    Validate,
    Merge,
    Respond,
}

impl TurnPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ResolveSession => "resolve_session",
            Self::Invoke => "invoke",
            Self::Validate => "validate",
            Self::Merge => "merge",
            Self::Respond => "respond",
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
