//! Commands for the turn context.

use galaxy_core::command::Command;
use uuid::Uuid;

/// Command to play one turn.
#[derive(Debug, Clone)]
pub struct PlayTurn {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to continue; `None` starts a new one.
    pub session_id: Option<String>,
    /// Free-text player input, possibly empty.
    pub content: String,
}

impl PlayTurn {
    /// The session id to resume, treating an empty string as absent.
    #[must_use]
    pub fn requested_session_id(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl Command for PlayTurn {
    fn command_type(&self) -> &'static str {
        "turn.play_turn"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
