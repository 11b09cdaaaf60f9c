//! Session store abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::world_state::WorldState;

/// Persisted session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Monotonic internal identifier assigned by the store.
    pub id: i64,
    /// Opaque, unique, immutable session identifier.
    pub session_id: String,
    /// The session's current world state.
    pub world_state: WorldState,
    /// Creation timestamp, never changed after insert.
    pub created_at: DateTime<Utc>,
}

/// Durable mapping from session identifier to world-state record.
///
/// CRUD primitives only. Implementations expose no locking; callers that
/// need per-session ordering serialize turns themselves.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a session. Absence is `Ok(None)`.
    async fn get(&self, session_id: &str) -> Result<Option<Session>, DomainError>;

    /// Insert a new session seeded with `initial_world_state`.
    ///
    /// Fails with [`DomainError::DuplicateSession`] if the identifier exists.
    async fn create(
        &self,
        session_id: &str,
        initial_world_state: WorldState,
    ) -> Result<Session, DomainError>;

    /// Replace the whole world-state document of an existing session.
    ///
    /// Fails with [`DomainError::SessionNotFound`] if the identifier is unknown.
    async fn replace_world_state(
        &self,
        session_id: &str,
        new_world_state: WorldState,
    ) -> Result<Session, DomainError>;
}
