//! Test stores — misbehaving `SessionStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use galaxy_core::error::DomainError;
use galaxy_core::repository::{Session, SessionStore};
use galaxy_core::world_state::WorldState;

/// A session store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn get(&self, _session_id: &str) -> Result<Option<Session>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn create(
        &self,
        _session_id: &str,
        _initial_world_state: WorldState,
    ) -> Result<Session, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn replace_world_state(
        &self,
        _session_id: &str,
        _new_world_state: WorldState,
    ) -> Result<Session, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// A session store that creates and returns sessions normally but forgets
/// them before any write: `replace_world_state` always fails with
/// `SessionNotFound`. Simulates a session vanishing between resolve and merge.
#[derive(Debug, Default)]
pub struct VanishingSessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

#[async_trait]
impl SessionStore for VanishingSessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn create(
        &self,
        session_id: &str,
        initial_world_state: WorldState,
    ) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = Session {
            id: i64::try_from(sessions.len() + 1).unwrap_or(i64::MAX),
            session_id: session_id.to_owned(),
            world_state: initial_world_state,
            created_at: Utc::now(),
        };
        sessions.insert(session_id.to_owned(), session.clone());
        Ok(session)
    }

    async fn replace_world_state(
        &self,
        session_id: &str,
        _new_world_state: WorldState,
    ) -> Result<Session, DomainError> {
        self.sessions.lock().unwrap().remove(session_id);
        Err(DomainError::SessionNotFound(session_id.to_owned()))
    }
}
