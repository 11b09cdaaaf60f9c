//! Process-local session store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use galaxy_core::clock::Clock;
use galaxy_core::error::DomainError;
use galaxy_core::repository::{Session, SessionStore};
use galaxy_core::world_state::WorldState;

#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<String, Session>,
    next_id: i64,
}

/// Session store backed by a single process-wide map.
pub struct InMemorySessionStore {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySessionStore").finish_non_exhaustive()
    }
}

impl InMemorySessionStore {
    /// Creates an empty store that stamps `created_at` from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                sessions: HashMap::new(),
                next_id: 1,
            }),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, DomainError> {
        self.inner
            .lock()
            .map_err(|_| DomainError::Infrastructure("session map lock poisoned".into()))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.lock()?.sessions.get(session_id).cloned())
    }

    async fn create(
        &self,
        session_id: &str,
        initial_world_state: WorldState,
    ) -> Result<Session, DomainError> {
        let mut inner = self.lock()?;
        if inner.sessions.contains_key(session_id) {
            return Err(DomainError::DuplicateSession(session_id.to_owned()));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let session = Session {
            id,
            session_id: session_id.to_owned(),
            world_state: initial_world_state,
            created_at: self.clock.now(),
        };
        inner
            .sessions
            .insert(session_id.to_owned(), session.clone());

        debug!(session_id, id, "session created");
        Ok(session)
    }

    async fn replace_world_state(
        &self,
        session_id: &str,
        new_world_state: WorldState,
    ) -> Result<Session, DomainError> {
        let mut inner = self.lock()?;
        let session = inner
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| DomainError::SessionNotFound(session_id.to_owned()))?;
        session.world_state = new_world_state;
        Ok(session.clone())
    }
}
