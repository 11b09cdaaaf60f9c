//! `PostgreSQL` implementation of the `SessionStore` trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{debug, instrument};

use galaxy_core::clock::Clock;
use galaxy_core::error::DomainError;
use galaxy_core::repository::{Session, SessionStore};
use galaxy_core::world_state::WorldState;

use crate::schema::CREATE_SESSIONS_TABLE;

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    session_id: String,
    world_state: Json<WorldState>,
    created_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            session_id: row.session_id,
            world_state: row.world_state.0,
            created_at: row.created_at,
        }
    }
}

fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("session store query failed: {err}"))
}

/// PostgreSQL-backed session store.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for PgSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgSessionStore")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl PgSessionStore {
    /// Creates a new `PgSessionStore`.
    #[must_use]
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Creates the `sessions` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the DDL statement fails.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(CREATE_SESSIONS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    #[instrument(skip(self))]
    async fn get(&self, session_id: &str) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT id, session_id, world_state, created_at FROM sessions WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;

        Ok(row.map(Session::from))
    }

    #[instrument(skip(self, initial_world_state))]
    async fn create(
        &self,
        session_id: &str,
        initial_world_state: WorldState,
    ) -> Result<Session, DomainError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "INSERT INTO sessions (session_id, world_state, created_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (session_id) DO NOTHING \
             RETURNING id, session_id, world_state, created_at",
        )
        .bind(session_id)
        .bind(Json(&initial_world_state))
        .bind(self.clock.now())
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;

        let session = row
            .map(Session::from)
            .ok_or_else(|| DomainError::DuplicateSession(session_id.to_owned()))?;
        debug!(id = session.id, "session created");
        Ok(session)
    }

    #[instrument(skip(self, new_world_state))]
    async fn replace_world_state(
        &self,
        session_id: &str,
        new_world_state: WorldState,
    ) -> Result<Session, DomainError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "UPDATE sessions SET world_state = $2 WHERE session_id = $1 \
             RETURNING id, session_id, world_state, created_at",
        )
        .bind(session_id)
        .bind(Json(&new_world_state))
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;

        row.map(Session::from)
            .ok_or_else(|| DomainError::SessionNotFound(session_id.to_owned()))
    }
}
