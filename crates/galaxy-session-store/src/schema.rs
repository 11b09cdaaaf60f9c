//! Session store database schema.

/// SQL to create the sessions table.
pub const CREATE_SESSIONS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS sessions (
    id          BIGSERIAL PRIMARY KEY,
    session_id  TEXT NOT NULL UNIQUE,
    world_state JSONB NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL
);
";
