//! Galaxy Session Store — `SessionStore` implementations.
//!
//! [`memory::InMemorySessionStore`] serves single-process deployments and
//! tests; [`pg_session_store::PgSessionStore`] persists sessions in
//! PostgreSQL.

pub mod memory;
pub mod pg_session_store;
pub mod schema;

pub use memory::InMemorySessionStore;
pub use pg_session_store::PgSessionStore;
