//! Integration tests for `PgSessionStore`.
//!
//! These need a running PostgreSQL reachable through `DATABASE_URL`; run
//! them with `cargo test -- --ignored`.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use galaxy_core::error::DomainError;
use galaxy_core::repository::SessionStore;
use galaxy_core::world_state::WorldState;
use galaxy_session_store::PgSessionStore;
use galaxy_test_support::FixedClock;
use serde_json::json;
use sqlx::PgPool;

async fn store(pool: PgPool) -> PgSessionStore {
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
    let store = PgSessionStore::new(pool, Arc::new(clock));
    store.ensure_schema().await.unwrap();
    store
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_then_get_round_trips(pool: PgPool) {
    let store = store(pool).await;

    let created = store.create("pg-1", WorldState::seed()).await.unwrap();
    let fetched = store.get("pg-1").await.unwrap().unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.world_state, WorldState::seed());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_get_unknown_returns_none(pool: PgPool) {
    let store = store(pool).await;

    assert!(store.get("nobody").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_duplicate_is_rejected(pool: PgPool) {
    let store = store(pool).await;
    store.create("pg-dup", WorldState::seed()).await.unwrap();

    let result = store.create("pg-dup", WorldState::seed()).await;

    assert!(matches!(result, Err(DomainError::DuplicateSession(_))));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_replace_world_state_replaces_whole_document(pool: PgPool) {
    let store = store(pool).await;
    store.create("pg-2", WorldState::seed()).await.unwrap();
    let replacement = WorldState::try_from(json!({ "location": "Hoth" })).unwrap();

    let updated = store
        .replace_world_state("pg-2", replacement.clone())
        .await
        .unwrap();

    assert_eq!(updated.world_state, replacement);
    assert_eq!(store.get("pg-2").await.unwrap().unwrap().world_state, replacement);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_replace_world_state_unknown_fails(pool: PgPool) {
    let store = store(pool).await;

    let result = store.replace_world_state("pg-ghost", WorldState::seed()).await;

    assert!(matches!(result, Err(DomainError::SessionNotFound(_))));
}
