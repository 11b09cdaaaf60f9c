//! Read side of the session store.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use galaxy_core::error::DomainError;
use galaxy_core::repository::Session;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /{session_id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Session>, ApiError> {
    let session = state
        .store
        .get(&session_id)
        .await?
        .ok_or(DomainError::SessionNotFound(session_id))?;

    Ok(Json(session))
}

/// Returns the router for session queries.
pub fn router() -> Router<AppState> {
    Router::new().route("/{session_id}", get(get_session))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use galaxy_core::oracle::OracleClient;
    use galaxy_core::repository::SessionStore;
    use galaxy_core::rng::DeterministicRng;
    use galaxy_core::world_state::WorldState;
    use galaxy_session_store::InMemorySessionStore;
    use galaxy_test_support::{FailingOracle, FailingSessionStore, FixedClock, MockRng};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_state_with(store: Arc<dyn SessionStore>) -> AppState {
        let oracle: Arc<dyn OracleClient> = Arc::new(FailingOracle);
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
        AppState::new(store, oracle, rng)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_get_session_returns_persisted_record() {
        // Arrange
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let store = Arc::new(InMemorySessionStore::new(Arc::new(clock)));
        store.create("abc123", WorldState::seed()).await.unwrap();
        let app = router().with_state(app_state_with(store));

        // Act
        let (status, json) = get(app, "/abc123").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["sessionId"], "abc123");
        assert_eq!(json["worldState"]["status"], "character_creation");
        assert_eq!(json["createdAt"], "2026-01-15T10:00:00Z");
        assert!(json["id"].is_i64());
    }

    #[tokio::test]
    async fn test_get_unknown_session_returns_404() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let store = Arc::new(InMemorySessionStore::new(Arc::new(clock)));
        let app = router().with_state(app_state_with(store));

        // Act
        let (status, json) = get(app, "/missing").await;

        // Assert
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "session not found: missing");
    }

    #[tokio::test]
    async fn test_get_session_store_failure_returns_500() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(FailingSessionStore)));

        // Act
        let (status, json) = get(app, "/abc123").await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Internal Server Error");
    }
}
