//! The turn endpoint.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, routing::post};
use galaxy_core::error::DomainError;
use galaxy_core::json::kind_of;
use galaxy_player::PlayerUpdate;
use galaxy_turn::domain::commands::PlayTurn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /api/play.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    /// Free-text player input.
    pub content: String,
    /// Session to continue; absent or null starts a new one.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl PlayRequest {
    /// Decodes a JSON body, reporting the first invalid field on failure.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the body is not an object, if
    /// `content` is missing or not a string, or if `sessionId` is neither a
    /// string nor null.
    pub fn from_json(body: &Value) -> Result<Self, DomainError> {
        Self::deserialize(body).map_err(|err| {
            invalid_field(body).unwrap_or_else(|| DomainError::validation("body", err.to_string()))
        })
    }
}

/// Names the first field that keeps `body` from decoding as a `PlayRequest`.
fn invalid_field(body: &Value) -> Option<DomainError> {
    let Value::Object(fields) = body else {
        return Some(DomainError::validation(
            "body",
            format!("Expected object, received {}", kind_of(body)),
        ));
    };

    match fields.get("content") {
        None => return Some(DomainError::validation("content", "Required")),
        Some(Value::String(_)) => {}
        Some(other) => return Some(expected_string("content", other)),
    }

    match fields.get("sessionId") {
        None | Some(Value::Null | Value::String(_)) => None,
        Some(other) => Some(expected_string("sessionId", other)),
    }
}

fn expected_string(field: &str, value: &Value) -> DomainError {
    DomainError::validation(field, format!("Expected string, received {}", kind_of(value)))
}

/// Response body for a played turn.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResponse {
    /// Narrative text for this turn.
    pub response: String,
    pub session_id: String,
    pub choices: Vec<String>,
    pub is_game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_update: Option<PlayerUpdate>,
}

/// POST /api/play
#[instrument(skip_all)]
async fn play(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PlayResponse>, ApiError> {
    let Json(body) =
        body.map_err(|rejection| DomainError::validation("body", rejection.body_text()))?;
    let request = PlayRequest::from_json(&body)?;

    let command = PlayTurn {
        correlation_id: Uuid::new_v4(),
        session_id: request.session_id,
        content: request.content,
    };

    info!(correlation_id = %command.correlation_id, "handling play_turn command");

    let outcome = state.resolver.play_turn(&command).await?;

    Ok(Json(PlayResponse {
        response: outcome.narrative,
        session_id: outcome.session_id,
        choices: outcome.choices,
        is_game_over: outcome.is_game_over,
        player_update: outcome.player_update,
    }))
}

/// Returns the router for the turn endpoint.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/play", post(play))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use galaxy_core::oracle::OracleClient;
    use galaxy_core::repository::SessionStore;
    use galaxy_core::rng::DeterministicRng;
    use galaxy_session_store::InMemorySessionStore;
    use galaxy_test_support::{
        FailingOracle, FailingSessionStore, FixedClock, MockRng, ScriptedOracle,
    };
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn app_state_with(store: Arc<dyn SessionStore>, oracle: Arc<dyn OracleClient>) -> AppState {
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
        AppState::new(store, oracle, rng)
    }

    fn memory_store() -> Arc<dyn SessionStore> {
        Arc::new(InMemorySessionStore::new(Arc::new(FixedClock(Utc::now()))))
    }

    async fn post_raw(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/play")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_from_json_accepts_content_only() {
        let request = PlayRequest::from_json(&json!({ "content": "look around" })).unwrap();

        assert_eq!(request.content, "look around");
        assert_eq!(request.session_id, None);
    }

    #[test]
    fn test_from_json_reads_session_id() {
        let request =
            PlayRequest::from_json(&json!({ "content": "", "sessionId": "abc" })).unwrap();

        assert_eq!(request.content, "");
        assert_eq!(request.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_from_json_treats_null_session_id_as_absent() {
        let request =
            PlayRequest::from_json(&json!({ "content": "go", "sessionId": null })).unwrap();

        assert_eq!(request.session_id, None);
    }

    #[test]
    fn test_from_json_ignores_unknown_fields() {
        let request = PlayRequest::from_json(&json!({ "content": "go", "mood": "tense" })).unwrap();

        assert_eq!(request.content, "go");
    }

    #[test]
    fn test_from_json_reports_first_invalid_field() {
        let cases = [
            (json!([1, 2]), "body", "Expected object, received array"),
            (json!({}), "content", "Required"),
            (json!({ "content": 7 }), "content", "Expected string, received number"),
            (
                json!({ "content": 7, "sessionId": 3 }),
                "content",
                "Expected string, received number",
            ),
            (
                json!({ "content": "go", "sessionId": false }),
                "sessionId",
                "Expected string, received boolean",
            ),
        ];

        for (body, expected_field, expected_message) in cases {
            match PlayRequest::from_json(&body).unwrap_err() {
                DomainError::Validation { field, message } => {
                    assert_eq!(field, expected_field, "body: {body}");
                    assert_eq!(message, expected_message, "body: {body}");
                }
                other => panic!("expected Validation, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_play_returns_200_with_narrative_and_session_id() {
        // Arrange
        let oracle = Arc::new(ScriptedOracle::new([json!({
            "response": "Rain hammers the landing pad.",
            "worldState": { "step": "docked" },
            "choices": ["Board", "Wait"],
            "isGameOver": false
        })
        .to_string()]));
        let app = router().with_state(app_state_with(memory_store(), oracle));

        // Act
        let (status, json) = post_raw(app, r#"{"content":"INITIALIZE_UPLINK"}"#).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response"], "Rain hammers the landing pad.");
        assert_eq!(json["sessionId"], "0000000000000000");
        assert_eq!(json["choices"], json!(["Board", "Wait"]));
        assert_eq!(json["isGameOver"], false);
        assert!(json.get("playerUpdate").is_none());
    }

    #[tokio::test]
    async fn test_play_returns_400_for_malformed_json() {
        // Arrange
        let app = router().with_state(app_state_with(memory_store(), Arc::new(FailingOracle)));

        // Act
        let (status, json) = post_raw(app, "{not json").await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "body");
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn test_play_returns_400_when_content_missing() {
        // Arrange
        let app = router().with_state(app_state_with(memory_store(), Arc::new(FailingOracle)));

        // Act
        let (status, json) = post_raw(app, r#"{"sessionId":"abc"}"#).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "content");
        assert_eq!(json["message"], "Required");
    }

    #[tokio::test]
    async fn test_play_returns_500_when_store_fails() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(FailingSessionStore),
            Arc::new(FailingOracle),
        ));

        // Act
        let (status, json) = post_raw(app, r#"{"content":"hello"}"#).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Internal Server Error");
        assert!(json.get("field").is_none());
    }

    #[tokio::test]
    async fn test_play_returns_500_when_oracle_transport_fails() {
        // Arrange
        let app = router().with_state(app_state_with(memory_store(), Arc::new(FailingOracle)));

        // Act
        let (status, json) = post_raw(app, r#"{"content":"hello"}"#).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Internal Server Error");
    }
}
