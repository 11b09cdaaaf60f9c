//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use galaxy_core::clock::Clock;
use galaxy_core::oracle::OracleClient;
use galaxy_core::repository::SessionStore;
use galaxy_core::rng::DeterministicRng;
use galaxy_session_store::InMemorySessionStore;
use galaxy_test_support::{FixedClock, MockRng, SequenceRng};
use http_body_util::BodyExt;
use tower::ServiceExt;

use galaxy_api::build_router;
use galaxy_api::state::AppState;

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// A fresh in-memory store on the fixed clock.
pub fn memory_store() -> Arc<InMemorySessionStore> {
    Arc::new(InMemorySessionStore::new(fixed_clock()))
}

/// Build the full app router with the given store and oracle. Session ids are
/// minted from `MockRng`, so the first new session is `"0000000000000000"`.
pub fn build_test_app(store: Arc<dyn SessionStore>, oracle: Arc<dyn OracleClient>) -> Router {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
    build_router(AppState::new(store, oracle, rng))
}

/// Build the full app router with a custom `SequenceRng` for tests that need
/// specific session ids.
pub fn build_test_app_with_rng(
    store: Arc<dyn SessionStore>,
    oracle: Arc<dyn OracleClient>,
    rng: SequenceRng,
) -> Router {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    build_router(AppState::new(store, oracle, rng))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_raw(app, uri, &serde_json::to_string(body).unwrap()).await
}

/// Send a POST request with a raw body labelled as JSON.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
