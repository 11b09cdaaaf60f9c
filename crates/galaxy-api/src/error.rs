//! Galaxy of Consequence — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use galaxy_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Message returned for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// Tracing subscriber or exporter setup failed.
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub message: String,
    /// The first invalid request field, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            DomainError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message,
                    field: Some(field),
                },
            ),
            DomainError::SessionNotFound(session_id) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: format!("session not found: {session_id}"),
                    field: None,
                },
            ),
            err => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: INTERNAL_ERROR_MESSAGE.to_owned(),
                        field: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
