// src/error.rs

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{airtable::AirtableError, cache::CacheError};

/// Message returned for every failed authentication, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "L'adresse e-mail et/ou le mot de passe saisi(s) sont incorrects.";

/// Global Application Error Enum.
/// Centralizes error handling and mapping to JSON:API error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 500 Internal Server Error
    #[error("Internal error: {0}")]
    InternalServerError(String),

    // 500, raised at startup only
    #[error("Configuration error: {0}")]
    Config(String),

    // 400 Bad Request
    #[error("Bad request: {0}")]
    BadRequest(String),

    // 400 with the fixed authentication message
    #[error("Invalid credentials")]
    InvalidCredentials,

    // 400, one error object per invalid attribute
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // 401 Unauthorized
    #[error("Unauthorized: {0}")]
    AuthError(String),

    // 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),

    // 409 Conflict (e.g., duplicate answer or email)
    #[error("Conflict: {0}")]
    Conflict(String),

    // 502, the content provider failed
    #[error(transparent)]
    ContentProvider(AirtableError),

    // 500, the cache failed
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InternalServerError(_) | AppError::Config(_) | AppError::Cache(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadRequest(_) | AppError::InvalidCredentials | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ContentProvider(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Builds the JSON:API error objects for this error.
    fn error_objects(&self) -> Vec<Value> {
        let status = self.status();
        let code = status.as_u16().to_string();

        match self {
            AppError::InvalidCredentials => vec![json!({
                "status": code,
                "title": "Invalid Payload",
                "detail": INVALID_CREDENTIALS_MESSAGE,
                "source": { "pointer": "/data/attributes" },
            })],
            AppError::Validation(errors) => {
                let mut objects: Vec<Value> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, field_errors)| {
                        let pointer = format!("/data/attributes/{}", field.replace('_', "-"));
                        let code = code.clone();
                        field_errors.iter().map(move |e| {
                            let detail = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            json!({
                                "status": code,
                                "title": "Invalid Attribute",
                                "detail": detail,
                                "source": { "pointer": pointer },
                            })
                        })
                    })
                    .collect();
                // field_errors() is backed by a HashMap
                objects.sort_by(|a, b| {
                    a["source"]["pointer"]
                        .as_str()
                        .cmp(&b["source"]["pointer"].as_str())
                });
                objects
            }
            AppError::InternalServerError(_) | AppError::Config(_) | AppError::Cache(_) => {
                tracing::error!("Internal Server Error: {}", self);
                vec![json!({
                    "status": code,
                    "title": "Internal Server Error",
                    "detail": "Internal Server Error",
                })]
            }
            AppError::ContentProvider(err) => {
                tracing::error!("Content provider error: {}", err);
                vec![json!({
                    "status": code,
                    "title": "Bad Gateway",
                    "detail": "Content provider unavailable",
                })]
            }
            AppError::BadRequest(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => vec![json!({
                "status": code,
                "title": status.canonical_reason().unwrap_or("Error"),
                "detail": msg,
            })],
        }
    }
}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON:API error document with the matching status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "errors": self.error_objects() }));
        (self.status(), body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError`.
/// Unique constraint violations become `Conflict`; anything else is internal.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Resource already exists".to_string())
            }
            _ => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Malformed or mistyped request bodies are reported as 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<AirtableError> for AppError {
    fn from(err: AirtableError) -> Self {
        match err {
            AirtableError::NotFound { table, id } => {
                AppError::NotFound(format!("Record '{}' not found in '{}'", id, table))
            }
            other => AppError::ContentProvider(other),
        }
    }
}
