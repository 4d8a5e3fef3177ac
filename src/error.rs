//! Error types for Biblio server
//!
//! Every failure is funneled through [`AppError`] and converted to the
//! uniform error envelope in one place. The request path, method and
//! timestamp fields of the envelope are stamped by [`envelope_errors`],
//! a router-level middleware.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::validation::snake_to_camel;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Distinct not-found kind raised on the delete path
    #[error("Not found while deleting: {0}")]
    NotFoundWhileDeleting(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed")]
    ValidationFailed(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    #[schema(value_type = Object)]
    pub error: Value,
    pub path: String,
    pub method: String,
    pub timestamp: String,
}

/// Status, message and error detail carried from [`AppError`] to the
/// envelope middleware through response extensions
#[derive(Clone)]
struct ErrorParts {
    message: String,
    error: Value,
}

static UNIQUE_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Key \((.*?)\)=").unwrap());

impl AppError {
    /// The single mapping table from failure kind to status/message/detail
    fn parts(&self) -> (StatusCode, String, Value) {
        match self {
            AppError::NotFound(msg) | AppError::NotFoundWhileDeleting(msg) => {
                (StatusCode::NOT_FOUND, msg.clone(), Value::String(msg.clone()))
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), Value::String(msg.clone()))
            }
            AppError::ValidationFailed(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                json!(flatten_validation_errors(errors)),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), Value::String(msg.clone()))
            }
            AppError::Database(e) => database_error_parts(e),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Value::String(msg.clone()),
                )
            }
        }
    }
}

/// Map storage failures onto the envelope, decoding the Postgres
/// constraint-violation codes
fn database_error_parts(e: &sqlx::Error) -> (StatusCode, String, Value) {
    if let sqlx::Error::Database(db) = e {
        let pg = db.try_downcast_ref::<sqlx::postgres::PgDatabaseError>();
        match db.code().as_deref() {
            // Unique constraint violation
            Some("23505") => {
                let detail = pg.and_then(|p| p.detail()).unwrap_or("");
                let field = UNIQUE_KEY_RE
                    .captures(detail)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
                    .or_else(|| db.constraint().map(String::from))
                    .unwrap_or_else(|| "field".to_string());
                (
                    StatusCode::CONFLICT,
                    "Duplicate entry found".to_string(),
                    Value::String(format!("{} already exists", field)),
                )
            }
            // Foreign key constraint violation
            Some("23503") => {
                let detail = pg
                    .and_then(|p| p.detail())
                    .unwrap_or("Referenced entity does not exist");
                (
                    StatusCode::BAD_REQUEST,
                    "Foreign key constraint violation".to_string(),
                    Value::String(detail.to_string()),
                )
            }
            // Not null constraint violation
            Some("23502") => {
                let column = pg.and_then(|p| p.column()).unwrap_or("field");
                (
                    StatusCode::BAD_REQUEST,
                    "Missing required field".to_string(),
                    Value::String(format!("{} is required", column)),
                )
            }
            _ => {
                tracing::error!("Database query failed: {:?}", db);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Database query failed".to_string(),
                    Value::String(db.message().to_string()),
                )
            }
        }
    } else {
        tracing::error!("Database error: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database operation failed".to_string(),
            Value::String(e.to_string()),
        )
    }
}

/// Flatten field-level validation errors into `{field: [messages]}`,
/// reporting fields under their wire (camelCase) names
fn flatten_validation_errors(errors: &ValidationErrors) -> IndexMap<String, Vec<String>> {
    let mut map = IndexMap::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        map.insert(snake_to_camel(field), messages);
    }
    map
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = self.parts();

        // Path and method are filled in by the envelope middleware; the
        // body built here is complete for callers outside the router
        let body = ErrorResponse {
            success: false,
            status_code: status.as_u16(),
            message: message.clone(),
            error: error.clone(),
            path: String::new(),
            method: String::new(),
            timestamp: iso_timestamp(),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorParts { message, error });
        response
    }
}

/// Router middleware rewriting every error response into the uniform
/// envelope, stamped with the request path, method and a timestamp.
///
/// Responses produced by [`AppError`] carry their message and detail in an
/// extension; anything else (framework rejections included) is rebuilt from
/// its own body text and status.
pub async fn envelope_errors(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let parts = response.extensions().get::<ErrorParts>().cloned();
    let (message, error) = match parts {
        Some(p) => (p.message, p.error),
        None => {
            let bytes = to_bytes(response.into_body(), 64 * 1024)
                .await
                .unwrap_or_default();
            let text = String::from_utf8_lossy(&bytes).trim().to_string();
            let message = if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("An unexpected error occurred")
                    .to_string()
            } else {
                text
            };
            (message.clone(), Value::String(message))
        }
    };

    tracing::error!(%method, %path, status = status.as_u16(), %message, "Request failed");

    let body = ErrorResponse {
        success: false,
        status_code: status.as_u16(),
        message,
        error,
        path,
        method,
        timestamp: iso_timestamp(),
    };

    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap_or_default()))
        .unwrap_or_else(|_| (status, Json(json!({"success": false}))).into_response())
}

fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
