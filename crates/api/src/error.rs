use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use entidto_core::{ConvertError, ValidationError};
use entidto_db::{FetchError, StoreError};
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{ "error": ..., "code": ... }`, with a `details` list for
/// validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request values failed transfer object validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A conversion between representations failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// A stored-object lookup failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Validation(err) => validation_parts(err),
            AppError::Convert(err) => classify_convert_error(err),
            AppError::Fetch(FetchError::Convert(err)) => classify_convert_error(err),
            AppError::Fetch(FetchError::Store(err)) => classify_store_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}

type Parts = (StatusCode, &'static str, String, Option<Value>);

fn internal() -> Parts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
        None,
    )
}

fn validation_parts(err: &ValidationError) -> Parts {
    let details = err
        .issues
        .iter()
        .map(|issue| {
            json!({
                "field": issue.field,
                "kind": issue.kind.as_str(),
                "message": issue.message,
            })
        })
        .collect();

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        "VALIDATION_ERROR",
        format!("Invalid {}", err.model),
        Some(Value::Array(details)),
    )
}

/// Only validation failures are client errors; other conversion failures
/// map to 500.
fn classify_convert_error(err: &ConvertError) -> Parts {
    match err {
        ConvertError::Validation(inner) => validation_parts(inner),
        other => {
            tracing::error!(error = %other, "Conversion error");
            internal()
        }
    }
}

fn classify_store_error(err: &StoreError) -> Parts {
    match err {
        StoreError::DoesNotExist { model, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{model} not found"),
            None,
        ),
        StoreError::MultipleObjects { model, field, .. } => (
            StatusCode::CONFLICT,
            "MULTIPLE_OBJECTS",
            format!("More than one {model} matches the given {field}"),
            None,
        ),
        other => {
            tracing::error!(error = %other, "Store error");
            internal()
        }
    }
}
