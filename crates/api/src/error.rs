use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use enroll_core::error::{ValidationError, INVALID_FORM_MESSAGE};
use enroll_core::rules::ErrorMap;
use serde::Serialize;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
/// Every variant is a client error; the body never distinguishes a missing
/// field from a malformed one.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// One or more fields failed the rule set. Only the generic message is
    /// returned.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Same as [`AppError::Validation`], but the body also lists the failing
    /// fields and their messages.
    #[error("{0}")]
    DetailedValidation(ValidationError),

    /// The body could not be read as a JSON object at all.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a ErrorMap>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, fields) = match &self {
            AppError::Validation(_) => ("VALIDATION_ERROR", None),
            AppError::DetailedValidation(err) => ("VALIDATION_ERROR", Some(&err.errors)),
            AppError::MalformedBody(detail) => {
                tracing::debug!(error = %detail, "Rejected malformed request body");
                ("BAD_REQUEST", None)
            }
        };

        let body = ErrorBody {
            error: INVALID_FORM_MESSAGE,
            code,
            fields,
        };

        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}
