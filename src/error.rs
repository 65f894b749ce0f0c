use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Malformed session input. Raised at entry time and by every calculator
/// function that reads a session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Duration must be greater than 0 (got {0})")]
    NonPositiveDuration(f64),
    #[error("{field} must be >= 0 (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be at most {max} (got {value})")]
    TooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
    #[error("Perceived effort must be 1-10 (got {0})")]
    EffortOutOfRange(i64),
    #[error("Unknown session type: {0}")]
    UnknownType(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid session: {0}")]
    Session(#[from] SessionError),
    #[error("Session not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Session(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
