use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for theater and screen operations
#[derive(Debug, thiserror::Error)]
pub enum TheaterError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Theater not found")]
    NotFound,

    #[error("Screen not found")]
    ScreenNotFound,

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Theater is still scheduled for one or more showtimes")]
    ReferencedByShowtime,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for TheaterError {
    fn from(err: sqlx::Error) -> Self {
        TheaterError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for TheaterError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            TheaterError::DatabaseError(msg) => {
                tracing::error!("Theater database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            TheaterError::NotFound => (StatusCode::NOT_FOUND, "Theater not found".to_string()),
            TheaterError::ScreenNotFound => {
                (StatusCode::NOT_FOUND, "Screen not found".to_string())
            }
            TheaterError::UnknownLocation(loc) => (
                StatusCode::BAD_REQUEST,
                format!("Unknown location '{}'", loc),
            ),
            TheaterError::ReferencedByShowtime => (
                StatusCode::CONFLICT,
                "Theater is still scheduled for one or more showtimes".to_string(),
            ),
            TheaterError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
