use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveTime;
use serde_json::json;

/// Error types for showtime scheduling operations
#[derive(Debug, thiserror::Error)]
pub enum ShowtimeError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Showtime not found")]
    NotFound,

    #[error("{resource} with id {id} not found")]
    MissingReference { resource: &'static str, id: String },

    #[error("Schedule conflict with existing showtime at {existing}")]
    ScheduleConflict { existing: NaiveTime },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for ShowtimeError {
    fn from(err: sqlx::Error) -> Self {
        ShowtimeError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for ShowtimeError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ShowtimeError::DatabaseError(msg) => {
                tracing::error!("Showtime database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ShowtimeError::NotFound => {
                (StatusCode::NOT_FOUND, "Showtime not found".to_string())
            }
            ShowtimeError::MissingReference { resource, id } => (
                StatusCode::NOT_FOUND,
                format!("{} with id {} not found", resource, id),
            ),
            ShowtimeError::ScheduleConflict { existing } => (
                StatusCode::CONFLICT,
                format!(
                    "Showtimes on the same screen must be at least 60 minutes apart; conflicts with existing showtime at {}",
                    existing
                ),
            ),
            ShowtimeError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
