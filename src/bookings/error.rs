use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for the booking transaction core
///
/// Validation-class errors (showtime/seat problems) go back to the caller
/// for a user-facing retry; persistence failures roll the transaction back
/// and surface as retryable 5xx.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Showtime not found")]
    ShowtimeNotFound,

    #[error("Invalid seat: {0}")]
    InvalidSeat(String),

    #[error("Seat unavailable: {0}")]
    SeatUnavailable(String),

    #[error("Selection must contain at least one seat")]
    EmptySelection,

    #[error("Invalid checkout transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        BookingError::PersistenceError(err.to_string())
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            BookingError::PersistenceError(msg) => {
                tracing::error!("Booking persistence error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred; the booking was not created. Please retry."
                        .to_string(),
                )
            }
            BookingError::ShowtimeNotFound => {
                (StatusCode::NOT_FOUND, "Showtime not found".to_string())
            }
            BookingError::InvalidSeat(msg) => {
                (StatusCode::BAD_REQUEST, format!("Invalid seat: {}", msg))
            }
            BookingError::SeatUnavailable(seat) => (
                StatusCode::CONFLICT,
                format!("Seat {} is no longer available", seat),
            ),
            BookingError::EmptySelection => (
                StatusCode::BAD_REQUEST,
                "Selection must contain at least one seat".to_string(),
            ),
            BookingError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg),
            BookingError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
