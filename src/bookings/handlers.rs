// HTTP handlers for booking endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::bookings::{
    AvailabilityResponse, BookingConfirmation, BookingError, BookingHistoryEntry, CheckoutState,
    ReviewSummary, SeatSelectionRequest, ShowtimeKey,
};

/// Handler for GET /api/bookings/availability
/// Occupied seats and capacities for a showtime (the seat-map view)
pub async fn availability_handler(
    State(state): State<crate::AppState>,
    Query(key): Query<ShowtimeKey>,
) -> Result<Json<AvailabilityResponse>, BookingError> {
    let availability = state.booking_service.availability(&key).await?;
    Ok(Json(availability))
}

/// Handler for POST /api/bookings/review
/// Validates and prices a selection without persisting anything
pub async fn review_selection_handler(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<SeatSelectionRequest>,
) -> Result<Json<ReviewSummary>, BookingError> {
    request
        .validate()
        .map_err(|e| BookingError::ValidationError(e.to_string()))?;

    let session_state = request
        .checkout_state
        .unwrap_or(CheckoutState::SelectingSeats);

    let summary = state
        .booking_service
        .review_selection(session_state, &request.showtime, &request.seats)
        .await?;

    Ok(Json(summary))
}

/// Handler for POST /api/bookings
/// Commits the booking for the authenticated user; all-or-nothing
pub async fn commit_booking_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Json(request): Json<SeatSelectionRequest>,
) -> Result<(StatusCode, Json<BookingConfirmation>), BookingError> {
    request
        .validate()
        .map_err(|e| BookingError::ValidationError(e.to_string()))?;

    let session_state = request.checkout_state.unwrap_or(CheckoutState::Reviewing);

    let confirmation = state
        .booking_service
        .commit_booking(session_state, user.user_id, &request.showtime, &request.seats)
        .await?;

    Ok((StatusCode::CREATED, Json(confirmation)))
}

/// Handler for GET /api/bookings
/// Booking history for the authenticated user
pub async fn booking_history_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<BookingHistoryEntry>>, BookingError> {
    let history = state.booking_service.booking_history(user.user_id).await?;
    Ok(Json(history))
}
