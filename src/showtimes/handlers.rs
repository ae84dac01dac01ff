// HTTP handlers for showtime catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::AdminUser;
use crate::showtimes::{
    MovieShowings, ScheduleShowtimeRequest, Showtime, ShowtimeError, ShowtimeSlot,
    UpdateShowtimeRequest,
};

/// Query parameters identifying a showtime slot
#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub theater_id: i32,
    pub screen_id: i32,
    pub show_date: NaiveDate,
    pub show_time: chrono::NaiveTime,
}

impl From<SlotQuery> for ShowtimeSlot {
    fn from(q: SlotQuery) -> Self {
        ShowtimeSlot {
            theater_id: q.theater_id,
            screen_id: q.screen_id,
            show_date: q.show_date,
            show_time: q.show_time,
        }
    }
}

/// Query parameters for the theater board listing
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    pub date: NaiveDate,
}

/// Handler for POST /api/showtimes (admin only)
/// Schedules a showtime; 409 when the minimum gap is violated
pub async fn schedule_showtime_handler(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Json(request): Json<ScheduleShowtimeRequest>,
) -> Result<(StatusCode, Json<Showtime>), ShowtimeError> {
    let showtime = state.showtime_service.schedule_showtime(request).await?;
    Ok((StatusCode::CREATED, Json(showtime)))
}

/// Handler for GET /api/showtimes
/// Looks up the showtime occupying a slot
pub async fn lookup_showtime_handler(
    State(state): State<crate::AppState>,
    Query(slot): Query<SlotQuery>,
) -> Result<Json<Showtime>, ShowtimeError> {
    let showtime = state.showtime_service.lookup_showtime(&slot.into()).await?;
    Ok(Json(showtime))
}

/// Handler for PUT /api/showtimes (admin only)
/// Re-validates the gap constraint excluding the record being updated
pub async fn update_showtime_handler(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Json(request): Json<UpdateShowtimeRequest>,
) -> Result<Json<Showtime>, ShowtimeError> {
    let showtime = state.showtime_service.update_showtime(request).await?;
    Ok(Json(showtime))
}

/// Handler for DELETE /api/showtimes (admin only)
pub async fn delete_showtime_handler(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Query(slot): Query<SlotQuery>,
) -> Result<StatusCode, ShowtimeError> {
    state.showtime_service.delete_showtime(&slot.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /api/theaters/{id}/board?date=YYYY-MM-DD
/// The theater's showings for a date, grouped per movie
pub async fn theater_board_handler(
    State(state): State<crate::AppState>,
    Path(theater_id): Path<i32>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<Vec<MovieShowings>>, ShowtimeError> {
    let board = state.showtime_service.board(theater_id, query.date).await?;
    Ok(Json(board))
}
