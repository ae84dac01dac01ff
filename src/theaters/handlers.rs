// HTTP handlers for theater endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::AdminUser;
use crate::theaters::{
    CreateTheaterRequest, Screen, Theater, TheaterDetail, TheaterError, TheaterWithDistance,
    UpdateTheaterRequest,
};

/// Query parameters for the theater listing
#[derive(Debug, Deserialize)]
pub struct TheaterListQuery {
    /// Named location to sort by proximity from
    pub from: Option<String>,
}

/// Response shape for GET /api/theaters: plain or distance-sorted
#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
pub enum TheaterListResponse {
    Plain(Vec<Theater>),
    ByDistance(Vec<TheaterWithDistance>),
}

/// Handler for POST /api/theaters
/// Creates a theater with its screens (admin only)
pub async fn create_theater_handler(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Json(request): Json<CreateTheaterRequest>,
) -> Result<(StatusCode, Json<TheaterDetail>), TheaterError> {
    request
        .validate()
        .map_err(|e| TheaterError::ValidationError(e.to_string()))?;
    for screen in &request.screens {
        screen
            .validate()
            .map_err(|e| TheaterError::ValidationError(e.to_string()))?;
    }

    let theater = state.theater_service.create_theater(request).await?;

    Ok((StatusCode::CREATED, Json(theater)))
}

/// Handler for GET /api/theaters
/// Lists theaters, sorted by distance when `from` names a location
pub async fn list_theaters_handler(
    State(state): State<crate::AppState>,
    Query(query): Query<TheaterListQuery>,
) -> Result<Json<TheaterListResponse>, TheaterError> {
    let response = match query.from {
        Some(from) => TheaterListResponse::ByDistance(
            state.theater_service.list_theaters_by_distance(&from).await?,
        ),
        None => TheaterListResponse::Plain(state.theater_service.list_theaters().await?),
    };

    Ok(Json(response))
}

/// Handler for GET /api/theaters/{id}
pub async fn get_theater_handler(
    State(state): State<crate::AppState>,
    Path(theater_id): Path<i32>,
) -> Result<Json<TheaterDetail>, TheaterError> {
    let theater = state.theater_service.get_theater(theater_id).await?;
    Ok(Json(theater))
}

/// Handler for GET /api/theaters/{id}/screens
pub async fn list_screens_handler(
    State(state): State<crate::AppState>,
    Path(theater_id): Path<i32>,
) -> Result<Json<Vec<Screen>>, TheaterError> {
    let theater = state.theater_service.get_theater(theater_id).await?;
    Ok(Json(theater.screens))
}

/// Handler for PUT /api/theaters/{id} (admin only)
pub async fn update_theater_handler(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Path(theater_id): Path<i32>,
    Json(request): Json<UpdateTheaterRequest>,
) -> Result<Json<Theater>, TheaterError> {
    request
        .validate()
        .map_err(|e| TheaterError::ValidationError(e.to_string()))?;

    let theater = state
        .theater_service
        .update_theater(theater_id, request)
        .await?;

    Ok(Json(theater))
}

/// Handler for DELETE /api/theaters/{id} (admin only)
/// Rejected with 409 while showtimes reference the theater
pub async fn delete_theater_handler(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Path(theater_id): Path<i32>,
) -> Result<StatusCode, TheaterError> {
    state.theater_service.delete_theater(theater_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /api/theaters/{id}/cascade (admin only)
/// Explicit cascade removing showtimes and screens with the theater
pub async fn delete_theater_cascade_handler(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Path(theater_id): Path<i32>,
) -> Result<StatusCode, TheaterError> {
    state
        .theater_service
        .delete_theater_cascade(theater_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
