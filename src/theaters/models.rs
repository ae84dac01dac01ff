use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Domain model representing a theater
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Theater {
    pub theater_id: i32,
    pub theater_name: String,
    /// One of the fixed named locations in `geo::LOCATIONS`
    pub location: String,
}

/// Domain model representing a screen within a theater
///
/// Screens are keyed by (theater_id, screen_id) and carry the per-tier seat
/// capacities that bound every seat label sold for them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Screen {
    pub theater_id: i32,
    pub screen_id: i32,
    pub screen_name: String,
    pub elite_seats: i32,
    pub premium_seats: i32,
}

/// Request DTO for one screen when creating a theater
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateScreenRequest {
    pub screen_id: i32,
    #[validate(length(min = 1, message = "Screen name must not be empty"))]
    pub screen_name: String,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub elite_seats: i32,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub premium_seats: i32,
}

/// Request DTO for creating a theater together with its screens
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTheaterRequest {
    #[validate(length(min = 1, message = "Theater name must not be empty"))]
    pub theater_name: String,
    pub location: String,
    #[validate(length(min = 1, message = "Theater must have at least one screen"))]
    pub screens: Vec<CreateScreenRequest>,
}

/// Request DTO for updating a theater
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTheaterRequest {
    #[validate(length(min = 1, message = "Theater name must not be empty"))]
    pub theater_name: Option<String>,
    pub location: Option<String>,
}

/// Response DTO for the proximity listing: a theater with its distance from
/// the caller's location, in whole kilometers
#[derive(Debug, Serialize)]
pub struct TheaterWithDistance {
    pub theater_id: i32,
    pub theater_name: String,
    pub location: String,
    pub distance_km: u32,
}

/// Response DTO for a theater with its screens
#[derive(Debug, Serialize)]
pub struct TheaterDetail {
    pub theater_id: i32,
    pub theater_name: String,
    pub location: String,
    pub screens: Vec<Screen>,
}
