use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents a movie in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movie {
    #[schema(example = 1)]
    pub movie_id: i32,
    #[schema(example = "Interstellar")]
    pub movie_name: String,
    #[schema(example = "Sci-Fi")]
    pub genre: String,
    #[schema(example = 8.6, minimum = 0.0, maximum = 10.0)]
    pub rating: f64,
    #[schema(example = "A team travels through a wormhole in search of a new home")]
    pub description: String,
    /// Poster/media reference
    #[schema(example = "https://posters.example/interstellar.jpg")]
    pub url: String,
    /// Runtime in minutes
    #[schema(example = 169)]
    pub run_time: i32,
    /// Release date
    pub rdate: NaiveDate,
}

/// Represents the data needed to create a new movie
///
/// Used for POST /api/movies requests. movie_id is auto-generated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateMovie {
    #[schema(example = "Interstellar")]
    #[validate(length(min = 1, message = "Movie name must not be empty"))]
    pub movie_name: String,
    #[schema(example = "Sci-Fi")]
    #[validate(length(min = 1, message = "Genre must not be empty"))]
    pub genre: String,
    #[schema(example = 8.6, minimum = 0.0, maximum = 10.0)]
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"))]
    pub rating: f64,
    #[schema(example = "A team travels through a wormhole in search of a new home")]
    pub description: String,
    #[schema(example = "https://posters.example/interstellar.jpg")]
    pub url: String,
    /// Runtime in minutes
    #[schema(example = 169)]
    #[validate(range(min = 1, message = "Runtime must be at least one minute"))]
    pub run_time: i32,
    pub rdate: NaiveDate,
}

/// Represents the data for updating an existing movie
///
/// Used for PUT /api/movies/{id} requests.
/// All fields are optional to support partial updates.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateMovie {
    #[schema(example = "Updated Name")]
    #[validate(length(min = 1, message = "Movie name must not be empty"))]
    pub movie_name: Option<String>,
    #[schema(example = "Drama")]
    pub genre: Option<String>,
    #[schema(example = 7.9, minimum = 0.0, maximum = 10.0)]
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"))]
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub url: Option<String>,
    /// Runtime in minutes
    #[validate(range(min = 1, message = "Runtime must be at least one minute"))]
    pub run_time: Option<i32>,
    pub rdate: Option<NaiveDate>,
}
