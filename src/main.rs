mod auth;
mod bookings;
mod db;
mod error;
mod models;
mod query;
mod reports;
mod showtimes;
mod theaters;
mod validation;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use bookings::{BookingService, BookingsRepository, PriceTable};
use error::ApiError;
use models::{CreateMovie, Movie, UpdateMovie};
use query::{QueryParams, QueryValidator};
use reports::ReportsRepository;
use showtimes::{ShowtimeService, ShowtimesRepository};
use theaters::{TheaterService, TheatersRepository};
use validator::Validate;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        create_movie,
        get_all_movies,
        get_movie_by_id,
        update_movie,
        delete_movie,
    ),
    components(
        schemas(Movie, CreateMovie, UpdateMovie)
    ),
    tags(
        (name = "movies", description = "Movie catalog management endpoints")
    ),
    info(
        title = "Cinema Booking API",
        version = "1.0.0",
        description = "RESTful API for movie, theater and showtime management and seat booking",
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub theater_service: TheaterService,
    pub showtime_service: ShowtimeService,
    pub booking_service: BookingService,
    pub reports: ReportsRepository,
}

impl AppState {
    /// Wire up repositories and services over one pool
    pub fn new(db: PgPool, prices: PriceTable) -> Self {
        let theater_service = TheaterService::new(TheatersRepository::new(db.clone()));
        let showtime_service = ShowtimeService::new(ShowtimesRepository::new(db.clone()));
        let booking_service = BookingService::new(BookingsRepository::new(db.clone()), prices);
        let reports = ReportsRepository::new(db.clone());

        Self {
            db,
            theater_service,
            showtime_service,
            booking_service,
            reports,
        }
    }
}

/// Handler for POST /api/movies
/// Creates a new movie
#[utoipa::path(
    post,
    path = "/api/movies",
    request_body = CreateMovie,
    responses(
        (status = 201, description = "Movie created successfully", body = Movie),
        (status = 400, description = "Invalid input data"),
        (status = 409, description = "Duplicate movie name"),
        (status = 500, description = "Internal server error")
    ),
    tag = "movies"
)]
async fn create_movie(
    State(state): State<AppState>,
    Json(payload): Json<CreateMovie>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    tracing::debug!("Creating new movie: {}", payload.movie_name);

    payload.validate()?;

    if db::check_duplicate_movie(&state.db, &payload.movie_name).await? {
        tracing::warn!("Attempt to create duplicate movie: {}", payload.movie_name);
        return Err(ApiError::Conflict {
            message: format!("Movie with name '{}' already exists", payload.movie_name),
        });
    }

    let movie = sqlx::query_as::<_, Movie>(
        r#"
        INSERT INTO movies (movie_name, genre, rating, description, url, run_time, rdate)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING movie_id, movie_name, genre, rating, description, url, run_time, rdate
        "#,
    )
    .bind(&payload.movie_name)
    .bind(&payload.genre)
    .bind(payload.rating)
    .bind(&payload.description)
    .bind(&payload.url)
    .bind(payload.run_time)
    .bind(payload.rdate)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Successfully created movie with id: {}", movie.movie_id);
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Handler for GET /api/movies
/// Supports search, genre filter, rating range, sorting, and pagination
#[utoipa::path(
    get,
    path = "/api/movies",
    responses(
        (status = 200, description = "List of movies", body = Vec<Movie>),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "movies"
)]
async fn get_all_movies(
    Query(params): Query<QueryParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    tracing::debug!("Fetching movies with query parameters: {:?}", params);

    let validated =
        QueryValidator::validate(params).map_err(|e| ApiError::InvalidQuery(e.message))?;

    let mut builder = query::SQLQueryBuilder::new();

    if let Some(search) = validated.search {
        builder.add_search_filter(&search);
    }
    if let Some(genre) = validated.genre {
        builder.add_genre_filter(&genre);
    }
    builder.add_rating_range(validated.min_rating, validated.max_rating);

    if let Some(sort_field) = validated.sort_field {
        builder.set_sort(sort_field, validated.sort_order);
    }

    builder.set_pagination(validated.page, validated.limit);

    let (query_str, params) = builder.build();

    let mut query = sqlx::query_as::<_, Movie>(&query_str);
    for param in params {
        query = query.bind(param);
    }

    let movies = query.fetch_all(&state.db).await?;

    tracing::debug!("Query returned {} movies", movies.len());
    Ok(Json(movies))
}

/// Handler for GET /api/movies/:id
#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie found", body = Movie),
        (status = 404, description = "Movie not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "movies"
)]
async fn get_movie_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Movie>, ApiError> {
    tracing::debug!("Fetching movie with id: {}", id);

    let movie = sqlx::query_as::<_, Movie>(
        r#"
        SELECT movie_id, movie_name, genre, rating, description, url, run_time, rdate
        FROM movies
        WHERE movie_id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::NotFound {
        resource: "Movie".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(movie))
}

/// Handler for PUT /api/movies/:id
/// Updates an existing movie; the multi-step check-and-write runs in a
/// transaction so a concurrent rename cannot slip past the duplicate check
#[utoipa::path(
    put,
    path = "/api/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    request_body = UpdateMovie,
    responses(
        (status = 200, description = "Movie updated successfully", body = Movie),
        (status = 400, description = "Invalid input data"),
        (status = 404, description = "Movie not found"),
        (status = 409, description = "Duplicate movie name"),
        (status = 500, description = "Internal server error")
    ),
    tag = "movies"
)]
async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMovie>,
) -> Result<Json<Movie>, ApiError> {
    tracing::debug!("Updating movie with id: {}", id);

    payload.validate()?;

    let mut tx = state.db.begin().await?;

    let existing = sqlx::query_as::<_, Movie>(
        "SELECT movie_id, movie_name, genre, rating, description, url, run_time, rdate FROM movies WHERE movie_id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::NotFound {
        resource: "Movie".to_string(),
        id: id.to_string(),
    })?;

    if let Some(ref new_name) = payload.movie_name {
        if new_name != &existing.movie_name {
            let duplicate_exists: Option<bool> = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM movies WHERE movie_name = $1 AND movie_id != $2)",
            )
            .bind(new_name)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            if duplicate_exists.unwrap_or(false) {
                tracing::warn!("Attempt to rename movie {} to duplicate name: {}", id, new_name);
                return Err(ApiError::Conflict {
                    message: format!("Movie with name '{}' already exists", new_name),
                });
            }
        }
    }

    let updated_movie = sqlx::query_as::<_, Movie>(
        r#"
        UPDATE movies
        SET movie_name = $1,
            genre = $2,
            rating = $3,
            description = $4,
            url = $5,
            run_time = $6,
            rdate = $7
        WHERE movie_id = $8
        RETURNING movie_id, movie_name, genre, rating, description, url, run_time, rdate
        "#,
    )
    .bind(payload.movie_name.unwrap_or(existing.movie_name))
    .bind(payload.genre.unwrap_or(existing.genre))
    .bind(payload.rating.unwrap_or(existing.rating))
    .bind(payload.description.unwrap_or(existing.description))
    .bind(payload.url.unwrap_or(existing.url))
    .bind(payload.run_time.unwrap_or(existing.run_time))
    .bind(payload.rdate.unwrap_or(existing.rdate))
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Successfully updated movie with id: {}", id);
    Ok(Json(updated_movie))
}

/// Handler for DELETE /api/movies/:id
/// Deletion is rejected while any showtime references the movie
#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 204, description = "Movie deleted successfully"),
        (status = 404, description = "Movie not found"),
        (status = 409, description = "Movie is still scheduled for showtimes"),
        (status = 500, description = "Internal server error")
    ),
    tag = "movies"
)]
async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!("Deleting movie with id: {}", id);

    if db::movie_referenced_by_showtimes(&state.db, id).await? {
        return Err(ApiError::ReferencedByShowtime {
            resource: "Movie".to_string(),
            id: id.to_string(),
        });
    }

    let result = sqlx::query("DELETE FROM movies WHERE movie_id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound {
            resource: "Movie".to_string(),
            id: id.to_string(),
        });
    }

    tracing::info!("Successfully deleted movie with id: {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Movie catalog
        .route("/api/movies", post(create_movie))
        .route("/api/movies", get(get_all_movies))
        .route("/api/movies/:id", get(get_movie_by_id))
        .route("/api/movies/:id", put(update_movie))
        .route("/api/movies/:id", delete(delete_movie))
        // Theaters and screens
        .route("/api/theaters", post(theaters::create_theater_handler))
        .route("/api/theaters", get(theaters::list_theaters_handler))
        .route("/api/theaters/:id", get(theaters::get_theater_handler))
        .route("/api/theaters/:id", put(theaters::update_theater_handler))
        .route("/api/theaters/:id", delete(theaters::delete_theater_handler))
        .route(
            "/api/theaters/:id/cascade",
            delete(theaters::delete_theater_cascade_handler),
        )
        .route(
            "/api/theaters/:id/screens",
            get(theaters::list_screens_handler),
        )
        .route(
            "/api/theaters/:id/board",
            get(showtimes::theater_board_handler),
        )
        // Showtime catalog
        .route("/api/showtimes", post(showtimes::schedule_showtime_handler))
        .route("/api/showtimes", get(showtimes::lookup_showtime_handler))
        .route("/api/showtimes", put(showtimes::update_showtime_handler))
        .route("/api/showtimes", delete(showtimes::delete_showtime_handler))
        // Bookings
        .route(
            "/api/bookings/availability",
            get(bookings::availability_handler),
        )
        .route("/api/bookings/review", post(bookings::review_selection_handler))
        .route("/api/bookings", post(bookings::commit_booking_handler))
        .route("/api/bookings", get(bookings::booking_history_handler))
        // Admin reporting
        .route("/api/admin/dashboard", get(reports::dashboard_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Cinema API - Starting...");

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Seat rates are configuration; defaults match the historical tariff
    let prices = PriceTable::from_env();

    let app = create_router(AppState::new(db_pool, prices));

    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Cinema API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
