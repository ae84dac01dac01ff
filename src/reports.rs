// Admin reporting: the aggregate counts and revenue figures for the
// dashboard, expressed as plain read queries over the booking data.

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::auth::AdminUser;
use crate::error::ApiError;

/// Revenue attributed to one movie
#[derive(Debug, Serialize, FromRow)]
pub struct MovieRevenue {
    pub movie_id: i32,
    pub movie_name: String,
    pub rdate: chrono::NaiveDate,
    pub total_revenue: Decimal,
}

/// Revenue attributed to one theater
#[derive(Debug, Serialize, FromRow)]
pub struct TheaterRevenue {
    pub theater_id: i32,
    pub theater_name: String,
    pub location: String,
    pub total_revenue: Decimal,
}

/// The admin dashboard aggregate
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub movie_count: i64,
    pub theater_count: i64,
    pub active_users: i64,
    pub movie_revenue: Vec<MovieRevenue>,
    pub theater_revenue: Vec<TheaterRevenue>,
}

/// Repository for reporting queries
#[derive(Clone)]
pub struct ReportsRepository {
    pool: PgPool,
}

impl ReportsRepository {
    /// Create a new ReportsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Per-movie revenue over all committed bookings
    pub async fn movie_revenue(&self) -> Result<Vec<MovieRevenue>, ApiError> {
        let rows = sqlx::query_as::<_, MovieRevenue>(
            r#"
            SELECT m.movie_id, m.movie_name, m.rdate,
                   COALESCE(SUM(b.price), 0) AS total_revenue
            FROM movies m
            LEFT JOIN bookings b ON b.movie_id = m.movie_id
            GROUP BY m.movie_id, m.movie_name, m.rdate
            ORDER BY m.movie_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Per-theater revenue over all committed bookings
    pub async fn theater_revenue(&self) -> Result<Vec<TheaterRevenue>, ApiError> {
        let rows = sqlx::query_as::<_, TheaterRevenue>(
            r#"
            SELECT t.theater_id, t.theater_name, t.location,
                   COALESCE(SUM(b.price), 0) AS total_revenue
            FROM theaters t
            LEFT JOIN bookings b ON b.theater_id = t.theater_id
            GROUP BY t.theater_id, t.theater_name, t.location
            ORDER BY t.theater_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Number of movies in the catalog
    pub async fn movie_count(&self) -> Result<i64, ApiError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of theaters in the catalog
    pub async fn theater_count(&self) -> Result<i64, ApiError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM theaters")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of distinct users with at least one booking
    pub async fn active_users(&self) -> Result<i64, ApiError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT user_id) FROM bookings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Handler for GET /api/admin/dashboard (admin only)
pub async fn dashboard_handler(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
) -> Result<Json<DashboardReport>, ApiError> {
    let reports = &state.reports;

    let report = DashboardReport {
        movie_count: reports.movie_count().await?,
        theater_count: reports.theater_count().await?,
        active_users: reports.active_users().await?,
        movie_revenue: reports.movie_revenue().await?,
        theater_revenue: reports.theater_revenue().await?,
    };

    Ok(Json(report))
}
