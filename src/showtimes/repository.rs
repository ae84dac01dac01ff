use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use crate::showtimes::error::ShowtimeError;
use crate::showtimes::models::{ListingRow, Showtime, ShowtimeSlot};

/// Repository for showtime catalog operations
#[derive(Clone)]
pub struct ShowtimesRepository {
    pool: PgPool,
}

impl ShowtimesRepository {
    /// Create a new ShowtimesRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All showtime start times already scheduled on a screen for a date
    pub async fn times_on_screen(
        &self,
        theater_id: i32,
        screen_id: i32,
        show_date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, ShowtimeError> {
        let times: Vec<NaiveTime> = sqlx::query_scalar(
            r#"
            SELECT show_time FROM showtimes
            WHERE theater_id = $1 AND screen_id = $2 AND show_date = $3
            ORDER BY show_time
            "#,
        )
        .bind(theater_id)
        .bind(screen_id)
        .bind(show_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(times)
    }

    /// Same as `times_on_screen` but excluding one slot — used when updating
    /// a showtime so it does not conflict with itself
    pub async fn times_on_screen_excluding(
        &self,
        theater_id: i32,
        screen_id: i32,
        show_date: NaiveDate,
        exclude: &ShowtimeSlot,
    ) -> Result<Vec<NaiveTime>, ShowtimeError> {
        let times: Vec<NaiveTime> = sqlx::query_scalar(
            r#"
            SELECT show_time FROM showtimes
            WHERE theater_id = $1 AND screen_id = $2 AND show_date = $3
              AND NOT (theater_id = $4 AND screen_id = $5 AND show_date = $6 AND show_time = $7)
            ORDER BY show_time
            "#,
        )
        .bind(theater_id)
        .bind(screen_id)
        .bind(show_date)
        .bind(exclude.theater_id)
        .bind(exclude.screen_id)
        .bind(exclude.show_date)
        .bind(exclude.show_time)
        .fetch_all(&self.pool)
        .await?;

        Ok(times)
    }

    /// Insert a showtime
    pub async fn insert(&self, showtime: &Showtime) -> Result<Showtime, ShowtimeError> {
        let created = sqlx::query_as::<_, Showtime>(
            r#"
            INSERT INTO showtimes (theater_id, movie_id, screen_id, show_date, show_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING theater_id, movie_id, screen_id, show_date, show_time
            "#,
        )
        .bind(showtime.theater_id)
        .bind(showtime.movie_id)
        .bind(showtime.screen_id)
        .bind(showtime.show_date)
        .bind(showtime.show_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find the showtime occupying a slot
    pub async fn find_by_slot(
        &self,
        slot: &ShowtimeSlot,
    ) -> Result<Option<Showtime>, ShowtimeError> {
        let showtime = sqlx::query_as::<_, Showtime>(
            r#"
            SELECT theater_id, movie_id, screen_id, show_date, show_time
            FROM showtimes
            WHERE theater_id = $1 AND screen_id = $2 AND show_date = $3 AND show_time = $4
            "#,
        )
        .bind(slot.theater_id)
        .bind(slot.screen_id)
        .bind(slot.show_date)
        .bind(slot.show_time)
        .fetch_optional(&self.pool)
        .await?;

        Ok(showtime)
    }

    /// Replace the showtime in a slot with new values
    pub async fn update(
        &self,
        target: &ShowtimeSlot,
        updated: &Showtime,
    ) -> Result<Showtime, ShowtimeError> {
        let showtime = sqlx::query_as::<_, Showtime>(
            r#"
            UPDATE showtimes
            SET theater_id = $1, movie_id = $2, screen_id = $3, show_date = $4, show_time = $5
            WHERE theater_id = $6 AND screen_id = $7 AND show_date = $8 AND show_time = $9
            RETURNING theater_id, movie_id, screen_id, show_date, show_time
            "#,
        )
        .bind(updated.theater_id)
        .bind(updated.movie_id)
        .bind(updated.screen_id)
        .bind(updated.show_date)
        .bind(updated.show_time)
        .bind(target.theater_id)
        .bind(target.screen_id)
        .bind(target.show_date)
        .bind(target.show_time)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ShowtimeError::NotFound)?;

        Ok(showtime)
    }

    /// Delete the showtime in a slot
    pub async fn delete(&self, slot: &ShowtimeSlot) -> Result<(), ShowtimeError> {
        let result = sqlx::query(
            r#"
            DELETE FROM showtimes
            WHERE theater_id = $1 AND screen_id = $2 AND show_date = $3 AND show_time = $4
            "#,
        )
        .bind(slot.theater_id)
        .bind(slot.screen_id)
        .bind(slot.show_date)
        .bind(slot.show_time)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ShowtimeError::NotFound);
        }

        Ok(())
    }

    /// Board rows for a theater on a date: each scheduled showing joined with
    /// its movie
    pub async fn listing_rows(
        &self,
        theater_id: i32,
        show_date: NaiveDate,
    ) -> Result<Vec<ListingRow>, ShowtimeError> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT m.movie_id, m.movie_name, m.genre, m.rating, m.run_time,
                   s.screen_id, s.show_time
            FROM showtimes s
            JOIN movies m ON m.movie_id = s.movie_id
            WHERE s.theater_id = $1 AND s.show_date = $2
            ORDER BY m.movie_id, s.show_time
            "#,
        )
        .bind(theater_id)
        .bind(show_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Check whether a movie exists
    pub async fn movie_exists(&self, movie_id: i32) -> Result<bool, ShowtimeError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM movies WHERE movie_id = $1)")
                .bind(movie_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }

    /// Check whether a screen exists within a theater
    pub async fn screen_exists(
        &self,
        theater_id: i32,
        screen_id: i32,
    ) -> Result<bool, ShowtimeError> {
        let exists: Option<bool> = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM screens WHERE theater_id = $1 AND screen_id = $2)",
        )
        .bind(theater_id)
        .bind(screen_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    // Query paths here need a live Postgres; the scheduling rules they feed
    // are unit-tested in schedule.rs and service-level behavior belongs to
    // the integration suite.
}
