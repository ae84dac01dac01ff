use sqlx::PgPool;

use crate::theaters::error::TheaterError;
use crate::theaters::models::{CreateScreenRequest, Screen, Theater};

/// Repository for theater and screen operations
#[derive(Clone)]
pub struct TheatersRepository {
    pool: PgPool,
}

impl TheatersRepository {
    /// Create a new TheatersRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a theater together with its screens in a transaction
    pub async fn create(
        &self,
        theater_name: &str,
        location: &str,
        screens: &[CreateScreenRequest],
    ) -> Result<Theater, TheaterError> {
        let mut tx = self.pool.begin().await?;

        let theater = sqlx::query_as::<_, Theater>(
            r#"
            INSERT INTO theaters (theater_name, location)
            VALUES ($1, $2)
            RETURNING theater_id, theater_name, location
            "#,
        )
        .bind(theater_name)
        .bind(location)
        .fetch_one(&mut *tx)
        .await?;

        for screen in screens {
            sqlx::query(
                r#"
                INSERT INTO screens (theater_id, screen_id, screen_name, elite_seats, premium_seats)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(theater.theater_id)
            .bind(screen.screen_id)
            .bind(&screen.screen_name)
            .bind(screen.elite_seats)
            .bind(screen.premium_seats)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(theater)
    }

    /// Find all theaters
    pub async fn find_all(&self) -> Result<Vec<Theater>, TheaterError> {
        let theaters = sqlx::query_as::<_, Theater>(
            "SELECT theater_id, theater_name, location FROM theaters ORDER BY theater_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(theaters)
    }

    /// Find a theater by ID
    pub async fn find_by_id(&self, theater_id: i32) -> Result<Option<Theater>, TheaterError> {
        let theater = sqlx::query_as::<_, Theater>(
            "SELECT theater_id, theater_name, location FROM theaters WHERE theater_id = $1",
        )
        .bind(theater_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(theater)
    }

    /// Find all screens of a theater
    pub async fn screens_for(&self, theater_id: i32) -> Result<Vec<Screen>, TheaterError> {
        let screens = sqlx::query_as::<_, Screen>(
            r#"
            SELECT theater_id, screen_id, screen_name, elite_seats, premium_seats
            FROM screens
            WHERE theater_id = $1
            ORDER BY screen_id
            "#,
        )
        .bind(theater_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(screens)
    }

    /// Update a theater's name and location
    pub async fn update(
        &self,
        theater_id: i32,
        theater_name: &str,
        location: &str,
    ) -> Result<Theater, TheaterError> {
        let theater = sqlx::query_as::<_, Theater>(
            r#"
            UPDATE theaters
            SET theater_name = $1, location = $2
            WHERE theater_id = $3
            RETURNING theater_id, theater_name, location
            "#,
        )
        .bind(theater_name)
        .bind(location)
        .bind(theater_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(TheaterError::NotFound)?;

        Ok(theater)
    }

    /// Check whether any showtime still references the theater
    pub async fn has_showtimes(&self, theater_id: i32) -> Result<bool, TheaterError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM showtimes WHERE theater_id = $1)")
                .bind(theater_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }

    /// Delete a theater and its screens, leaving showtimes untouched
    ///
    /// The caller must have established that no showtimes reference the
    /// theater; the FK constraint backs that check up.
    pub async fn delete(&self, theater_id: i32) -> Result<(), TheaterError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM screens WHERE theater_id = $1")
            .bind(theater_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM theaters WHERE theater_id = $1")
            .bind(theater_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TheaterError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    /// Explicit cascade delete: showtimes, screens, then the theater itself,
    /// all in one transaction
    pub async fn delete_cascade(&self, theater_id: i32) -> Result<(), TheaterError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM showtimes WHERE theater_id = $1")
            .bind(theater_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM screens WHERE theater_id = $1")
            .bind(theater_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM theaters WHERE theater_id = $1")
            .bind(theater_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TheaterError::NotFound);
        }

        tx.commit().await?;

        tracing::info!("Cascade-deleted theater {} with screens and showtimes", theater_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Repository methods run against a live Postgres; they are covered by the
    // service-level integration suite rather than unit tests here.
}
