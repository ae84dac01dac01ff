use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::bookings::error::BookingError;
use crate::bookings::models::{Booking, ScreenCapacity, ShowtimeKey};
use crate::bookings::seat_inventory::{parse_occupied, ValidatedSelection};

/// Repository for booking persistence and seat occupancy
#[derive(Clone)]
pub struct BookingsRepository {
    pool: PgPool,
}

impl BookingsRepository {
    /// Create a new BookingsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether the showtime identified by the key is scheduled
    pub async fn showtime_exists(&self, key: &ShowtimeKey) -> Result<bool, BookingError> {
        let exists: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
              SELECT 1 FROM showtimes
              WHERE movie_id = $1 AND theater_id = $2 AND screen_id = $3
                AND show_date = $4 AND show_time = $5
            )
            "#,
        )
        .bind(key.movie_id)
        .bind(key.theater_id)
        .bind(key.screen_id)
        .bind(key.show_date)
        .bind(key.show_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.unwrap_or(false))
    }

    /// Per-tier capacities of the screen a showtime plays on
    pub async fn screen_capacity(
        &self,
        theater_id: i32,
        screen_id: i32,
    ) -> Result<Option<ScreenCapacity>, BookingError> {
        let capacity = sqlx::query_as::<_, ScreenCapacity>(
            "SELECT elite_seats, premium_seats FROM screens WHERE theater_id = $1 AND screen_id = $2",
        )
        .bind(theater_id)
        .bind(screen_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(capacity)
    }

    /// Seat labels already committed for a showtime — the union of seat
    /// assignments over all its bookings
    pub async fn occupied_seats(&self, key: &ShowtimeKey) -> Result<Vec<String>, BookingError> {
        let seats: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT s.seat_label
            FROM booked_seats s
            JOIN bookings b ON b.booking_id = s.booking_id
            WHERE b.movie_id = $1 AND b.theater_id = $2 AND b.screen_id = $3
              AND b.show_date = $4 AND b.show_time = $5
            ORDER BY s.seat_label
            "#,
        )
        .bind(key.movie_id)
        .bind(key.theater_id)
        .bind(key.screen_id)
        .bind(key.show_date)
        .bind(key.show_time)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }

    /// Atomically commit a booking with its seat assignments
    ///
    /// Everything happens in one transaction: the showtime row is locked
    /// (FOR UPDATE), occupancy is re-derived from live data, and only then
    /// are the booking row and one booked_seats row per seat inserted. The
    /// row lock serializes concurrent commits for the same showtime, so of
    /// two overlapping selections exactly one survives; the other sees the
    /// winner's seats and fails with SeatUnavailable. Any error before
    /// commit() drops the transaction and rolls everything back.
    pub async fn commit_booking(
        &self,
        user_id: i32,
        key: &ShowtimeKey,
        selection: &ValidatedSelection,
        total: Decimal,
    ) -> Result<Booking, BookingError> {
        let mut tx = self.pool.begin().await?;

        // Lock the showtime row; doubles as the existence re-check
        let locked: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT 1 FROM showtimes
            WHERE movie_id = $1 AND theater_id = $2 AND screen_id = $3
              AND show_date = $4 AND show_time = $5
            FOR UPDATE
            "#,
        )
        .bind(key.movie_id)
        .bind(key.theater_id)
        .bind(key.screen_id)
        .bind(key.show_date)
        .bind(key.show_time)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Err(BookingError::ShowtimeNotFound);
        }

        // Re-validate availability against live committed data
        let occupied_rows: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT s.seat_label
            FROM booked_seats s
            JOIN bookings b ON b.booking_id = s.booking_id
            WHERE b.movie_id = $1 AND b.theater_id = $2 AND b.screen_id = $3
              AND b.show_date = $4 AND b.show_time = $5
            "#,
        )
        .bind(key.movie_id)
        .bind(key.theater_id)
        .bind(key.screen_id)
        .bind(key.show_date)
        .bind(key.show_time)
        .fetch_all(&mut *tx)
        .await?;

        let occupied = parse_occupied(&occupied_rows)?;
        for seat in &selection.seats {
            if occupied.contains(seat) {
                tracing::info!(
                    "Commit for user {} lost seat {} to a concurrent booking",
                    user_id,
                    seat
                );
                return Err(BookingError::SeatUnavailable(seat.to_string()));
            }
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (user_id, movie_id, theater_id, screen_id, show_date, show_time,
                 elite_seats, premium_seats, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING booking_id, user_id, movie_id, theater_id, screen_id,
                      show_date, show_time, elite_seats, premium_seats, price, created_at
            "#,
        )
        .bind(user_id)
        .bind(key.movie_id)
        .bind(key.theater_id)
        .bind(key.screen_id)
        .bind(key.show_date)
        .bind(key.show_time)
        .bind(selection.counts.elite as i32)
        .bind(selection.counts.premium as i32)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        for seat in &selection.seats {
            sqlx::query("INSERT INTO booked_seats (booking_id, seat_label) VALUES ($1, $2)")
                .bind(booking.booking_id)
                .bind(seat.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Committed booking {} for user {}: {} seats on {} {}",
            booking.booking_id,
            user_id,
            selection.seats.len(),
            key.show_date,
            key.show_time
        );

        Ok(booking)
    }

    /// All bookings of a user, newest first
    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<Booking>, BookingError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT booking_id, user_id, movie_id, theater_id, screen_id,
                   show_date, show_time, elite_seats, premium_seats, price, created_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Seat labels belonging to one booking
    pub async fn seats_for_booking(&self, booking_id: i64) -> Result<Vec<String>, BookingError> {
        let seats: Vec<String> = sqlx::query_scalar(
            "SELECT seat_label FROM booked_seats WHERE booking_id = $1 ORDER BY seat_label",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }

    /// Display name of a movie
    pub async fn movie_name(&self, movie_id: i32) -> Result<Option<String>, BookingError> {
        let name: Option<String> =
            sqlx::query_scalar("SELECT movie_name FROM movies WHERE movie_id = $1")
                .bind(movie_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(name)
    }

    /// Display name of a theater
    pub async fn theater_name(&self, theater_id: i32) -> Result<Option<String>, BookingError> {
        let name: Option<String> =
            sqlx::query_scalar("SELECT theater_name FROM theaters WHERE theater_id = $1")
                .bind(theater_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    // The commit path (FOR UPDATE lock + re-check + inserts) is only
    // meaningful against a live Postgres and is exercised by the concurrency
    // integration suite; the validation it re-runs is unit-tested in
    // seat_inventory.rs.
}
