use crate::bookings::checkout::CheckoutMachine;
use crate::bookings::error::BookingError;
use crate::bookings::models::{
    AvailabilityResponse, BookingConfirmation, BookingHistoryEntry, CheckoutState, ReviewSummary,
    ShowtimeKey,
};
use crate::bookings::price_calculator::{PriceCalculator, PriceTable};
use crate::bookings::repository::BookingsRepository;
use crate::bookings::seat_inventory::{self, ValidatedSelection};

/// Service for the booking transaction core
///
/// Orchestrates a checkout: resolve the showtime, validate the seat
/// selection against current occupancy, price it, and commit it as one
/// atomic unit. Seat-occupancy truth always comes from committed rows; the
/// service holds no cross-request state.
#[derive(Clone)]
pub struct BookingService {
    repo: BookingsRepository,
    prices: PriceTable,
}

impl BookingService {
    /// Create a new BookingService with the given tariff
    pub fn new(repo: BookingsRepository, prices: PriceTable) -> Self {
        Self { repo, prices }
    }

    /// Seat availability of a showtime, for the seat-map display
    pub async fn availability(
        &self,
        key: &ShowtimeKey,
    ) -> Result<AvailabilityResponse, BookingError> {
        if !self.repo.showtime_exists(key).await? {
            return Err(BookingError::ShowtimeNotFound);
        }

        let capacity = self
            .repo
            .screen_capacity(key.theater_id, key.screen_id)
            .await?
            .ok_or(BookingError::ShowtimeNotFound)?;

        let occupied = self.repo.occupied_seats(key).await?;

        Ok(AvailabilityResponse {
            showtime: *key,
            elite_seats: capacity.elite_seats,
            premium_seats: capacity.premium_seats,
            occupied,
        })
    }

    /// Validate and price a selection without committing anything: the
    /// SELECTING_SEATS → REVIEWING transition
    ///
    /// The summary reflects a snapshot; commit re-validates against live
    /// data, so a reviewed selection can still fail with SeatUnavailable.
    pub async fn review_selection(
        &self,
        session_state: CheckoutState,
        key: &ShowtimeKey,
        seats: &[String],
    ) -> Result<ReviewSummary, BookingError> {
        CheckoutMachine::transition(session_state, CheckoutState::Reviewing)
            .map_err(BookingError::InvalidTransition)?;

        let selection = self.validate_against_snapshot(key, seats).await?;
        let price =
            PriceCalculator::price(&self.prices, selection.counts.elite, selection.counts.premium);

        Ok(ReviewSummary {
            showtime: *key,
            seats: selection.seats.iter().map(|s| s.to_string()).collect(),
            counts: selection.counts,
            price,
        })
    }

    /// Commit a booking: the REVIEWING → COMMITTED transition
    ///
    /// Validates against a fresh snapshot first for a fast, friendly
    /// failure, then hands the selection to the repository whose transaction
    /// re-checks availability under the showtime row lock. Exactly one
    /// booking row and one seat row per seat exist afterwards, or nothing.
    pub async fn commit_booking(
        &self,
        session_state: CheckoutState,
        user_id: i32,
        key: &ShowtimeKey,
        seats: &[String],
    ) -> Result<BookingConfirmation, BookingError> {
        CheckoutMachine::transition(session_state, CheckoutState::Committed)
            .map_err(BookingError::InvalidTransition)?;

        let selection = self.validate_against_snapshot(key, seats).await?;
        let price =
            PriceCalculator::price(&self.prices, selection.counts.elite, selection.counts.premium);

        let booking = self
            .repo
            .commit_booking(user_id, key, &selection, price.total)
            .await?;

        let movie_name = self
            .repo
            .movie_name(key.movie_id)
            .await?
            .unwrap_or_else(|| format!("movie {}", key.movie_id));
        let theater_name = self
            .repo
            .theater_name(key.theater_id)
            .await?
            .unwrap_or_else(|| format!("theater {}", key.theater_id));

        Ok(BookingConfirmation {
            booking_id: booking.booking_id,
            user_id: booking.user_id,
            movie_name,
            theater_name,
            show_date: booking.show_date,
            show_time: booking.show_time,
            seats: selection.seats.iter().map(|s| s.ticket_code()).collect(),
            price,
        })
    }

    /// The user's booking history, newest first
    pub async fn booking_history(
        &self,
        user_id: i32,
    ) -> Result<Vec<BookingHistoryEntry>, BookingError> {
        let bookings = self.repo.find_by_user(user_id).await?;

        let mut entries = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let seats = self.repo.seats_for_booking(booking.booking_id).await?;
            let movie_name = self
                .repo
                .movie_name(booking.movie_id)
                .await?
                .unwrap_or_else(|| format!("movie {}", booking.movie_id));
            let theater_name = self
                .repo
                .theater_name(booking.theater_id)
                .await?
                .unwrap_or_else(|| format!("theater {}", booking.theater_id));

            entries.push(BookingHistoryEntry {
                booking_id: booking.booking_id,
                movie_name,
                theater_name,
                show_date: booking.show_date,
                show_time: booking.show_time,
                seats,
                price: booking.price,
            });
        }

        Ok(entries)
    }

    /// Shared validation path: showtime exists, screen capacity known, seat
    /// selection well-formed and free in the current snapshot
    async fn validate_against_snapshot(
        &self,
        key: &ShowtimeKey,
        seats: &[String],
    ) -> Result<ValidatedSelection, BookingError> {
        if !self.repo.showtime_exists(key).await? {
            return Err(BookingError::ShowtimeNotFound);
        }

        let capacity = self
            .repo
            .screen_capacity(key.theater_id, key.screen_id)
            .await?
            .ok_or(BookingError::ShowtimeNotFound)?;

        let occupied_rows = self.repo.occupied_seats(key).await?;
        let occupied = seat_inventory::parse_occupied(&occupied_rows)?;

        seat_inventory::validate_selection(&capacity, &occupied, seats)
    }
}
