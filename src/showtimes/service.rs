use chrono::NaiveDate;

use crate::showtimes::error::ShowtimeError;
use crate::showtimes::models::{
    ListingRow, MovieShowings, ScheduleShowtimeRequest, ScreenShowing, Showtime, ShowtimeSlot,
    UpdateShowtimeRequest,
};
use crate::showtimes::repository::ShowtimesRepository;
use crate::showtimes::schedule;

/// Service for the showtime catalog
///
/// Owns the scheduling rules: referential integrity of a new listing and the
/// minimum gap between showtimes sharing a screen. The gap check is scoped
/// to the same show_date (see DESIGN.md).
#[derive(Clone)]
pub struct ShowtimeService {
    repo: ShowtimesRepository,
}

impl ShowtimeService {
    /// Create a new ShowtimeService
    pub fn new(repo: ShowtimesRepository) -> Self {
        Self { repo }
    }

    /// Schedule a new showtime
    ///
    /// Fails with MissingReference when the movie or screen does not exist,
    /// and with ScheduleConflict when another showtime on the same screen and
    /// date starts within 60 minutes.
    pub async fn schedule_showtime(
        &self,
        request: ScheduleShowtimeRequest,
    ) -> Result<Showtime, ShowtimeError> {
        self.check_references(&request).await?;

        let existing = self
            .repo
            .times_on_screen(request.theater_id, request.screen_id, request.show_date)
            .await?;

        if let Some(conflicting) = schedule::min_gap_conflict(&existing, request.show_time) {
            tracing::warn!(
                "Rejected showtime {} on theater {} screen {}: conflicts with {}",
                request.show_time,
                request.theater_id,
                request.screen_id,
                conflicting
            );
            return Err(ShowtimeError::ScheduleConflict {
                existing: conflicting,
            });
        }

        let showtime = self
            .repo
            .insert(&Showtime {
                theater_id: request.theater_id,
                movie_id: request.movie_id,
                screen_id: request.screen_id,
                show_date: request.show_date,
                show_time: request.show_time,
            })
            .await?;

        tracing::info!(
            "Scheduled movie {} on theater {} screen {} at {} {}",
            showtime.movie_id,
            showtime.theater_id,
            showtime.screen_id,
            showtime.show_date,
            showtime.show_time
        );

        Ok(showtime)
    }

    /// Look up the showtime occupying a slot
    pub async fn lookup_showtime(&self, slot: &ShowtimeSlot) -> Result<Showtime, ShowtimeError> {
        self.repo
            .find_by_slot(slot)
            .await?
            .ok_or(ShowtimeError::NotFound)
    }

    /// Update a showtime, re-validating the gap constraint while excluding
    /// the record being updated
    pub async fn update_showtime(
        &self,
        request: UpdateShowtimeRequest,
    ) -> Result<Showtime, ShowtimeError> {
        // Target must exist before anything else
        self.repo
            .find_by_slot(&request.target)
            .await?
            .ok_or(ShowtimeError::NotFound)?;

        let updated = request.updated;
        self.check_references(&updated).await?;

        let existing = self
            .repo
            .times_on_screen_excluding(
                updated.theater_id,
                updated.screen_id,
                updated.show_date,
                &request.target,
            )
            .await?;

        if let Some(conflicting) = schedule::min_gap_conflict(&existing, updated.show_time) {
            return Err(ShowtimeError::ScheduleConflict {
                existing: conflicting,
            });
        }

        self.repo
            .update(
                &request.target,
                &Showtime {
                    theater_id: updated.theater_id,
                    movie_id: updated.movie_id,
                    screen_id: updated.screen_id,
                    show_date: updated.show_date,
                    show_time: updated.show_time,
                },
            )
            .await
    }

    /// Delete the showtime in a slot
    pub async fn delete_showtime(&self, slot: &ShowtimeSlot) -> Result<(), ShowtimeError> {
        self.repo.delete(slot).await
    }

    /// Board listing: a theater's showings on a date, grouped per movie
    pub async fn board(
        &self,
        theater_id: i32,
        show_date: NaiveDate,
    ) -> Result<Vec<MovieShowings>, ShowtimeError> {
        let rows = self.repo.listing_rows(theater_id, show_date).await?;
        Ok(group_listing_rows(rows))
    }

    /// Validate that the movie and screen a request points at exist
    async fn check_references(
        &self,
        request: &ScheduleShowtimeRequest,
    ) -> Result<(), ShowtimeError> {
        if !self.repo.movie_exists(request.movie_id).await? {
            return Err(ShowtimeError::MissingReference {
                resource: "Movie",
                id: request.movie_id.to_string(),
            });
        }

        if !self
            .repo
            .screen_exists(request.theater_id, request.screen_id)
            .await?
        {
            return Err(ShowtimeError::MissingReference {
                resource: "Screen",
                id: format!("{}/{}", request.theater_id, request.screen_id),
            });
        }

        Ok(())
    }
}

/// Fold listing rows (ordered by movie) into one board entry per movie
fn group_listing_rows(rows: Vec<ListingRow>) -> Vec<MovieShowings> {
    let mut board: Vec<MovieShowings> = Vec::new();
    for row in rows {
        match board.last_mut() {
            Some(entry) if entry.movie_id == row.movie_id => {
                entry.showings.push(ScreenShowing {
                    screen_id: row.screen_id,
                    show_time: row.show_time,
                });
            }
            _ => board.push(MovieShowings {
                movie_id: row.movie_id,
                movie_name: row.movie_name,
                genre: row.genre,
                rating: row.rating,
                run_time: row.run_time,
                showings: vec![ScreenShowing {
                    screen_id: row.screen_id,
                    show_time: row.show_time,
                }],
            }),
        }
    }
    board
}
