use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scheduled screening: a movie on a specific screen, date and time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Showtime {
    pub theater_id: i32,
    pub movie_id: i32,
    pub screen_id: i32,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
}

/// The slot identity of a showtime: which screen, when
///
/// This is the scheduling key — the movie is what plays in the slot, the
/// slot itself is (theater, screen, date, time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowtimeSlot {
    pub theater_id: i32,
    pub screen_id: i32,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
}

impl Showtime {
    /// The slot this showtime occupies
    pub fn slot(&self) -> ShowtimeSlot {
        ShowtimeSlot {
            theater_id: self.theater_id,
            screen_id: self.screen_id,
            show_date: self.show_date,
            show_time: self.show_time,
        }
    }
}

/// Request DTO for scheduling a showtime
#[derive(Debug, Deserialize)]
pub struct ScheduleShowtimeRequest {
    pub theater_id: i32,
    pub movie_id: i32,
    pub screen_id: i32,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
}

/// Request DTO for updating a showtime: the slot being changed plus its
/// replacement values
#[derive(Debug, Deserialize)]
pub struct UpdateShowtimeRequest {
    pub target: ShowtimeSlot,
    pub updated: ScheduleShowtimeRequest,
}

/// One movie's showings on a theater's board for a date
#[derive(Debug, Serialize)]
pub struct MovieShowings {
    pub movie_id: i32,
    pub movie_name: String,
    pub genre: String,
    pub rating: f64,
    pub run_time: i32,
    pub showings: Vec<ScreenShowing>,
}

/// A single (screen, time) showing entry on the board
#[derive(Debug, Serialize)]
pub struct ScreenShowing {
    pub screen_id: i32,
    pub show_time: NaiveTime,
}

/// Flat row backing the board listing query
#[derive(Debug, FromRow)]
pub struct ListingRow {
    pub movie_id: i32,
    pub movie_name: String,
    pub genre: String,
    pub rating: f64,
    pub run_time: i32,
    pub screen_id: i32,
    pub show_time: NaiveTime,
}
