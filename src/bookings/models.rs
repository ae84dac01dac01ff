use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Seating tier of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatTier {
    Elite,
    Premium,
}

impl SeatTier {
    /// Convert tier to its canonical label prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatTier::Elite => "elite",
            SeatTier::Premium => "premium",
        }
    }

    /// Single-letter prefix used on printed tickets
    pub fn ticket_prefix(&self) -> char {
        match self {
            SeatTier::Elite => 'E',
            SeatTier::Premium => 'P',
        }
    }
}

impl fmt::Display for SeatTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single physical seat within a screen's tier
///
/// Canonical text form is `elite-N` / `premium-N`; the number is 1-based and
/// must fall within the tier's capacity for the screen being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatLabel {
    pub tier: SeatTier,
    pub number: u32,
}

impl SeatLabel {
    /// Short form printed on tickets, e.g. `E12` / `P3`
    pub fn ticket_code(&self) -> String {
        format!("{}{}", self.tier.ticket_prefix(), self.number)
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.tier, self.number)
    }
}

impl FromStr for SeatLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tier_str, number_str) = s
            .split_once('-')
            .ok_or_else(|| format!("Seat label '{}' must look like 'elite-3' or 'premium-12'", s))?;

        let tier = match tier_str {
            "elite" => SeatTier::Elite,
            "premium" => SeatTier::Premium,
            other => return Err(format!("Unknown seat tier '{}'", other)),
        };

        let number: u32 = number_str
            .parse()
            .map_err(|_| format!("Seat number '{}' is not a valid number", number_str))?;

        if number == 0 {
            return Err("Seat numbers start at 1".to_string());
        }

        Ok(SeatLabel { tier, number })
    }
}

/// The identity of a showtime as bookings record it: which movie, where, when
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowtimeKey {
    pub movie_id: i32,
    pub theater_id: i32,
    pub screen_id: i32,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
}

/// Per-tier seat capacities of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct ScreenCapacity {
    pub elite_seats: i32,
    pub premium_seats: i32,
}

/// Per-tier seat counts of a validated selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatCounts {
    pub elite: u32,
    pub premium: u32,
}

/// Itemized cost of a seat selection
///
/// All values carry one decimal place; money never travels as binary floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub elite_cost: Decimal,
    pub premium_cost: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub convenience_fee: Decimal,
    pub total: Decimal,
}

/// Checkout session state, carried in per-session storage between requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    SelectingShowtime,
    SelectingSeats,
    Reviewing,
    Committed,
}

impl CheckoutState {
    /// Convert state to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::SelectingShowtime => "selecting_showtime",
            CheckoutState::SelectingSeats => "selecting_seats",
            CheckoutState::Reviewing => "reviewing",
            CheckoutState::Committed => "committed",
        }
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// In-progress selection for one checkout session
///
/// Owned by the session layer and passed back on each request — never shared
/// process-wide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutSelection {
    pub showtime: Option<ShowtimeKey>,
    pub seats: Vec<String>,
}

/// Domain model representing a committed booking
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub booking_id: i64,
    pub user_id: i32,
    pub movie_id: i32,
    pub theater_id: i32,
    pub screen_id: i32,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub elite_seats: i32,
    pub premium_seats: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for reviewing or committing a seat selection
///
/// `checkout_state` is the session's current state as the session layer
/// last stored it; when omitted it defaults to the state the operation
/// expects to start from.
#[derive(Debug, Deserialize, Validate)]
pub struct SeatSelectionRequest {
    pub showtime: ShowtimeKey,
    #[validate(length(min = 1, message = "Selection must contain at least one seat"))]
    pub seats: Vec<String>,
    #[serde(default)]
    pub checkout_state: Option<CheckoutState>,
}

/// Response DTO for seat availability of a showtime
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub showtime: ShowtimeKey,
    pub elite_seats: i32,
    pub premium_seats: i32,
    /// Canonical labels of seats already taken
    pub occupied: Vec<String>,
}

/// Response DTO for a priced, not-yet-committed selection
#[derive(Debug, Serialize)]
pub struct ReviewSummary {
    pub showtime: ShowtimeKey,
    pub seats: Vec<String>,
    pub counts: SeatCounts,
    pub price: PriceBreakdown,
}

/// Response DTO returned once a booking is committed
#[derive(Debug, Serialize)]
pub struct BookingConfirmation {
    pub booking_id: i64,
    pub user_id: i32,
    pub movie_name: String,
    pub theater_name: String,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    /// Ticket codes, e.g. ["P1", "P2", "E7"]
    pub seats: Vec<String>,
    pub price: PriceBreakdown,
}

/// Response DTO for one entry in a user's booking history
#[derive(Debug, Serialize)]
pub struct BookingHistoryEntry {
    pub booking_id: i64,
    pub movie_name: String,
    pub theater_name: String,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub seats: Vec<String>,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_label_parses_canonical_forms() {
        let elite: SeatLabel = "elite-12".parse().unwrap();
        assert_eq!(elite.tier, SeatTier::Elite);
        assert_eq!(elite.number, 12);

        let premium: SeatLabel = "premium-3".parse().unwrap();
        assert_eq!(premium.tier, SeatTier::Premium);
        assert_eq!(premium.number, 3);
    }

    #[test]
    fn test_seat_label_rejects_malformed_input() {
        assert!("".parse::<SeatLabel>().is_err());
        assert!("elite".parse::<SeatLabel>().is_err());
        assert!("elite-".parse::<SeatLabel>().is_err());
        assert!("elite-0".parse::<SeatLabel>().is_err());
        assert!("elite--3".parse::<SeatLabel>().is_err());
        assert!("balcony-2".parse::<SeatLabel>().is_err());
        assert!("ELITE-2".parse::<SeatLabel>().is_err());
        assert!("premium-abc".parse::<SeatLabel>().is_err());
    }

    #[test]
    fn test_seat_label_roundtrip_display() {
        let label: SeatLabel = "premium-7".parse().unwrap();
        assert_eq!(label.to_string(), "premium-7");
        assert_eq!(label.to_string().parse::<SeatLabel>().unwrap(), label);
    }

    #[test]
    fn test_ticket_codes() {
        assert_eq!("elite-12".parse::<SeatLabel>().unwrap().ticket_code(), "E12");
        assert_eq!("premium-1".parse::<SeatLabel>().unwrap().ticket_code(), "P1");
    }

    #[test]
    fn test_checkout_state_display() {
        assert_eq!(CheckoutState::SelectingShowtime.to_string(), "selecting_showtime");
        assert_eq!(CheckoutState::Committed.to_string(), "committed");
    }
}
