// Seat selection validation against a screen's capacity and the seats
// already committed for a showtime.
//
// Pure logic over a snapshot: the booking repository runs the same check a
// second time inside the commit transaction, against live data, so a
// selection that validated here can still lose the race and come back as
// SeatUnavailable at commit.

use std::collections::HashSet;

use crate::bookings::error::BookingError;
use crate::bookings::models::{ScreenCapacity, SeatCounts, SeatLabel, SeatTier};

/// A selection that passed validation: parsed labels plus per-tier counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSelection {
    pub seats: Vec<SeatLabel>,
    pub counts: SeatCounts,
}

/// Parse stored seat labels into a set for collision checks
///
/// Stored labels are canonical (they were validated on the way in), so a row
/// that fails to parse indicates store corruption and is surfaced rather
/// than skipped.
pub fn parse_occupied(labels: &[String]) -> Result<HashSet<SeatLabel>, BookingError> {
    labels
        .iter()
        .map(|raw| {
            raw.parse::<SeatLabel>()
                .map_err(|e| BookingError::PersistenceError(format!("corrupt seat label: {}", e)))
        })
        .collect()
}

/// Validate a requested seat selection
///
/// Seats are checked in request order; the first offending seat is reported.
/// A seat fails with InvalidSeat when it does not parse or its number
/// exceeds the tier's capacity, and with SeatUnavailable when it is already
/// occupied or repeated within the request.
pub fn validate_selection(
    capacity: &ScreenCapacity,
    occupied: &HashSet<SeatLabel>,
    requested: &[String],
) -> Result<ValidatedSelection, BookingError> {
    if requested.is_empty() {
        return Err(BookingError::EmptySelection);
    }

    let mut seats = Vec::with_capacity(requested.len());
    let mut seen: HashSet<SeatLabel> = HashSet::with_capacity(requested.len());
    let mut counts = SeatCounts { elite: 0, premium: 0 };

    for raw in requested {
        let seat: SeatLabel = raw
            .parse()
            .map_err(|e: String| BookingError::InvalidSeat(e))?;

        let tier_capacity = match seat.tier {
            SeatTier::Elite => capacity.elite_seats,
            SeatTier::Premium => capacity.premium_seats,
        };

        if seat.number as i64 > tier_capacity as i64 {
            return Err(BookingError::InvalidSeat(format!(
                "{} exceeds the {} capacity of {}",
                seat,
                seat.tier,
                tier_capacity
            )));
        }

        if occupied.contains(&seat) || !seen.insert(seat) {
            return Err(BookingError::SeatUnavailable(seat.to_string()));
        }

        match seat.tier {
            SeatTier::Elite => counts.elite += 1,
            SeatTier::Premium => counts.premium += 1,
        }

        seats.push(seat);
    }

    Ok(ValidatedSelection { seats, counts })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity() -> ScreenCapacity {
        ScreenCapacity {
            elite_seats: 50,
            premium_seats: 30,
        }
    }

    fn occupied(labels: &[&str]) -> HashSet<SeatLabel> {
        labels.iter().map(|l| l.parse().unwrap()).collect()
    }

    fn seats(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_accepts_free_seats_within_capacity() {
        let result = validate_selection(
            &capacity(),
            &HashSet::new(),
            &seats(&["premium-1", "premium-2", "elite-7"]),
        )
        .unwrap();

        assert_eq!(result.counts, SeatCounts { elite: 1, premium: 2 });
        assert_eq!(result.seats.len(), 3);
        assert_eq!(result.seats[0].to_string(), "premium-1");
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let result = validate_selection(&capacity(), &HashSet::new(), &[]);
        assert!(matches!(result, Err(BookingError::EmptySelection)));
    }

    #[test]
    fn test_malformed_label_is_invalid_seat() {
        let result = validate_selection(&capacity(), &HashSet::new(), &seats(&["balcony-1"]));
        assert!(matches!(result, Err(BookingError::InvalidSeat(_))));
    }

    #[test]
    fn test_seat_number_beyond_capacity_is_invalid() {
        // elite capacity is 50
        let result = validate_selection(&capacity(), &HashSet::new(), &seats(&["elite-51"]));
        assert!(matches!(result, Err(BookingError::InvalidSeat(_))));

        // boundary seat is fine
        assert!(validate_selection(&capacity(), &HashSet::new(), &seats(&["elite-50"])).is_ok());
    }

    #[test]
    fn test_occupied_seat_is_unavailable() {
        let taken = occupied(&["premium-2"]);
        let result = validate_selection(&capacity(), &taken, &seats(&["premium-1", "premium-2"]));

        match result {
            Err(BookingError::SeatUnavailable(seat)) => assert_eq!(seat, "premium-2"),
            other => panic!("expected SeatUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_within_request_is_unavailable() {
        let result = validate_selection(
            &capacity(),
            &HashSet::new(),
            &seats(&["elite-3", "elite-3"]),
        );
        assert!(matches!(result, Err(BookingError::SeatUnavailable(_))));
    }

    #[test]
    fn test_first_offending_seat_is_reported() {
        let taken = occupied(&["elite-1", "elite-2"]);
        let result = validate_selection(
            &capacity(),
            &taken,
            &seats(&["elite-5", "elite-2", "elite-1"]),
        );

        match result {
            Err(BookingError::SeatUnavailable(seat)) => assert_eq!(seat, "elite-2"),
            other => panic!("expected SeatUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_acceptance_matches_capacity_and_occupancy_exactly() {
        // Accepted iff within capacity and not occupied
        let taken = occupied(&["premium-1"]);

        assert!(validate_selection(&capacity(), &taken, &seats(&["premium-2"])).is_ok());
        assert!(validate_selection(&capacity(), &taken, &seats(&["premium-1"])).is_err());
        assert!(validate_selection(&capacity(), &taken, &seats(&["premium-31"])).is_err());
    }

    #[test]
    fn test_parse_occupied_roundtrip() {
        let stored = vec!["elite-1".to_string(), "premium-9".to_string()];
        let parsed = parse_occupied(&stored).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed.contains(&"elite-1".parse().unwrap()));
    }

    #[test]
    fn test_parse_occupied_surfaces_corrupt_labels() {
        let stored = vec!["elite-1".to_string(), "garbage".to_string()];
        assert!(matches!(
            parse_occupied(&stored),
            Err(BookingError::PersistenceError(_))
        ));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn tier_strategy() -> impl Strategy<Value = SeatTier> {
        prop_oneof![Just(SeatTier::Elite), Just(SeatTier::Premium)]
    }

    proptest! {
        /// Any selection of distinct, in-capacity, unoccupied seats validates,
        /// and its counts match the per-tier totals of the request
        #[test]
        fn prop_counts_match_request(
            tiers in prop::collection::vec(tier_strategy(), 1..20)
        ) {
            let capacity = ScreenCapacity { elite_seats: 100, premium_seats: 100 };

            // Number seats uniquely per tier so the selection has no duplicates
            let mut next_elite = 0u32;
            let mut next_premium = 0u32;
            let labels: Vec<String> = tiers.iter().map(|tier| {
                match tier {
                    SeatTier::Elite => { next_elite += 1; format!("elite-{}", next_elite) }
                    SeatTier::Premium => { next_premium += 1; format!("premium-{}", next_premium) }
                }
            }).collect();

            let result = validate_selection(&capacity, &HashSet::new(), &labels).unwrap();
            prop_assert_eq!(result.counts.elite, next_elite);
            prop_assert_eq!(result.counts.premium, next_premium);
            prop_assert_eq!(result.seats.len(), labels.len());
        }

        /// A selection containing any occupied seat never validates
        #[test]
        fn prop_occupied_seat_always_rejected(
            free_count in 0usize..5,
            taken_number in 1u32..100
        ) {
            let capacity = ScreenCapacity { elite_seats: 200, premium_seats: 200 };
            let taken_label = format!("elite-{}", taken_number);
            let occupied: HashSet<SeatLabel> =
                [taken_label.parse::<SeatLabel>().unwrap()].into_iter().collect();

            // Free premium seats, then the taken elite seat
            let mut labels: Vec<String> =
                (1..=free_count as u32).map(|n| format!("premium-{}", n)).collect();
            labels.push(taken_label);

            let result = validate_selection(&capacity, &occupied, &labels);
            prop_assert!(matches!(result, Err(BookingError::SeatUnavailable(_))));
        }
    }
}
