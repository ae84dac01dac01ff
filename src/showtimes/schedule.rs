// Minimum-gap rule for showtimes sharing a screen.
// Pure time arithmetic; the service feeds it the already-scheduled times for
// the same (theater, screen, date).

use chrono::NaiveTime;

/// Minimum separation between two showtimes on the same screen and date
pub const MIN_GAP_MINUTES: i64 = 60;

/// Returns the first already-scheduled time that sits closer than
/// `MIN_GAP_MINUTES` to the candidate, or None when the slot is free.
///
/// The comparison is within a single date: callers fetch `existing` scoped
/// to the same show_date, so a 23:30 showtime never blocks 00:15 the next
/// day.
pub fn min_gap_conflict(existing: &[NaiveTime], candidate: NaiveTime) -> Option<NaiveTime> {
    existing.iter().copied().find(|&scheduled| {
        let gap = (candidate - scheduled).num_minutes().abs();
        gap < MIN_GAP_MINUTES
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_empty_schedule_has_no_conflict() {
        assert_eq!(min_gap_conflict(&[], t(18, 0)), None);
    }

    #[test]
    fn test_same_time_conflicts() {
        assert_eq!(min_gap_conflict(&[t(18, 0)], t(18, 0)), Some(t(18, 0)));
    }

    #[test]
    fn test_less_than_sixty_minutes_after_conflicts() {
        assert_eq!(min_gap_conflict(&[t(18, 0)], t(18, 59)), Some(t(18, 0)));
        assert_eq!(min_gap_conflict(&[t(18, 0)], t(18, 1)), Some(t(18, 0)));
    }

    #[test]
    fn test_less_than_sixty_minutes_before_conflicts() {
        assert_eq!(min_gap_conflict(&[t(18, 0)], t(17, 30)), Some(t(18, 0)));
    }

    #[test]
    fn test_exactly_sixty_minutes_is_accepted() {
        assert_eq!(min_gap_conflict(&[t(18, 0)], t(19, 0)), None);
        assert_eq!(min_gap_conflict(&[t(18, 0)], t(17, 0)), None);
    }

    #[test]
    fn test_more_than_sixty_minutes_is_accepted() {
        assert_eq!(min_gap_conflict(&[t(18, 0)], t(20, 15)), None);
    }

    #[test]
    fn test_reports_first_conflicting_time() {
        let existing = [t(12, 0), t(15, 0), t(18, 0)];
        assert_eq!(min_gap_conflict(&existing, t(15, 30)), Some(t(15, 0)));
    }

    #[test]
    fn test_candidate_between_two_valid_slots() {
        // 13:00 and 15:00 scheduled; 14:00 is exactly 60 from both
        let existing = [t(13, 0), t(15, 0)];
        assert_eq!(min_gap_conflict(&existing, t(14, 0)), None);
    }
}
