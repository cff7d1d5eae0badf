//! Faculty availability matching.
//!
//! A candidate slot is available when it overlaps **any** range declared
//! for that day, however small the overlap. A day missing from the map,
//! or mapped to no ranges, is unavailable. Unparseable ranges are ignored.

use crate::models::{Availability, Day, TimeSlot};

/// Whether `slot` on `day` falls within the given availability.
pub fn is_available(availability: &Availability, day: Day, slot: &TimeSlot) -> bool {
    availability
        .ranges(day)
        .iter()
        .filter_map(|range| range.parse::<TimeSlot>().ok())
        .any(|range| range.overlaps(slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(s: &str) -> TimeSlot {
        s.parse().unwrap()
    }

    #[test]
    fn test_inside_window() {
        let avail = Availability::new().with_day(Day::Monday, ["09:00-17:00"]);
        assert!(is_available(&avail, Day::Monday, &slot("09:00-10:00")));
        assert!(is_available(&avail, Day::Monday, &slot("16:00-17:00")));
    }

    #[test]
    fn test_touching_boundary_is_not_available() {
        let avail = Availability::new().with_day(Day::Monday, ["09:00-17:00"]);
        assert!(!is_available(&avail, Day::Monday, &slot("08:00-09:00")));
        assert!(!is_available(&avail, Day::Monday, &slot("17:00-18:00")));
    }

    #[test]
    fn test_partial_overlap_counts() {
        let avail = Availability::new().with_day(Day::Friday, ["09:00-09:01"]);
        assert!(is_available(&avail, Day::Friday, &slot("08:30-09:30")));
        assert!(is_available(&avail, Day::Friday, &slot("09:00-10:00")));
    }

    #[test]
    fn test_missing_or_empty_day() {
        let avail = Availability::new()
            .with_day(Day::Monday, ["09:00-17:00"])
            .with_day(Day::Tuesday, Vec::<String>::new());
        assert!(!is_available(&avail, Day::Tuesday, &slot("09:00-10:00")));
        assert!(!is_available(&avail, Day::Wednesday, &slot("09:00-10:00")));
    }

    #[test]
    fn test_any_of_several_ranges() {
        let avail = Availability::new().with_day(Day::Thursday, ["08:00-09:00", "14:00-16:00"]);
        assert!(is_available(&avail, Day::Thursday, &slot("08:00-09:00")));
        assert!(is_available(&avail, Day::Thursday, &slot("15:00-16:00")));
        assert!(!is_available(&avail, Day::Thursday, &slot("10:00-11:00")));
    }

    #[test]
    fn test_case_insensitive_day_key() {
        let json = r#"{"Monday": ["09:00-12:00"]}"#;
        let avail: Availability = serde_json::from_str(json).unwrap();
        assert!(is_available(&avail, Day::Monday, &slot("10:00-11:00")));
    }

    #[test]
    fn test_garbage_range_ignored() {
        let json = r#"{"monday": ["whenever", "13:00-14:00"]}"#;
        let avail: Availability = serde_json::from_str(json).unwrap();
        assert!(!is_available(&avail, Day::Monday, &slot("09:00-10:00")));
        assert!(is_available(&avail, Day::Monday, &slot("13:00-14:00")));
    }
}
