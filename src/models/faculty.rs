//! Faculty model and weekly availability.
//!
//! Availability maps a lower-case day name to the time ranges
//! (`"HH:MM-HH:MM"`) during which the faculty member may teach.
//! A day that is absent, or mapped to an empty list, is unavailable.
//! Keys are trimmed and lower-cased on load; ranges of keys that collide
//! after normalisation are merged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Day;

/// Declared weekly availability windows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct Availability(BTreeMap<String, Vec<String>>);

impl From<BTreeMap<String, Vec<String>>> for Availability {
    fn from(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut days: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, ranges) in raw {
            days.entry(key.trim().to_ascii_lowercase())
                .or_default()
                .extend(ranges);
        }
        Self(days)
    }
}

impl From<Availability> for BTreeMap<String, Vec<String>> {
    fn from(availability: Availability) -> Self {
        availability.0
    }
}

impl Availability {
    /// Creates an empty availability map (never available).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ranges for a day, replacing earlier ones.
    pub fn with_day<S: Into<String>>(
        mut self,
        day: Day,
        ranges: impl IntoIterator<Item = S>,
    ) -> Self {
        self.0
            .insert(day.key().to_string(), ranges.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the same ranges for every given day.
    pub fn with_days<S: Into<String> + Clone>(
        mut self,
        days: impl IntoIterator<Item = Day>,
        ranges: &[S],
    ) -> Self {
        for day in days {
            self = self.with_day(day, ranges.iter().cloned());
        }
        self
    }

    /// Ranges declared for `day`.
    pub fn ranges(&self, day: Day) -> &[String] {
        self.0.get(day.key()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any range is declared for `day`.
    pub fn has_day(&self, day: Day) -> bool {
        !self.ranges(day).is_empty()
    }

    /// (normalised day key, ranges) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.is_empty())
    }
}

/// A faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Display name; may be empty.
    #[serde(default)]
    pub name: String,
    /// Owning department.
    pub department: String,
    /// Weekly availability windows.
    #[serde(default)]
    pub availability: Availability,
    /// Leave days per month (informational).
    #[serde(default)]
    pub leaves_per_month: u32,
}

impl Faculty {
    /// Creates a faculty member with no availability.
    pub fn new(id: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: department.into(),
            availability: Availability::new(),
            leaves_per_month: 0,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the availability map.
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Sets leaves per month.
    pub fn with_leaves(mut self, leaves_per_month: u32) -> Self {
        self.leaves_per_month = leaves_per_month;
        self
    }

    /// Name for messages: the display name, or the id if unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_lookup() {
        let a = Availability::new()
            .with_day(Day::Monday, ["09:00-12:00", "13:00-17:00"])
            .with_day(Day::Saturday, Vec::<String>::new());

        assert_eq!(a.ranges(Day::Monday).len(), 2);
        assert!(a.has_day(Day::Monday));
        assert!(!a.has_day(Day::Saturday)); // empty list
        assert!(!a.has_day(Day::Tuesday)); // absent
    }

    #[test]
    fn test_availability_key_case_insensitive() {
        let a: Availability =
            serde_json::from_str(r#"{"Monday": ["09:00-17:00"], "TUESDAY": []}"#).unwrap();
        assert_eq!(a.ranges(Day::Monday), ["09:00-17:00".to_string()]);
        assert!(!a.has_day(Day::Tuesday));
    }

    #[test]
    fn test_availability_keys_normalised_on_load() {
        let json = r#"{
            "monday ": ["09:00-12:00"],
            " Monday": ["13:00-17:00"],
            "FRIDAY\t": ["10:00-11:00"]
        }"#;
        let a: Availability = serde_json::from_str(json).unwrap();
        // colliding keys merge in raw key order
        assert_eq!(a.ranges(Day::Monday), ["13:00-17:00", "09:00-12:00"]);
        assert_eq!(a.ranges(Day::Friday), ["10:00-11:00"]);
        assert_eq!(
            a.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["friday", "monday"]
        );
    }

    #[test]
    fn test_with_days() {
        let a = Availability::new().with_days(
            [Day::Monday, Day::Tuesday, Day::Wednesday],
            &["09:00-17:00"],
        );
        assert!(a.has_day(Day::Wednesday));
        assert!(!a.has_day(Day::Thursday));
        assert!(!a.is_empty());
        assert!(Availability::new().is_empty());
    }

    #[test]
    fn test_display_name() {
        let f = Faculty::new("F1", "CS");
        assert_eq!(f.display_name(), "F1");
        let f = f.with_name("Dr. Ada");
        assert_eq!(f.display_name(), "Dr. Ada");
    }

    #[test]
    fn test_faculty_serde_defaults() {
        let f: Faculty = serde_json::from_str(r#"{"id": "F1", "department": "CS"}"#).unwrap();
        assert!(f.availability.is_empty());
        assert_eq!(f.leaves_per_month, 0);
        assert_eq!(f.name, "");
    }
}
