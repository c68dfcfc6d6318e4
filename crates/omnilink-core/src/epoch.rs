//! Core Data epoch translation.
//!
//! OmniFocus persists timestamps as seconds relative to the Core Data
//! reference date, 2001-01-01T00:00:00Z — exactly 978,307,200 seconds after
//! the Unix epoch. Mishandling the offset silently shifts every due date by
//! 31 years, so both directions live here and nowhere else. Only the
//! direct-access backend needs this; AppleScript deals in ISO date strings.

use chrono::{DateTime, NaiveDate, Utc};

/// Seconds between 1970-01-01T00:00:00Z and 2001-01-01T00:00:00Z.
pub const CORE_DATA_EPOCH_OFFSET_SECS: i64 = 978_307_200;

const OFFSET_MILLIS: i64 = CORE_DATA_EPOCH_OFFSET_SECS * 1000;

/// Convert a standard instant to storage form (seconds since 2001).
pub fn to_storage(instant: DateTime<Utc>) -> f64 {
    (instant.timestamp_millis() - OFFSET_MILLIS) as f64 / 1000.0
}

/// Convert a storage timestamp (seconds since 2001) back to a standard
/// instant. Out-of-range values saturate rather than panic.
pub fn from_storage(seconds: f64) -> DateTime<Utc> {
    let millis = (seconds * 1000.0).round() as i64 + OFFSET_MILLIS;
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Storage timestamp for midnight UTC of a calendar date.
pub fn date_to_storage(date: NaiveDate) -> f64 {
    to_storage(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
}

/// Calendar date (UTC) of a storage timestamp.
pub fn storage_to_date(seconds: f64) -> NaiveDate {
    from_storage(seconds).date_naive()
}

/// Half-open `[start, end)` storage-second bounds of a calendar day.
///
/// Used by the direct-access backend to express "due today" as a plain
/// numeric range in SQL, keeping epoch arithmetic out of the queries.
pub fn day_bounds(date: NaiveDate) -> (f64, f64) {
    let start = date_to_storage(date);
    (start, start + 86_400.0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn reference_instant_is_zero() {
        let ref_date = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(to_storage(ref_date), 0.0);
    }

    #[test]
    fn unix_epoch_is_negative_offset() {
        let unix = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(to_storage(unix), -(CORE_DATA_EPOCH_OFFSET_SECS as f64));
    }

    #[test]
    fn known_instant_round_trips() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 13, 45, 30).unwrap();
        let stored = to_storage(instant);
        assert_eq!(from_storage(stored), instant);
    }

    #[test]
    fn date_helpers_agree() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let stored = date_to_storage(date);
        assert_eq!(storage_to_date(stored), date);
    }

    #[test]
    fn day_bounds_cover_exactly_one_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (start, end) = day_bounds(date);
        assert_eq!(end - start, 86_400.0);
        assert_eq!(storage_to_date(start), date);
        // One second before the end is still the same day; the end itself
        // belongs to the next day (half-open range).
        assert_eq!(storage_to_date(end - 1.0), date);
        assert_eq!(
            storage_to_date(end),
            NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()
        );
    }

    #[test]
    fn pre_2001_dates_are_negative_but_exact() {
        let instant = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
        let stored = to_storage(instant);
        assert!(stored < 0.0);
        assert_eq!(from_storage(stored), instant);
    }

    proptest! {
        #[test]
        fn round_trip_to_the_second(secs in -3_000_000_000i64..3_000_000_000i64) {
            let instant = DateTime::from_timestamp(secs, 0).unwrap();
            prop_assert_eq!(from_storage(to_storage(instant)), instant);
        }
    }
}
