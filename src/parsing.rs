//! Timestamp parsing and formatting for close-approach records.
//!
//! The NASA close-approach dataset encodes event times as compact calendar
//! strings like `2020-Jan-01 00:00` (UTC, minute precision, English month
//! abbreviation). This module converts between that wire form, the
//! structured [`NaiveDateTime`] the catalog stores, and the
//! `2020-01-01 00:00` form used for display and export.

use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::{NeoError, NeoResult};

/// Wire format of the dataset's `cd` (calendar date) column.
pub const APPROACH_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Format used when rendering an approach time for display or export.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses a `YYYY-Mon-DD HH:MM` calendar string into a timestamp.
///
/// Leading and trailing whitespace is ignored. Month abbreviations are the
/// English three-letter forms used by the dataset (`Jan`, `Feb`, ...).
///
/// # Errors
/// Returns [`NeoError::InvalidTimestamp`] if the string does not match the
/// format or names an impossible calendar date.
pub fn parse_approach_time(value: &str) -> NeoResult<NaiveDateTime> {
    let trimmed = value.trim();
    NaiveDateTime::parse_from_str(trimmed, APPROACH_TIME_FORMAT)
        .map_err(|e| NeoError::invalid_timestamp(trimmed, &e.to_string()))
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM`, dropping seconds.
pub fn format_approach_time(time: &NaiveDateTime) -> String {
    time.format(DISPLAY_TIME_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` date as used by query parameters.
///
/// # Errors
/// Returns [`NeoError::InvalidTimestamp`] if the string is not an ISO
/// calendar date.
pub fn parse_query_date(value: &str) -> NeoResult<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|e| NeoError::invalid_timestamp(trimmed, &e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_approach_time() {
        let t = parse_approach_time("2020-Jan-01 00:00").unwrap();
        assert_eq!(t.to_string(), "2020-01-01 00:00:00");
    }

    #[test]
    fn test_parse_approach_time_trims_whitespace() {
        let t = parse_approach_time("  1900-Dec-31 23:59 ").unwrap();
        assert_eq!(format_approach_time(&t), "1900-12-31 23:59");
    }

    #[test]
    fn test_parse_approach_time_bad_month() {
        let err = parse_approach_time("2020-Foo-01 00:00").unwrap_err();
        assert!(matches!(err, NeoError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_parse_approach_time_impossible_date() {
        assert!(parse_approach_time("2021-Feb-30 12:00").is_err());
    }

    #[test]
    fn test_parse_approach_time_missing_minutes() {
        assert!(parse_approach_time("2020-Jan-01").is_err());
    }

    #[test]
    fn test_format_round_trip() {
        let t = parse_approach_time("2020-Jul-15 06:30").unwrap();
        assert_eq!(format_approach_time(&t), "2020-07-15 06:30");
    }

    #[test]
    fn test_parse_query_date() {
        let d = parse_query_date("2020-01-01").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_query_date_rejects_wire_format() {
        assert!(parse_query_date("2020-Jan-01").is_err());
    }
}
