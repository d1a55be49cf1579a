//! Fixed-precision formatting of aggregation output.
//!
//! Numbers are written fixed-point with 9 decimals, never in scientific
//! notation. Dates are written as ISO-8601 with an explicit offset, e.g.
//! `2017-01-01T00:00:00+00:00`.
//!
//! # Examples
//!
//! ```
//! use fleet_core::format::{format_date, format_value, parse_date, parse_value};
//!
//! assert_eq!(format_value(12.8492932), "12.849293200");
//! assert_eq!(format_value(1e-12), "0.000000000");
//!
//! let date = parse_date("2017-01-01T00:00:00+00:00").unwrap();
//! assert_eq!(format_date(&date), "2017-01-01T00:00:00+00:00");
//! assert_eq!(parse_value("137.175004008").unwrap(), 137.175004008);
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};

use crate::types::{CoreError, ReportDate};

/// Decimal places kept for every serialised number.
pub const VALUE_DECIMALS: usize = 9;

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Format a number fixed-point with [`VALUE_DECIMALS`] decimals.
pub fn format_value(value: f64) -> String {
    format!("{:.*}", VALUE_DECIMALS, value)
}

/// Parse a number written by [`format_value`] (or any plain decimal).
pub fn parse_value(text: &str) -> Result<f64, CoreError> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| CoreError::format(format!("'{}' is not a number: {}", text, e)))
}

/// Format a date as ISO-8601 with offset.
///
/// Fractional seconds appear only when present.
pub fn format_date(date: &ReportDate) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Parse a report date.
///
/// Accepts RFC 3339 (offset kept as written), offset-less timestamps
/// (read as UTC) and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(text: &str) -> Result<ReportDate, CoreError> {
    let text = text.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Ok(date);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| CoreError::format(format!("'{}' is not a recognised date", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{Datelike, FixedOffset, Timelike};

    #[test]
    fn test_format_value_fixed_point() {
        assert_eq!(format_value(5341.716526632), "5341.716526632");
        assert_eq!(format_value(0.0), "0.000000000");
        assert_eq!(format_value(-2.5), "-2.500000000");
        assert_eq!(format_value(1.0e15), "1000000000000000.000000000");
    }

    #[test]
    fn test_format_value_never_scientific() {
        for value in [1.0e-10, 3.3e20, 123456789.123456789] {
            let text = format_value(value);
            assert!(!text.contains('e') && !text.contains('E'), "{text}");
        }
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert!(parse_value("twelve").is_err());
        assert_eq!(parse_value(" 1.5 ").unwrap(), 1.5);
    }

    #[test]
    fn test_format_date_with_offset() {
        let date = parse_date("2017-01-01T00:00:00+00:00").unwrap();
        assert_eq!(format_date(&date), "2017-01-01T00:00:00+00:00");

        let date = parse_date("2017-03-26T01:30:00+01:00").unwrap();
        assert_eq!(format_date(&date), "2017-03-26T01:30:00+01:00");
    }

    #[test]
    fn test_parse_date_keeps_offset() {
        let date = parse_date("2017-01-01T00:00:00-05:00").unwrap();
        assert_eq!(date.offset(), &FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(date.day(), 1);
    }

    #[test]
    fn test_parse_date_without_offset_is_utc() {
        let date = parse_date("2017-01-02T06:00:00").unwrap();
        assert_eq!(date.offset().local_minus_utc(), 0);
        assert_eq!(date.hour(), 6);
        assert_eq!(format_date(&date), "2017-01-02T06:00:00+00:00");
    }

    #[test]
    fn test_parse_bare_date() {
        let date = parse_date("2017-01-03").unwrap();
        assert_eq!(format_date(&date), "2017-01-03T00:00:00+00:00");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("2017-13-01").is_err());
    }

    #[test]
    fn test_fractional_seconds_survive() {
        let date = parse_date("2017-01-01T00:00:00.250+00:00").unwrap();
        assert_eq!(parse_date(&format_date(&date)).unwrap(), date);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn date_strategy() -> impl Strategy<Value = ReportDate> {
            (2000i32..2100i32, 1u32..13u32, 1u32..29u32, 0u32..24u32, -12i32..15i32).prop_filter_map(
                "valid date",
                |(year, month, day, hour, offset_hours)| {
                    let offset = FixedOffset::east_opt(offset_hours * 3600)?;
                    NaiveDate::from_ymd_opt(year, month, day)?
                        .and_hms_opt(hour, 0, 0)?
                        .and_local_timezone(offset)
                        .single()
                },
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn test_value_round_trip(value in -1.0e9f64..1.0e9f64) {
                let parsed = parse_value(&format_value(value)).unwrap();
                assert_abs_diff_eq!(parsed, value, epsilon = 1e-9);
            }

            #[test]
            fn test_date_round_trip(date in date_strategy()) {
                let parsed = parse_date(&format_date(&date)).unwrap();
                prop_assert_eq!(parsed, date);
                prop_assert_eq!(parsed.offset(), date.offset());
                prop_assert_eq!(parsed.date_naive(), date.date_naive());
            }
        }
    }
}
