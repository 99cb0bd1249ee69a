//! Date handling for KSeF documents.

use chrono::NaiveDate;

use super::patterns::{DATE_PREFIX, DATE_TIME};

/// Reformat `yyyy-mm-dd[...]` to `dd-mm-yyyy`.
///
/// Only the first three dash-separated groups are used, so timestamps work
/// too. Anything that does not start with such a date is returned unchanged.
pub fn reformat_date(value: &str) -> String {
    match DATE_PREFIX.captures(value) {
        Some(caps) => format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]),
        None => value.to_string(),
    }
}

/// Parse the calendar date at the start of a date or timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let caps = DATE_PREFIX.captures(value)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Printable form of a timestamp: `yyyy-mm-dd hh:mm:ss`.
///
/// Values that are not ISO timestamps are printed as they are.
pub fn display_date_time(value: &str) -> String {
    match DATE_TIME.captures(value) {
        Some(caps) => format!("{} {}", &caps[1], &caps[2]),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reformat_timestamp() {
        assert_eq!(reformat_date("2025-03-07T10:00:00"), "07-03-2025");
    }

    #[test]
    fn test_reformat_plain_date() {
        assert_eq!(reformat_date("2024-12-31"), "31-12-2024");
    }

    #[test]
    fn test_reformat_passes_through_non_dates() {
        assert_eq!(reformat_date("not-a-date"), "not-a-date");
        assert_eq!(reformat_date("07.03.2025"), "07.03.2025");
        assert_eq!(reformat_date(""), "");
    }

    #[test]
    fn test_non_ascii_digits_are_not_dates() {
        assert_eq!(reformat_date("２０２５-０３-０７"), "２０２５-０３-０７");
        assert_eq!(reformat_date("٢٠٢٥-٠٣-٠٧"), "٢٠٢٥-٠٣-٠٧");
        assert_eq!(parse_date("２０２５-０３-０７"), None);
        assert_eq!(display_date_time("２０２５-０３-０７T10:00:00"), "２０２５-０３-０７T10:00:00");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("15.01.2024"), None);
    }

    #[test]
    fn test_display_date_time() {
        assert_eq!(
            display_date_time("2025-03-07T10:15:30.123+01:00"),
            "2025-03-07 10:15:30"
        );
        assert_eq!(display_date_time("2025-03-07T10:15:30Z"), "2025-03-07 10:15:30");
        assert_eq!(display_date_time("2025-03-07"), "2025-03-07");
    }
}
