use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Utc};

use crate::error::{AnalyticsError, AnalyticsResult};

// Naive forms carry no offset and are taken as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses the timestamp of a maintenance event into UTC.
///
/// Accepts RFC 3339 (any offset, converted to UTC), naive date-times and bare
/// `YYYY-MM-DD` dates. Naive values are read as UTC, never as local time, so a
/// record near a month boundary always lands in the same bucket.
pub fn parse_occurred_on(input: &str) -> AnalyticsResult<DateTime<Utc>> {
    let input = input.trim();
    let invalid = || AnalyticsError::InvalidTimestamp(input.to_string());

    let parsed = if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        dt.with_timezone(&Utc)
    } else if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
    {
        naive.and_utc()
    } else if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc()
    } else {
        return Err(invalid());
    };

    ensure_keyable(parsed).map_err(|_| invalid())
}

/// Rejects instants whose year cannot be written as four digits.
pub fn ensure_keyable(dt: DateTime<Utc>) -> AnalyticsResult<DateTime<Utc>> {
    if (0..=9999).contains(&dt.year()) {
        Ok(dt)
    } else {
        Err(AnalyticsError::InvalidTimestamp(dt.to_rfc3339()))
    }
}

/// Zero-padded `YYYY-MM` bucket key; string order equals chronological order.
pub fn month_key(dt: &DateTime<Utc>) -> String {
    format!("{:04}-{:02}", dt.year(), dt.month())
}

/// Start of a trailing window of `months` calendar months ending at `now`.
///
/// The day is clamped to the end of the target month (2024-02-29 minus 12
/// months is 2023-02-28).
pub fn window_start(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let dt = parse_occurred_on("2024-02-01T01:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 31, 23, 30, 0).unwrap());
        assert_eq!(month_key(&dt), "2024-01");
    }

    #[test]
    fn test_parse_naive_is_utc() {
        let a = parse_occurred_on("2024-01-31 23:59:59").unwrap();
        let b = parse_occurred_on("2024-01-31T23:59:59").unwrap();
        assert_eq!(a, b);
        assert_eq!(month_key(&a), "2024-01");

        let c = parse_occurred_on("2024-01-31T23:59:59.250").unwrap();
        assert_eq!(month_key(&c), "2024-01");
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_occurred_on("2024-03-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "yesterday", "2024-13-01", "2024-02-30", "01/05/2024"] {
            assert_eq!(
                parse_occurred_on(bad),
                Err(AnalyticsError::InvalidTimestamp(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_five_digit_year_is_not_keyable() {
        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            ensure_keyable(far),
            Err(AnalyticsError::InvalidTimestamp(_))
        ));
        let near = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(ensure_keyable(near), Ok(near));
    }

    #[test]
    fn test_month_key_is_zero_padded() {
        let dt = Utc.with_ymd_and_hms(987, 3, 9, 0, 0, 0).unwrap();
        assert_eq!(month_key(&dt), "0987-03");
        assert!(month_key(&dt) < "2024-01".to_string());
    }

    #[test]
    fn test_window_start_clamps_leap_day() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        assert_eq!(
            window_start(now, 12),
            Utc.with_ymd_and_hms(2023, 2, 28, 12, 0, 0).unwrap()
        );
        assert_eq!(window_start(now, 0), now);
    }
}
