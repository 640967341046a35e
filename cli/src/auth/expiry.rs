//! Human-readable countdowns for token expiry.

use chrono::{DateTime, NaiveDateTime, Utc};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * 60;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Formats the time left until `expiry`, measured from `now`.
///
/// Returns `"Never"` when there is no expiry and `"expired"` once `expiry`
/// is at or before `now`. Otherwise picks the coarsest unit that applies:
/// days (whole when more than three, else one decimal), hours with one
/// decimal, whole minutes, or whole seconds.
pub fn format_remaining(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(expiry) = expiry else {
        return "Never".to_string();
    };

    if expiry <= now {
        return "expired".to_string();
    }

    let total = (expiry - now).num_seconds();
    let days = total / SECONDS_PER_DAY;
    let seconds = total % SECONDS_PER_DAY;

    if days != 0 {
        #[allow(clippy::cast_precision_loss)]
        let fractional = days as f64 + seconds as f64 / SECONDS_PER_DAY as f64;
        if fractional > 3.0 {
            format!("{days} days")
        } else {
            format!("{fractional:.1} days")
        }
    } else if seconds > SECONDS_PER_HOUR {
        #[allow(clippy::cast_precision_loss)]
        let hours = seconds as f64 / SECONDS_PER_HOUR as f64;
        format!("{hours:.1} hours")
    } else if seconds > SECONDS_PER_MINUTE {
        format!("{} minutes", seconds / SECONDS_PER_MINUTE)
    } else {
        format!("{seconds} seconds")
    }
}

/// Parses a raw expiry value from the account service.
///
/// Empty values mean "never expires". Timestamps without an offset are
/// taken to be UTC. Returns `None` for values that are not timestamps.
pub fn parse_expiry(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn remaining(delta: Duration) -> String {
        format_remaining(Some(now() + delta), now())
    }

    #[test]
    fn absent_expiry_never_expires() {
        assert_eq!(format_remaining(None, now()), "Never");
        assert_eq!(format_remaining(None, Utc::now()), "Never");
    }

    #[test]
    fn past_and_present_are_expired() {
        assert_eq!(format_remaining(Some(now()), now()), "expired");
        assert_eq!(remaining(Duration::seconds(-1)), "expired");
        assert_eq!(remaining(Duration::days(-30)), "expired");
    }

    #[test]
    fn seconds() {
        assert_eq!(remaining(Duration::seconds(30)), "30 seconds");
        assert_eq!(remaining(Duration::seconds(60)), "60 seconds");
    }

    #[test]
    fn minutes_are_floored() {
        assert_eq!(remaining(Duration::seconds(90)), "1 minutes");
        assert_eq!(remaining(Duration::seconds(3599)), "59 minutes");
        assert_eq!(remaining(Duration::seconds(3600)), "60 minutes");
    }

    #[test]
    fn hours_have_one_decimal() {
        assert_eq!(remaining(Duration::seconds(5400)), "1.5 hours");
        assert_eq!(remaining(Duration::hours(23)), "23.0 hours");
    }

    #[test]
    fn short_day_counts_have_one_decimal() {
        assert_eq!(remaining(Duration::days(2) + Duration::hours(1)), "2.0 days");
        assert_eq!(remaining(Duration::days(1) + Duration::hours(12)), "1.5 days");
        assert_eq!(remaining(Duration::days(3)), "3.0 days");
    }

    #[test]
    fn long_day_counts_are_truncated() {
        assert_eq!(remaining(Duration::days(10)), "10 days");
        assert_eq!(remaining(Duration::days(3) + Duration::hours(23)), "3 days");
    }

    #[test]
    fn parse_handles_offsets_and_naive_timestamps() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap();
        assert_eq!(parse_expiry(Some("2024-03-05T08:30:00+00:00")), Some(expected));
        assert_eq!(parse_expiry(Some("2024-03-05T10:30:00+02:00")), Some(expected));
        assert_eq!(parse_expiry(Some("2024-03-05T08:30:00.000000")), Some(expected));
        assert_eq!(parse_expiry(Some("2024-03-05 08:30:00")), Some(expected));
    }

    #[test]
    fn parse_treats_empty_as_absent() {
        assert_eq!(parse_expiry(None), None);
        assert_eq!(parse_expiry(Some("")), None);
        assert_eq!(parse_expiry(Some("  ")), None);
        assert_eq!(parse_expiry(Some("tomorrow")), None);
    }
}
