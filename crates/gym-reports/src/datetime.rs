use chrono::{DateTime, Datelike, FixedOffset};

/// Whole days until `expiry`, rounded up. Negative once expired.
pub fn days_until(expiry: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> i64 {
    let seconds = (expiry - now).num_seconds();
    seconds.div_euclid(86_400) + i64::from(seconds.rem_euclid(86_400) != 0)
}

/// Time since a check-in, as "45 min" or "2h 5m".
pub fn elapsed_label(since: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> String {
    let minutes = (now - since).num_minutes().max(0);
    if minutes < 60 {
        return format!("{} min", minutes);
    }
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Same calendar month and year, in the offset of `now`.
pub fn same_month(date: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> bool {
    let date = date.with_timezone(now.offset());
    date.year() == now.year() && date.month() == now.month()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-15T10:00:00+00:00").unwrap()
    }

    #[test]
    fn test_days_until() {
        assert_eq!(days_until(now() + Duration::days(3), now()), 3);
        assert_eq!(days_until(now() + Duration::hours(1), now()), 1);
        assert_eq!(days_until(now() + Duration::hours(49), now()), 3);
        assert_eq!(days_until(now(), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(1), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(25), now()), -1);
    }

    #[test]
    fn test_elapsed_label() {
        assert_eq!(elapsed_label(now() - Duration::minutes(45), now()), "45 min");
        assert_eq!(elapsed_label(now() - Duration::minutes(125), now()), "2h 5m");
        assert_eq!(elapsed_label(now() + Duration::minutes(5), now()), "0 min");
    }

    #[test]
    fn test_same_month() {
        let other = DateTime::parse_from_rfc3339("2024-03-01T00:30:00+02:00").unwrap();
        // 2024-02-29T22:30 in UTC
        assert!(!same_month(other, now()));
        let other = DateTime::parse_from_rfc3339("2023-03-15T10:00:00+00:00").unwrap();
        assert!(!same_month(other, now()));
        assert!(same_month(now() - Duration::days(14), now()));
    }
}
