//! Human-readable durations for pages and admin listings.

const UNITS: [(u64, &str); 6] = [
    (52 * 7 * 24 * 3600, "year"),
    (7 * 24 * 3600, "week"),
    (24 * 3600, "day"),
    (3600, "hour"),
    (60, "minute"),
    (1, "second"),
];

/// At most this many units are rendered, largest first.
const MAX_UNITS: usize = 3;

/// Formats a number of seconds as e.g. `3 days` or `2 days, 23 hours and 59 minutes`.
///
/// Zero-valued units are skipped and only the three largest non-zero units are
/// kept.
pub fn format_timespan(seconds: u64) -> String {
    let mut rest = seconds;
    let mut parts = Vec::new();

    for (size, name) in UNITS {
        let amount = rest / size;
        rest %= size;

        if amount > 0 {
            let plural = if amount == 1 { "" } else { "s" };
            parts.push(format!("{amount} {name}{plural}"));
        }
    }

    parts.truncate(MAX_UNITS);

    match parts.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, head)) => format!("{} and {}", head.join(", "), last),
        None => "0 seconds".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expiration_delay() {
        assert_eq!(format_timespan(259_200), "3 days");
    }

    #[test]
    fn test_single_units() {
        assert_eq!(format_timespan(1), "1 second");
        assert_eq!(format_timespan(60), "1 minute");
        assert_eq!(format_timespan(3600), "1 hour");
        assert_eq!(format_timespan(86_400), "1 day");
        assert_eq!(format_timespan(604_800), "1 week");
    }

    #[test]
    fn test_multiple_units() {
        assert_eq!(format_timespan(90), "1 minute and 30 seconds");
        assert_eq!(
            format_timespan(2 * 86_400 + 23 * 3600 + 59 * 60),
            "2 days, 23 hours and 59 minutes"
        );
    }

    #[test]
    fn test_truncates_to_three_units() {
        assert_eq!(
            format_timespan(86_400 + 3600 + 60 + 1),
            "1 day, 1 hour and 1 minute"
        );
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_timespan(0), "0 seconds");
    }
}
