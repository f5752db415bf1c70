use std::time::Duration;

use anyhow::{anyhow, bail, Result};

/// Readings older than this are flagged for a re-test.
pub const OVERDUE_AFTER: Duration = Duration::from_secs(24 * 3600);

/// Suffix to seconds multiplier
const UNITS: &[(&str, u64)] = &[("m", 60), ("h", 3600), ("d", 86_400)];

/// Parse reading ages like "30m", "2h", "1d", "1.5h"
pub fn parse_age(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Age must be a non-negative number: {}", s);
            }
            return Duration::try_from_secs_f64(val * *multiplier as f64)
                .map_err(|_| anyhow!("Age out of range: {}", s));
        }
    }

    bail!("Unknown age format: {}", s)
}

/// Format an age for display, e.g. "2 hours ago"
pub fn format_age(d: Duration) -> String {
    let secs = d.as_secs();
    let (n, unit) = if secs < 3600 {
        (secs / 60, "minute")
    } else if secs < 86_400 {
        (secs / 3600, "hour")
    } else {
        (secs / 86_400, "day")
    };

    match n {
        0 => "just now".to_string(),
        1 => format!("1 {} ago", unit),
        n => format!("{} {}s ago", n, unit),
    }
}

/// Format an age compactly for serialization ("2h", "1d", "45m")
pub fn format_age_short(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 86_400 && secs % 86_400 == 0 {
        format!("{}d", secs / 86_400)
    } else if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}m", secs / 60)
    }
}

pub fn is_overdue(d: Duration) -> bool {
    d > OVERDUE_AFTER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_age("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_age("1.5h").unwrap(), Duration::from_secs(5400));
    }

    #[test]
    fn test_parse_days_and_minutes() {
        assert_eq!(parse_age("1d").unwrap(), Duration::from_secs(86_400));
        assert_eq!(parse_age(" 30m ").unwrap(), Duration::from_secs(1800));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_age("soon").is_err());
        assert!(parse_age("-2h").is_err());
        assert!(parse_age("h").is_err());
    }

    #[test]
    fn test_parse_rejects_overflowing_age() {
        assert!(parse_age("1e20d").is_err());
        assert!(parse_age("1e300m").is_err());
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::from_secs(7200)), "2 hours ago");
        assert_eq!(format_age(Duration::from_secs(3600)), "1 hour ago");
        assert_eq!(format_age(Duration::from_secs(86_400)), "1 day ago");
        assert_eq!(format_age(Duration::from_secs(20)), "just now");
    }

    #[test]
    fn test_short_format_parses_back() {
        for s in ["2h", "1d", "45m"] {
            assert_eq!(format_age_short(parse_age(s).unwrap()), s);
        }
    }

    #[test]
    fn test_overdue() {
        assert!(!is_overdue(Duration::from_secs(4 * 3600)));
        assert!(!is_overdue(OVERDUE_AFTER));
        assert!(is_overdue(Duration::from_secs(2 * 86_400)));
    }
}
