//! Date, span, and timestamp formatting utilities.

use std::fmt;

use jiff::civil::Date;
use jiff::{tz::TimeZone, Timestamp};

/// Formats a `Timestamp` in the system timezone via `Display`.
///
/// Output follows `YYYY-MM-DD HH:MM:SS TZ` with zero-padded components
/// and a timezone abbreviation (e.g. UTC, JST).
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Formats a schedule as a single date or an inclusive range.
///
/// A lone start date prints as `2024-06-01`; a start and end print as
/// `2024-06-01 → 2024-06-05`. Degenerate ranges collapse to the single
/// date form.
pub struct DateSpan(pub Date, pub Option<Date>);

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            Some(end) if end != self.0 => write!(f, "{} → {}", self.0, end),
            _ => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_date_span_single_day() {
        let span = DateSpan(date(2024, 6, 1), None);
        assert_eq!(span.to_string(), "2024-06-01");
    }

    #[test]
    fn test_date_span_range() {
        let span = DateSpan(date(2024, 6, 1), Some(date(2024, 6, 5)));
        assert_eq!(span.to_string(), "2024-06-01 → 2024-06-05");
    }

    #[test]
    fn test_date_span_degenerate_range() {
        let span = DateSpan(date(2024, 6, 1), Some(date(2024, 6, 1)));
        assert_eq!(span.to_string(), "2024-06-01");
    }
}
