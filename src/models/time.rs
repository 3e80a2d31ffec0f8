//! Time representation.
//!
//! Instants are integer minutes from a fixed origin. The consumer decides
//! what minute 0 means (midnight of the first planning day, typically);
//! the calendar extension pins it to a concrete midnight through its epoch,
//! so formatted clocks agree with the calendar's wall clock.
//!
//! Formatting is pure and stateless; the core never stores display strings.

use serde::{Deserialize, Serialize};

/// An instant or a duration, in minutes.
pub type Minutes = i64;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// Clock display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    /// `HH:MM`, 00:00 through 23:59.
    #[default]
    H24,
    /// `h:MM AM` / `h:MM PM`.
    H12,
}

/// Formats the time-of-day of an instant.
///
/// Only the minute-of-day is shown; the day component is dropped.
/// Negative instants wrap into the previous day.
///
/// ```
/// use shop_schedule::models::{format_clock, ClockFormat};
///
/// assert_eq!(format_clock(540, ClockFormat::H24), "09:00");
/// assert_eq!(format_clock(1020, ClockFormat::H12), "5:00 PM");
/// ```
pub fn format_clock(instant: Minutes, format: ClockFormat) -> String {
    let of_day = instant.rem_euclid(MINUTES_PER_DAY);
    let hours = of_day / 60;
    let minutes = of_day % 60;
    match format {
        ClockFormat::H24 => format!("{hours:02}:{minutes:02}"),
        ClockFormat::H12 => {
            let suffix = if hours < 12 { "AM" } else { "PM" };
            let h = match hours % 12 {
                0 => 12,
                h => h,
            };
            format!("{h}:{minutes:02} {suffix}")
        }
    }
}

/// Formats a `[start, end]` span as `"HH:MM - HH:MM"`.
pub fn format_window(start: Minutes, end: Minutes, format: ClockFormat) -> String {
    format!("{} - {}", format_clock(start, format), format_clock(end, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_24h() {
        assert_eq!(format_clock(0, ClockFormat::H24), "00:00");
        assert_eq!(format_clock(545, ClockFormat::H24), "09:05");
        assert_eq!(format_clock(1439, ClockFormat::H24), "23:59");
    }

    #[test]
    fn test_format_wraps_days() {
        assert_eq!(format_clock(MINUTES_PER_DAY + 90, ClockFormat::H24), "01:30");
        assert_eq!(format_clock(-30, ClockFormat::H24), "23:30");
    }

    #[test]
    fn test_format_12h() {
        assert_eq!(format_clock(0, ClockFormat::H12), "12:00 AM");
        assert_eq!(format_clock(720, ClockFormat::H12), "12:00 PM");
        assert_eq!(format_clock(785, ClockFormat::H12), "1:05 PM");
        assert_eq!(format_clock(659, ClockFormat::H12), "10:59 AM");
    }

    #[test]
    fn test_format_window() {
        assert_eq!(format_window(540, 1020, ClockFormat::H24), "09:00 - 17:00");
    }
}
