//! Working calendar.
//!
//! Restricts when a task may *start*: inside the daily working window and
//! not on the closed weekday. A task that starts inside the window runs to
//! completion even if it crosses the window end.
//!
//! # Time Model
//! Instants are minutes from `epoch`. The calendar converts them to
//! wall-clock datetimes (via `chrono`) to get the weekday and the
//! minute-of-day. The epoch must fall on midnight, so an instant's
//! minute-of-day is also what `format_clock` prints for it.
//!
//! # Search
//! `next_working_instant` is a forward scan in fixed steps, capped at
//! `max_attempts`. A window the scan can never land in (a zero-length day
//! that is not step-aligned, say) ends in `CalendarResolution`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use super::{Minutes, MINUTES_PER_DAY};
use crate::error::{Result, ScheduleError};

/// Working hours and the weekly closed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calendar {
    /// Wall-clock datetime of minute 0. Must be a midnight.
    pub epoch: NaiveDateTime,
    /// Window start, minutes after midnight.
    pub work_start: Minutes,
    /// Window length in minutes. The window end is inclusive.
    pub daily_minutes: Minutes,
    /// Weekday with no work. `None` = open every day.
    pub closed_day: Option<Weekday>,
    /// Scan step in minutes.
    pub step_minutes: Minutes,
    /// Scan cap.
    pub max_attempts: u32,
}

fn default_epoch() -> NaiveDateTime {
    // 2024-01-01 is a Monday.
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            work_start: 9 * 60,
            daily_minutes: 8 * 60,
            closed_day: Some(Weekday::Sun),
            step_minutes: 60,
            max_attempts: 10_000,
        }
    }
}

impl Calendar {
    /// Creates a calendar with the given daily window and default
    /// epoch, closed day, and scan settings.
    pub fn new(work_start: Minutes, daily_minutes: Minutes) -> Self {
        Self {
            work_start,
            daily_minutes,
            ..Self::default()
        }
    }

    /// Sets the epoch.
    pub fn with_epoch(mut self, epoch: NaiveDateTime) -> Self {
        self.epoch = epoch;
        self
    }

    /// Sets (or clears) the closed weekday.
    pub fn with_closed_day(mut self, day: Option<Weekday>) -> Self {
        self.closed_day = day;
        self
    }

    /// Sets the scan step.
    pub fn with_step(mut self, step_minutes: Minutes) -> Self {
        self.step_minutes = step_minutes;
        self
    }

    /// Sets the scan cap.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.epoch.num_seconds_from_midnight() != 0 || self.epoch.nanosecond() != 0 {
            return Err(ScheduleError::InvalidCalendar(format!(
                "epoch {} is not at midnight",
                self.epoch
            )));
        }
        if !(0..MINUTES_PER_DAY).contains(&self.work_start) {
            return Err(ScheduleError::InvalidCalendar(format!(
                "work_start {} is outside the day",
                self.work_start
            )));
        }
        if !(0..=MINUTES_PER_DAY - self.work_start).contains(&self.daily_minutes) {
            return Err(ScheduleError::InvalidCalendar(format!(
                "daily_minutes {} does not fit after work_start {}",
                self.daily_minutes, self.work_start
            )));
        }
        if self.step_minutes <= 0 {
            return Err(ScheduleError::InvalidCalendar(format!(
                "step_minutes must be positive, got {}",
                self.step_minutes
            )));
        }
        if self.max_attempts == 0 {
            return Err(ScheduleError::InvalidCalendar(
                "max_attempts must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Wall-clock datetime of an instant. `None` if out of chrono's range.
    pub fn datetime(&self, instant: Minutes) -> Option<NaiveDateTime> {
        TimeDelta::try_minutes(instant).and_then(|d| self.epoch.checked_add_signed(d))
    }

    /// Whether a task may start at `instant`.
    pub fn is_working(&self, instant: Minutes) -> bool {
        let Some(dt) = self.datetime(instant) else {
            return false;
        };
        if self.closed_day == Some(dt.weekday()) {
            return false;
        }
        let of_day = Minutes::from(dt.hour() * 60 + dt.minute());
        of_day >= self.work_start && of_day <= self.work_start.saturating_add(self.daily_minutes)
    }

    /// First working instant at or after `instant`.
    ///
    /// Stops early with `CalendarResolution` if the scan would step past
    /// the last representable minute.
    pub fn next_working_instant(&self, instant: Minutes) -> Result<Minutes> {
        let mut candidate = instant;
        for attempt in 1..=self.max_attempts {
            if self.is_working(candidate) {
                return Ok(candidate);
            }
            candidate = candidate.checked_add(self.step_minutes).ok_or(
                ScheduleError::CalendarResolution {
                    from: instant,
                    attempts: attempt,
                },
            )?;
        }
        Err(ScheduleError::CalendarResolution {
            from: instant,
            attempts: self.max_attempts,
        })
    }
}
