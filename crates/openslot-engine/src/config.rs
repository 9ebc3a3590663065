//! Request-scoped scheduler configuration.
//!
//! Every invocation carries an explicit [`SchedulerConfig`] validated at the
//! boundary; nothing is held in ambient or session state. Invalid
//! configurations are rejected before the core runs, never during it.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::schedule::WorkDayBounds;

/// Rejected configurations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The workday would be empty or inverted.
    #[error("workday start {start} is not before workday end {end}")]
    EmptyWorkWindow { start: NaiveTime, end: NaiveTime },

    /// A zero minimum would admit degenerate windows.
    #[error("minimum meeting length must be a positive number of minutes")]
    ZeroMinimumLength,

    /// An explicit date range runs backwards.
    #[error("date range start {start} is after end {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
}

/// Everything one availability computation needs, supplied per request.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Local timezone for work hours, weekday decisions, and display.
    pub timezone: Tz,
    /// Start of the working day, local wall-clock time.
    pub work_start: NaiveTime,
    /// End of the working day, local wall-clock time.
    pub work_end: NaiveTime,
    /// Shortest free window worth reporting, in minutes.
    pub min_minutes: u32,
    /// Margin subtracted from each event start and added to each end.
    pub buffer_minutes: u32,
    /// Explicit date range (inclusive); when `None`, the week containing
    /// `now` is scanned.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl SchedulerConfig {
    /// A 09:00–17:00 workday with a 30-minute meeting floor and a 15-minute
    /// buffer in the given zone.
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            min_minutes: 30,
            buffer_minutes: 15,
            date_range: None,
        }
    }

    /// Reject configurations the core must never see.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work_start >= self.work_end {
            return Err(ConfigError::EmptyWorkWindow {
                start: self.work_start,
                end: self.work_end,
            });
        }
        if self.min_minutes == 0 {
            return Err(ConfigError::ZeroMinimumLength);
        }
        if let Some((start, end)) = self.date_range {
            if start > end {
                return Err(ConfigError::InvertedDateRange { start, end });
            }
        }
        Ok(())
    }

    /// The daily work window these settings describe.
    pub fn bounds(&self) -> WorkDayBounds {
        WorkDayBounds {
            start: self.work_start,
            end: self.work_end,
            tz: self.timezone,
        }
    }

    /// Buffer as a duration.
    pub fn buffer(&self) -> Duration {
        Duration::minutes(i64::from(self.buffer_minutes))
    }

    /// Minimum window length as a duration.
    pub fn min_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.min_minutes))
    }

    /// The date range to scan: the explicit one when present, otherwise the
    /// Monday-through-Sunday week containing `now` in the configured zone.
    pub fn effective_range(&self, now: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
        if let Some(range) = self.date_range {
            return range;
        }
        let today = now.with_timezone(&self.timezone).date_naive();
        let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        (monday, monday + Duration::days(6))
    }
}
