//! Free-window derivation: subtract merged busy intervals from each day's
//! work window across a date range.
//!
//! The walk is a deterministic fold over the calendar dates, each day
//! independent of the last. Weekends never produce output, days already
//! behind `now` are skipped, and on `now`'s own date the window opens no
//! earlier than `now`. Candidates are filtered on their exact span and only
//! then floored to 5-minute display marks, so a surviving window can render
//! slightly shorter than the configured minimum.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::interval::TimeInterval;

/// The daily work window: local wall-clock bounds plus the zone they live in.
///
/// Invariant `start < end`, enforced by
/// [`SchedulerConfig::validate`](crate::config::SchedulerConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkDayBounds {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub tz: Tz,
}

/// A bookable span within a single day's work window, clear of all busy
/// intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FreeWindow {
    /// Whole minutes between start and end, after display rounding.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// One day's free windows, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayWindows {
    pub date: NaiveDate,
    pub windows: Vec<FreeWindow>,
}

/// Chronological availability; days with no qualifying window are omitted.
pub type Schedule = Vec<DayWindows>;

/// Resolve a local civil time to an instant, wall-clock style: ambiguous
/// times (DST fall-back) take the earlier instant, times inside a
/// spring-forward gap shift forward to the first wall clock that exists.
pub(crate) fn local_instant(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let mut probe = date.and_time(time);
    loop {
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            return dt.with_timezone(&Utc);
        }
        probe += Duration::minutes(1);
    }
}

/// Floor an instant to the previous 5-minute wall-clock mark in `tz`.
fn floor_to_mark(instant: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local = instant.with_timezone(&tz);
    local
        .with_minute(local.minute() - local.minute() % 5)
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_nanosecond(0))
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(instant)
}

/// Derive the availability schedule for the inclusive date range.
///
/// `busy` must already be merge-normalized (see [`crate::interval::merge`]):
/// sorted by start and pairwise-disjoint.
///
/// Per day: weekends are skipped outright; the work window is built from the
/// local wall-clock bounds (so a DST transition does not shift a 09:00–17:00
/// day); days behind `now` are dropped, and on `now`'s own date the window
/// start is clipped to `now`. Busy intervals belong to a day when their
/// local start or end date matches it; those are clipped to the window and
/// walked left to right with a cursor, emitting the gaps. Gaps shorter than
/// `min_duration` (measured before rounding) or starting in the past are
/// discarded; survivors are floored to 5-minute marks for display, which may
/// leave them rendering shorter than the minimum.
pub fn derive_schedule(
    busy: &[TimeInterval],
    bounds: &WorkDayBounds,
    range: (NaiveDate, NaiveDate),
    min_duration: Duration,
    now: DateTime<Utc>,
) -> Schedule {
    let (first, last) = range;
    let tz = bounds.tz;
    let today = now.with_timezone(&tz).date_naive();

    let mut schedule = Schedule::new();
    for date in first.iter_days().take_while(|d| *d <= last) {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        if date < today {
            continue;
        }

        let mut window_start = local_instant(tz, date, bounds.start);
        let window_end = local_instant(tz, date, bounds.end);
        if date == today {
            window_start = window_start.max(now);
        }
        let Some(window) = TimeInterval::new(window_start, window_end) else {
            // Workday already over.
            continue;
        };

        // A block belongs to this day when its local start or end date
        // matches, not on pure window intersection.
        let day_busy: Vec<TimeInterval> = busy
            .iter()
            .filter(|iv| {
                iv.start().with_timezone(&tz).date_naive() == date
                    || iv.end().with_timezone(&tz).date_naive() == date
            })
            .filter(|iv| iv.intersects(&window))
            .filter_map(|iv| {
                TimeInterval::new(iv.start().max(window.start()), iv.end().min(window.end()))
            })
            .collect();

        let mut candidates: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();
        let mut cursor = window.start();
        for block in &day_busy {
            if block.start() > cursor {
                candidates.push((cursor, block.start()));
            }
            cursor = cursor.max(block.end());
        }
        if cursor < window.end() {
            candidates.push((cursor, window.end()));
        }

        let windows: Vec<FreeWindow> = candidates
            .into_iter()
            .filter(|(start, end)| start < end)
            .filter(|(start, end)| *end - *start >= min_duration)
            .filter(|(start, _)| *start >= now)
            .map(|(start, end)| FreeWindow {
                start: floor_to_mark(start, tz),
                end: floor_to_mark(end, tz),
            })
            .collect();

        if !windows.is_empty() {
            debug!(%date, count = windows.len(), "free windows found");
            schedule.push(DayWindows { date, windows });
        }
    }
    schedule
}
