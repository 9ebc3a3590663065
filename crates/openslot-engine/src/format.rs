//! Human-readable rendering of dates, times, and schedules.
//!
//! Dates render as "Monday, June 2nd"; times as a lowercase 12-hour clock
//! with the minutes elided on the hour ("9am", "5:30pm").

use chrono::{DateTime, Datelike, NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::schedule::Schedule;

/// Ordinal suffix for a day of the month. 11–13 take "th" despite ending in
/// 1, 2, 3.
fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// "Monday, June 2nd"
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{}{}",
        date.format("%A, %B %-d"),
        ordinal_suffix(date.day())
    )
}

/// Lowercase 12-hour clock, minutes elided when zero: "9am", "5:30pm",
/// "12pm".
pub fn format_time(dt: DateTime<Tz>) -> String {
    let (is_pm, hour) = dt.hour12();
    let suffix = if is_pm { "pm" } else { "am" };
    if dt.minute() == 0 {
        format!("{hour}{suffix}")
    } else {
        format!("{hour}:{:02}{suffix}", dt.minute())
    }
}

/// Render a schedule as display lines, one per free window, grouped by date
/// in chronological order.
pub fn render_schedule(schedule: &Schedule, tz: Tz) -> Vec<String> {
    let mut lines = Vec::new();
    for day in schedule {
        let label = format_date(day.date);
        for window in &day.windows {
            lines.push(format!(
                "{}: {} to {}",
                label,
                format_time(window.start.with_timezone(&tz)),
                format_time(window.end.with_timezone(&tz)),
            ));
        }
    }
    lines
}
