//! Raw calendar events and their reduction to buffered busy intervals.
//!
//! Mirrors the provider's wire shape: each event boundary carries either a
//! timed `dateTime` or an all-day `date`. All-day markers expand to the whole
//! civil day (00:00:00 at the start, 23:59:59 at the end), timed values
//! without an offset are taken as UTC, and a symmetric buffer widens the span
//! before it becomes a busy interval. Events that do not parse are dropped,
//! not surfaced.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::interval::TimeInterval;

/// One boundary of a raw event: a timed instant or an all-day date.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventTime {
    /// RFC 3339 timestamp for timed events; offsetless values are UTC.
    #[serde(rename = "dateTime")]
    pub date_time: Option<String>,
    /// Civil date (YYYY-MM-DD) for all-day events.
    pub date: Option<String>,
}

impl EventTime {
    /// Parse this boundary to a UTC instant. A timed value wins over an
    /// all-day date; `day_end` selects the 23:59:59 expansion for all-day
    /// dates instead of midnight.
    fn instant(&self, day_end: bool) -> Option<DateTime<Utc>> {
        if let Some(ts) = &self.date_time {
            return parse_timestamp(ts);
        }
        let date: NaiveDate = self.date.as_deref()?.parse().ok()?;
        let time = if day_end {
            NaiveTime::from_hms_opt(23, 59, 59).unwrap()
        } else {
            NaiveTime::MIN
        };
        Some(DateTime::from_naive_utc_and_offset(date.and_time(time), Utc))
    }
}

/// A raw event as supplied by the calendar provider. Only the time markers
/// matter to the engine; the summary survives for log lines.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
}

impl RawEvent {
    fn label(&self) -> &str {
        self.summary.as_deref().unwrap_or("(untitled)")
    }
}

/// RFC 3339 first; offsetless timestamps are assumed to be UTC.
fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    ts.parse::<NaiveDateTime>()
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Parse a provider payload: either a bare JSON array of events or a list
/// response carrying the events under `items`.
pub fn parse_events(json: &str) -> Result<Vec<RawEvent>> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Object(mut map) => map.remove("items").unwrap_or(Value::Array(Vec::new())),
        other => other,
    };
    Ok(serde_json::from_value(items)?)
}

/// Reduce raw events to buffered busy intervals.
///
/// Each event's span is widened by `buffer` on both sides. Events with a
/// missing or unreadable boundary, and events that are degenerate even after
/// buffering, are dropped.
pub fn busy_intervals(events: &[RawEvent], buffer: Duration) -> Vec<TimeInterval> {
    let mut intervals = Vec::with_capacity(events.len());
    for event in events {
        let Some(start) = event.start.instant(false) else {
            debug!(summary = event.label(), "dropping event with unreadable start");
            continue;
        };
        let Some(end) = event.end.instant(true) else {
            debug!(summary = event.label(), "dropping event with unreadable end");
            continue;
        };
        match TimeInterval::new(start - buffer, end + buffer) {
            Some(iv) => intervals.push(iv),
            None => debug!(summary = event.label(), "dropping degenerate event"),
        }
    }
    intervals
}
