//! Tests for per-day free-window derivation.
//!
//! The reference week is Monday 2026-03-02 through Friday 2026-03-06 in
//! US/Eastern; the following Monday (2026-03-09) sits just past the US
//! spring-forward transition of 2026-03-08.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use openslot_engine::interval::TimeInterval;
use openslot_engine::schedule::{derive_schedule, WorkDayBounds};

const TZ: Tz = chrono_tz::US::Eastern;

fn bounds() -> WorkDayBounds {
    WorkDayBounds {
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        tz: TZ,
    }
}

/// A local Eastern wall-clock instant, as UTC.
fn local(d: u32, h: u32, min: u32) -> DateTime<Utc> {
    TZ.with_ymd_and_hms(2026, 3, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn busy(spans: &[(u32, u32, u32, u32, u32, u32)]) -> Vec<TimeInterval> {
    spans
        .iter()
        .map(|&(d1, h1, m1, d2, h2, m2)| {
            TimeInterval::new(local(d1, h1, m1), local(d2, h2, m2)).unwrap()
        })
        .collect()
}

/// Monday midnight, before any work window opens.
fn early_monday() -> DateTime<Utc> {
    local(2, 0, 0)
}

fn min_30() -> Duration {
    Duration::minutes(30)
}

// ── Whole-day shapes ────────────────────────────────────────────────────────

#[test]
fn free_day_is_one_full_window() {
    let schedule = derive_schedule(&[], &bounds(), (date(2), date(2)), min_30(), early_monday());

    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].date, date(2));
    assert_eq!(schedule[0].windows.len(), 1);
    assert_eq!(schedule[0].windows[0].start, local(2, 9, 0));
    assert_eq!(schedule[0].windows[0].end, local(2, 17, 0));
    assert_eq!(schedule[0].windows[0].duration_minutes(), 480);
}

#[test]
fn fully_busy_day_yields_nothing() {
    let busy = busy(&[(2, 9, 0, 2, 17, 0)]);
    let schedule = derive_schedule(&busy, &bounds(), (date(2), date(2)), min_30(), early_monday());
    assert!(schedule.is_empty(), "a covered day must be omitted entirely");
}

#[test]
fn midmorning_meeting_splits_the_window() {
    let busy = busy(&[(2, 10, 0, 2, 10, 30)]);
    let schedule = derive_schedule(&busy, &bounds(), (date(2), date(2)), min_30(), early_monday());

    assert_eq!(schedule.len(), 1);
    let windows = &schedule[0].windows;
    assert_eq!(windows.len(), 2);
    assert_eq!((windows[0].start, windows[0].end), (local(2, 9, 0), local(2, 10, 0)));
    assert_eq!((windows[1].start, windows[1].end), (local(2, 10, 30), local(2, 17, 0)));
}

#[test]
fn gaps_between_meetings_come_out_in_order() {
    let busy = busy(&[(2, 10, 0, 2, 11, 0), (2, 13, 0, 2, 14, 0)]);
    let schedule = derive_schedule(&busy, &bounds(), (date(2), date(2)), min_30(), early_monday());

    let windows = &schedule[0].windows;
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0].end, local(2, 10, 0));
    assert_eq!(windows[1].start, local(2, 11, 0));
    assert_eq!(windows[1].end, local(2, 13, 0));
    assert_eq!(windows[2].start, local(2, 14, 0));
}

#[test]
fn short_leading_gap_is_filtered_by_minimum() {
    // 09:00-09:50 busy leaves no gap before it and a 430-minute gap after;
    // with a 60-minute floor only the latter survives.
    let busy = busy(&[(2, 9, 0, 2, 9, 50)]);
    let schedule = derive_schedule(
        &busy,
        &bounds(),
        (date(2), date(2)),
        Duration::minutes(60),
        early_monday(),
    );

    let windows = &schedule[0].windows;
    assert_eq!(windows.len(), 1);
    assert_eq!((windows[0].start, windows[0].end), (local(2, 9, 50), local(2, 17, 0)));
}

#[test]
fn gap_just_under_minimum_is_dropped() {
    // 29-minute gap between the two meetings.
    let busy = busy(&[(2, 9, 0, 2, 12, 0), (2, 12, 29, 2, 17, 0)]);
    let schedule = derive_schedule(&busy, &bounds(), (date(2), date(2)), min_30(), early_monday());
    assert!(schedule.is_empty());
}

#[test]
fn busy_outside_work_hours_is_ignored() {
    let busy = busy(&[(2, 18, 0, 2, 19, 0)]);
    let schedule = derive_schedule(&busy, &bounds(), (date(2), date(2)), min_30(), early_monday());

    assert_eq!(schedule[0].windows.len(), 1);
    assert_eq!(schedule[0].windows[0].start, local(2, 9, 0));
    assert_eq!(schedule[0].windows[0].end, local(2, 17, 0));
}

// ── Calendar policy ─────────────────────────────────────────────────────────

#[test]
fn weekends_never_appear() {
    // 2026-03-07 is a Saturday, 2026-03-08 a Sunday.
    let schedule = derive_schedule(&[], &bounds(), (date(7), date(8)), min_30(), early_monday());
    assert!(schedule.is_empty());

    let week = derive_schedule(&[], &bounds(), (date(2), date(8)), min_30(), early_monday());
    let dates: Vec<NaiveDate> = week.iter().map(|day| day.date).collect();
    assert_eq!(dates, vec![date(2), date(3), date(4), date(5), date(6)]);
}

#[test]
fn past_days_are_skipped() {
    let now = local(4, 8, 0);
    let schedule = derive_schedule(&[], &bounds(), (date(2), date(6)), min_30(), now);
    let dates: Vec<NaiveDate> = schedule.iter().map(|day| day.date).collect();
    assert_eq!(dates, vec![date(4), date(5), date(6)]);
}

#[test]
fn now_clips_the_current_day() {
    let now = local(2, 11, 0);
    let schedule = derive_schedule(&[], &bounds(), (date(2), date(2)), min_30(), now);

    assert_eq!(schedule[0].windows.len(), 1);
    assert_eq!(schedule[0].windows[0].start, local(2, 11, 0));
    assert_eq!(schedule[0].windows[0].end, local(2, 17, 0));
}

#[test]
fn finished_workday_is_skipped() {
    let now = local(2, 18, 0);
    let schedule = derive_schedule(&[], &bounds(), (date(2), date(2)), min_30(), now);
    assert!(schedule.is_empty());
}

#[test]
fn day_membership_follows_block_start_or_end_date() {
    // One merged block from Tuesday 10:00 through Thursday 11:00. Tuesday
    // and Thursday see it; Wednesday does not match on either date and keeps
    // its full window.
    let busy = busy(&[(3, 10, 0, 5, 11, 0)]);
    let schedule = derive_schedule(&busy, &bounds(), (date(3), date(5)), min_30(), early_monday());

    assert_eq!(schedule.len(), 3);
    assert_eq!(schedule[0].windows[0].end, local(3, 10, 0));
    assert_eq!(
        (schedule[1].windows[0].start, schedule[1].windows[0].end),
        (local(4, 9, 0), local(4, 17, 0))
    );
    assert_eq!(schedule[2].windows[0].start, local(5, 11, 0));
}

// ── Rounding and DST ────────────────────────────────────────────────────────

#[test]
fn boundaries_floor_to_five_minute_marks() {
    // Free gap 09:07-12:43 renders as 09:05-12:40; the minimum-duration
    // check ran on the exact span.
    let busy = busy(&[(2, 9, 0, 2, 9, 7), (2, 12, 43, 2, 17, 0)]);
    let schedule = derive_schedule(&busy, &bounds(), (date(2), date(2)), min_30(), early_monday());

    let windows = &schedule[0].windows;
    assert_eq!(windows.len(), 1);
    assert_eq!((windows[0].start, windows[0].end), (local(2, 9, 5), local(2, 12, 40)));
}

#[test]
fn dst_transition_keeps_the_wall_clock_window() {
    // Monday 2026-03-02 is EST (UTC-5); Monday 2026-03-09 is EDT (UTC-4).
    // Both days keep a 09:00-17:00 local window.
    let before = derive_schedule(&[], &bounds(), (date(2), date(2)), min_30(), early_monday());
    assert_eq!(
        before[0].windows[0].start,
        Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap()
    );

    let after = derive_schedule(&[], &bounds(), (date(9), date(9)), min_30(), early_monday());
    assert_eq!(
        after[0].windows[0].start,
        Utc.with_ymd_and_hms(2026, 3, 9, 13, 0, 0).unwrap()
    );
    assert_eq!(after[0].windows[0].duration_minutes(), 480);
}
