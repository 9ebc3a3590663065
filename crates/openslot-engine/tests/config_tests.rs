//! Tests for boundary validation and the default date range.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use openslot_engine::config::{ConfigError, SchedulerConfig};

fn base() -> SchedulerConfig {
    SchedulerConfig::new(chrono_tz::US::Eastern)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn defaults_are_valid() {
    let config = base();
    assert!(config.validate().is_ok());
    assert_eq!(config.work_start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    assert_eq!(config.work_end, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    assert_eq!(config.min_minutes, 30);
    assert_eq!(config.buffer_minutes, 15);
}

#[test]
fn inverted_work_window_is_rejected() {
    let mut config = base();
    config.work_start = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
    config.work_end = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyWorkWindow { .. })
    ));
}

#[test]
fn equal_work_bounds_are_rejected() {
    let mut config = base();
    config.work_end = config.work_start;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyWorkWindow { .. })
    ));
}

#[test]
fn zero_minimum_is_rejected() {
    let mut config = base();
    config.min_minutes = 0;
    assert_eq!(config.validate(), Err(ConfigError::ZeroMinimumLength));
}

#[test]
fn backwards_date_range_is_rejected() {
    let mut config = base();
    config.date_range = Some((date(2026, 3, 6), date(2026, 3, 2)));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvertedDateRange { .. })
    ));
}

#[test]
fn default_range_is_the_monday_anchored_week() {
    // Wednesday 2026-03-04, mid-morning Eastern.
    let now = Utc.with_ymd_and_hms(2026, 3, 4, 15, 0, 0).unwrap();
    assert_eq!(
        base().effective_range(now),
        (date(2026, 3, 2), date(2026, 3, 8))
    );
}

#[test]
fn default_range_follows_the_local_date() {
    // 03:00 UTC on March 2nd is still Sunday March 1st in Eastern, so the
    // week anchors a week earlier.
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 3, 0, 0).unwrap();
    assert_eq!(
        base().effective_range(now),
        (date(2026, 2, 23), date(2026, 3, 1))
    );
}

#[test]
fn explicit_range_wins_over_the_default() {
    let mut config = base();
    config.date_range = Some((date(2026, 3, 9), date(2026, 3, 13)));
    let now = Utc.with_ymd_and_hms(2026, 3, 4, 15, 0, 0).unwrap();
    assert_eq!(
        config.effective_range(now),
        (date(2026, 3, 9), date(2026, 3, 13))
    );
}
