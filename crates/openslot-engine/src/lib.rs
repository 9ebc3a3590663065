//! # openslot-engine
//!
//! Computes a person's available meeting slots within a work week. Busy
//! intervals from a calendar feed are widened by a configurable buffer,
//! merged, and subtracted from the configured working hours, one weekday at
//! a time.
//!
//! The core is two pure functions composed in a pipeline:
//!
//! - [`interval::merge`] — collapse overlapping busy intervals into a
//!   minimal sorted, pairwise-disjoint sequence.
//! - [`schedule::derive_schedule`] — subtract the merged set from each
//!   day's work window, producing per-day free windows.
//!
//! ## Modules
//!
//! - [`interval`] — busy-interval type and merge normalization
//! - [`schedule`] — per-day free-window derivation
//! - [`event`] — raw provider events → buffered busy intervals
//! - [`config`] — request-scoped scheduler configuration
//! - [`input`] — timezone aliases and natural time-of-day parsing
//! - [`format`] — human-readable date/time/schedule rendering
//! - [`source`] — event-source boundary, busy cache, pipeline planner
//! - [`error`] — error types

pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod input;
pub mod interval;
pub mod schedule;
pub mod source;

pub use config::{ConfigError, SchedulerConfig};
pub use error::SlotError;
pub use event::{busy_intervals, parse_events, RawEvent};
pub use format::{format_date, format_time, render_schedule};
pub use input::{parse_time_of_day, resolve_timezone};
pub use interval::{merge, TimeInterval};
pub use schedule::{derive_schedule, DayWindows, FreeWindow, Schedule, WorkDayBounds};
pub use source::{BusyCache, EventSource, JsonEventSource, Planner};
