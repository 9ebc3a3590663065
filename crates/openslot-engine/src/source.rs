//! The calendar-provider boundary: event sources, the busy cache, and the
//! planner that runs the fetch → buffer → merge → derive pipeline.
//!
//! Authentication, pagination, and free/busy fallback live behind
//! [`EventSource`]; the engine only ever sees raw event ranges. Buffered,
//! merged busy sets are cached under an explicit (account, date range,
//! buffer) key with explicit invalidation — never implicit memoization.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use tracing::{debug, info_span};

use crate::config::SchedulerConfig;
use crate::error::{Result, SlotError};
use crate::event::{busy_intervals, parse_events, RawEvent};
use crate::interval::{merge, TimeInterval};
use crate::schedule::{derive_schedule, local_instant, Schedule};

/// Supplies raw events overlapping a UTC window.
///
/// Implementations own every provider concern: credentials, paging,
/// free/busy-only degradation. The engine calls `fetch` once per uncached
/// (account, range, buffer) key.
pub trait EventSource {
    fn fetch(&self, window: &TimeInterval) -> Result<Vec<RawEvent>>;
}

/// An event source backed by an already-retrieved JSON payload. Stands in
/// for the network provider in the CLI and in tests.
pub struct JsonEventSource {
    events: Vec<RawEvent>,
}

impl JsonEventSource {
    /// Accepts a bare event array or a provider list response with `items`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            events: parse_events(json)?,
        })
    }
}

impl EventSource for JsonEventSource {
    fn fetch(&self, _window: &TimeInterval) -> Result<Vec<RawEvent>> {
        Ok(self.events.clone())
    }
}

/// Cache key: whose calendar, which date range, and which buffer width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    account: String,
    range: (NaiveDate, NaiveDate),
    buffer_minutes: u32,
}

/// Explicit cache of buffered, merged busy sets.
///
/// Entries never expire on their own; callers invalidate by account when the
/// underlying calendar changes.
#[derive(Debug, Default)]
pub struct BusyCache {
    entries: HashMap<CacheKey, Vec<TimeInterval>>,
}

impl BusyCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &CacheKey) -> Option<&Vec<TimeInterval>> {
        self.entries.get(key)
    }

    fn insert(&mut self, key: CacheKey, busy: Vec<TimeInterval>) {
        self.entries.insert(key, busy);
    }

    /// Drop every cached range for one account.
    pub fn invalidate(&mut self, account: &str) {
        self.entries.retain(|key, _| key.account != account);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs the full availability pipeline for one event source.
pub struct Planner<S: EventSource> {
    source: S,
    cache: BusyCache,
}

impl<S: EventSource> Planner<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: BusyCache::new(),
        }
    }

    /// Compute the availability schedule for `account` under `config`.
    ///
    /// The buffered, merged busy set is cached per (account, date range,
    /// buffer). Derivation always runs, because its result depends on `now`.
    pub fn availability(
        &mut self,
        account: &str,
        config: &SchedulerConfig,
        now: DateTime<Utc>,
    ) -> Result<Schedule> {
        let _span = info_span!("availability", account).entered();
        config.validate()?;

        let range = config.effective_range(now);
        let key = CacheKey {
            account: account.to_string(),
            range,
            buffer_minutes: config.buffer_minutes,
        };

        let busy = match self.cache.get(&key) {
            Some(busy) => {
                debug!(account, "busy cache hit");
                busy.clone()
            }
            None => {
                let window_start = local_instant(config.timezone, range.0, NaiveTime::MIN);
                let window_end =
                    local_instant(config.timezone, range.1 + Duration::days(1), NaiveTime::MIN);
                let window = TimeInterval::new(window_start, window_end)
                    .ok_or_else(|| SlotError::Source("empty fetch window".to_string()))?;

                let events = self.source.fetch(&window)?;
                debug!(account, count = events.len(), "fetched events");

                let busy = merge(busy_intervals(&events, config.buffer()));
                debug!(account, blocks = busy.len(), "merged busy blocks");
                self.cache.insert(key, busy.clone());
                busy
            }
        };

        Ok(derive_schedule(
            &busy,
            &config.bounds(),
            range,
            config.min_duration(),
            now,
        ))
    }

    /// Forget cached busy data for `account`.
    pub fn invalidate(&mut self, account: &str) {
        self.cache.invalidate(account);
    }

    /// The cache, for inspection.
    pub fn cache(&self) -> &BusyCache {
        &self.cache
    }
}
