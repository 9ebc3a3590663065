//! Error types for openslot-engine operations.

use thiserror::Error;

/// Errors raised while preparing inputs for or running the scheduler.
///
/// The core derivation itself never fails: malformed intervals are dropped
/// before normalization and an empty schedule is a legitimate result.
#[derive(Error, Debug)]
pub enum SlotError {
    /// The timezone string was neither a known alias nor a valid IANA name.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A time-of-day string could not be parsed.
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    /// Configuration rejected at the boundary, before the core ran.
    #[error("Invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The raw event payload was not valid JSON.
    #[error("Event parse error: {0}")]
    EventParse(#[from] serde_json::Error),

    /// The event source failed to produce events.
    #[error("Event source error: {0}")]
    Source(String),
}

/// Convenience alias used throughout openslot-engine.
pub type Result<T> = std::result::Result<T, SlotError>;
