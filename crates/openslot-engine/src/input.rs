//! Input normalization: timezone aliases and natural time-of-day parsing.
//!
//! Thin helpers between user-facing strings and the core types. The alias
//! table and the accepted time spellings match what people actually type at
//! a prompt ("est", "noon", "half past 7", "8:30am").

use chrono::NaiveTime;
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

/// Common US abbreviations accepted in place of IANA zone names.
const TIMEZONE_ALIASES: &[(&str, &str)] = &[
    ("est", "US/Eastern"),
    ("eastern", "US/Eastern"),
    ("edt", "US/Eastern"),
    ("cst", "US/Central"),
    ("central", "US/Central"),
    ("mst", "US/Mountain"),
    ("mountain", "US/Mountain"),
    ("pst", "US/Pacific"),
    ("pacific", "US/Pacific"),
    ("pt", "US/Pacific"),
    ("gmt", "Etc/GMT"),
    ("utc", "UTC"),
];

/// Resolve a user-supplied zone: an alias from the table above (matched
/// case-insensitively), otherwise a full IANA identifier.
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` when the input is neither.
pub fn resolve_timezone(input: &str) -> Result<Tz> {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    let name = TIMEZONE_ALIASES
        .iter()
        .find(|&&(alias, _)| alias == lower)
        .map_or(trimmed, |&(_, name)| name);
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(input.to_string()))
}

/// Parse a natural time-of-day string.
///
/// Accepted spellings: `noon`, `midnight`, `half past 7`, bare hours (`6`,
/// `18`), compact clock digits (`830`, `0830`), and clock times with an
/// optional 12-hour suffix (`7:00`, `8:00AM`, `5pm`).
///
/// # Errors
/// Returns `SlotError::InvalidTime` for anything else, including hours or
/// minutes out of range.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime> {
    let raw = input.trim().to_ascii_lowercase();
    let invalid = || SlotError::InvalidTime(input.to_string());

    match raw.as_str() {
        "noon" => return Ok(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        "midnight" => return Ok(NaiveTime::MIN),
        _ => {}
    }

    if let Some(rest) = raw.strip_prefix("half past") {
        let hour: u32 = rest.trim().parse().map_err(|_| invalid())?;
        return NaiveTime::from_hms_opt(hour, 30, 0).ok_or_else(invalid);
    }

    // Compact digit forms: "6" means 06:00, "830" and "0830" mean 08:30.
    if !raw.is_empty() && raw.len() <= 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        let (hour, minute) = if raw.len() <= 2 {
            (raw.parse().map_err(|_| invalid())?, 0)
        } else {
            let split = raw.len() - 2;
            (
                raw[..split].parse().map_err(|_| invalid())?,
                raw[split..].parse().map_err(|_| invalid())?,
            )
        };
        return NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid);
    }

    // Clock forms with an optional am/pm suffix.
    let (clock, suffix) = if let Some(rest) = raw.strip_suffix("am") {
        (rest.trim_end(), Some("am"))
    } else if let Some(rest) = raw.strip_suffix("pm") {
        (rest.trim_end(), Some("pm"))
    } else {
        (raw.as_str(), None)
    };

    let (hour_str, minute_str) = match clock.split_once(':') {
        Some((h, m)) => (h, m),
        None => (clock, "0"),
    };
    let mut hour: u32 = hour_str.trim().parse().map_err(|_| invalid())?;
    let minute: u32 = minute_str.trim().parse().map_err(|_| invalid())?;

    match suffix {
        Some("am") if hour == 12 => hour = 0,
        Some("pm") if hour < 12 => hour += 12,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}
