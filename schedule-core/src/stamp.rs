//! Generation timestamps (DTSTAMP) and the clock they are read from.

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current time.
///
/// Building a schedule reads the clock once; tests pass a [`FixedClock`]
/// to get byte-identical output.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render an instant as a UTC iCalendar timestamp (`YYYYMMDDTHHMMSSZ`).
///
/// Takes the extended ISO-8601 form, drops `-`, `:` and `.`, keeps the first
/// 15 characters and marks the result as UTC.
pub fn generation_timestamp(at: DateTime<Utc>) -> String {
    let iso = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let compact: String = iso
        .chars()
        .filter(|c| !matches!(c, '-' | ':' | '.'))
        .take(15)
        .collect();
    format!("{compact}Z")
}
