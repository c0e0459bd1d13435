//! ICS document generation.
//!
//! Calendars are written according to RFC 5545 with floating event times.

mod generate;
mod options;

pub use generate::{ScheduleFormatter, event_uid};
pub use options::{CalendarOptions, LineEnding};
