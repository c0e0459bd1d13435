//! Date layouts of the source data and conversion to iCalendar timestamps.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ScheduleError, ScheduleResult};

/// Textual layout of the `date` field in the dataset.
///
/// Both layouts are day, month, year; they differ only in the separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLayout {
    /// `25/12/2024`
    #[default]
    #[serde(alias = "day/month/year")]
    Slash,
    /// `25-12-2024`
    #[serde(alias = "day-month-year")]
    Dash,
}

impl DateLayout {
    pub fn separator(self) -> char {
        match self {
            DateLayout::Slash => '/',
            DateLayout::Dash => '-',
        }
    }
}

/// How date and time components are checked before formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateValidation {
    /// Components are copied through as-is. Malformed input gives a
    /// malformed timestamp, never an error.
    #[default]
    Lenient,
    /// Components must form a real calendar date and time of day.
    Strict,
}

/// Build a floating `YYYYMMDDTHHMM00` timestamp from a dataset date and time.
///
/// Missing components are rendered as empty strings.
pub fn format_date(layout: DateLayout, date: &str, time: &str) -> String {
    let mut date_parts = date.split(layout.separator());
    let day = date_parts.next().unwrap_or("");
    let month = date_parts.next().unwrap_or("");
    let year = date_parts.next().unwrap_or("");

    let mut time_parts = time.split(':');
    let hour = time_parts.next().unwrap_or("");
    let minute = time_parts.next().unwrap_or("");

    format!("{year}{month}{day}T{hour}{minute}00")
}

/// Like [`format_date`], but rejects components outside their valid ranges.
pub fn format_date_strict(layout: DateLayout, date: &str, time: &str) -> ScheduleResult<String> {
    let datetime = NaiveDateTime::new(parse_date(layout, date)?, parse_time(time)?);
    Ok(datetime.format("%Y%m%dT%H%M00").to_string())
}

/// Format with the given validation policy.
pub fn format_with(
    validation: DateValidation,
    layout: DateLayout,
    date: &str,
    time: &str,
) -> ScheduleResult<String> {
    match validation {
        DateValidation::Lenient => Ok(format_date(layout, date, time)),
        DateValidation::Strict => format_date_strict(layout, date, time),
    }
}

fn parse_date(layout: DateLayout, date: &str) -> ScheduleResult<NaiveDate> {
    let invalid = || ScheduleError::InvalidDate(date.to_string());

    let parts: Vec<&str> = date.split(layout.separator()).map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        debug!(date, ?layout, "date does not have three components");
        return Err(invalid());
    };

    let day: u32 = day.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn parse_time(time: &str) -> ScheduleResult<NaiveTime> {
    let invalid = || ScheduleError::InvalidTime(time.to_string());

    let (hour, minute) = time.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}
