//! Static VTIMEZONE definitions.
//!
//! Event times are floating, so the VTIMEZONE block only tells clients which
//! zone the calendar was written for. It never depends on the events.

use std::fmt;

use chrono::Weekday;
use chrono_tz::Tz;

use crate::error::{ScheduleError, ScheduleResult};

/// A yearly recurrence on the last given weekday of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyRule {
    pub month: u32,
    pub weekday: Weekday,
}

impl fmt::Display for YearlyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FREQ=YEARLY;BYMONTH={};BYDAY=-1{}",
            self.month,
            weekday_code(self.weekday)
        )
    }
}

fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// One offset transition (STANDARD or DAYLIGHT sub-component).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// UTC offset before the transition, e.g. `+0200`
    pub offset_from: &'static str,
    /// UTC offset after the transition
    pub offset_to: &'static str,
    /// Abbreviated zone name, e.g. `CET`
    pub name: &'static str,
    /// First occurrence, local time
    pub dtstart: &'static str,
    pub rule: YearlyRule,
}

impl Transition {
    fn push_lines(&self, kind: &str, lines: &mut Vec<String>) {
        lines.push(format!("BEGIN:{kind}"));
        lines.push(format!("TZOFFSETFROM:{}", self.offset_from));
        lines.push(format!("TZOFFSETTO:{}", self.offset_to));
        lines.push(format!("TZNAME:{}", self.name));
        lines.push(format!("DTSTART:{}", self.dtstart));
        lines.push(format!("RRULE:{}", self.rule));
        lines.push(format!("END:{kind}"));
    }
}

/// A named zone with its standard and daylight transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneDefinition {
    pub tzid: &'static str,
    pub standard: Transition,
    pub daylight: Transition,
}

impl TimezoneDefinition {
    /// Central European Time as observed in the Netherlands.
    pub fn europe_amsterdam() -> Self {
        TimezoneDefinition {
            tzid: "Europe/Amsterdam",
            standard: Transition {
                offset_from: "+0200",
                offset_to: "+0100",
                name: "CET",
                dtstart: "19701025T030000",
                rule: YearlyRule {
                    month: 10,
                    weekday: Weekday::Sun,
                },
            },
            daylight: Transition {
                offset_from: "+0100",
                offset_to: "+0200",
                name: "CEST",
                dtstart: "19700329T020000",
                rule: YearlyRule {
                    month: 3,
                    weekday: Weekday::Sun,
                },
            },
        }
    }

    /// Look up the built-in definition for an IANA zone name.
    ///
    /// Returns `Ok(None)` for valid zones without a built-in transition pair.
    pub fn for_zone(name: &str) -> ScheduleResult<Option<Self>> {
        let tz: Tz = name
            .parse()
            .map_err(|_| ScheduleError::UnknownTimezone(name.to_string()))?;

        Ok(match tz {
            Tz::Europe__Amsterdam => Some(Self::europe_amsterdam()),
            _ => None,
        })
    }

    /// Content lines of the VTIMEZONE component, without line terminators.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "BEGIN:VTIMEZONE".to_string(),
            format!("TZID:{}", self.tzid),
        ];
        self.standard.push_lines("STANDARD", &mut lines);
        self.daylight.push_lines("DAYLIGHT", &mut lines);
        lines.push("END:VTIMEZONE".to_string());
        lines
    }
}
