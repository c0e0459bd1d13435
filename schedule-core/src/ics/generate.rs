//! Schedule formatting: course sessions to a single VCALENDAR document.

use icalendar::{Calendar, Component, EventLike};
use tracing::{debug, trace};

use crate::date_layout::format_with;
use crate::error::ScheduleResult;
use crate::event::SessionEvent;
use crate::ics::options::CalendarOptions;
use crate::timezone::TimezoneDefinition;

/// Build the UID for a session: `<DTEND>-<course>@<namespace>`.
///
/// Derived from the data only, so exporting the same sessions twice gives the
/// same UIDs and calendar clients update entries instead of duplicating them.
pub fn event_uid(dtend: &str, course: &str, namespace: &str) -> String {
    format!("{dtend}-{course}@{namespace}")
}

/// Renders course sessions into an iCalendar document.
#[derive(Debug, Clone)]
pub struct ScheduleFormatter {
    options: CalendarOptions,
    timezone: Option<TimezoneDefinition>,
}

impl ScheduleFormatter {
    /// Fails if a header value spans lines or `options.timezone` is not an
    /// IANA zone name.
    pub fn new(options: CalendarOptions) -> ScheduleResult<Self> {
        options.validate()?;
        let timezone = TimezoneDefinition::for_zone(&options.timezone)?;
        if options.include_timezone && timezone.is_none() {
            debug!(timezone = %options.timezone, "no VTIMEZONE definition, omitting block");
        }

        Ok(ScheduleFormatter { options, timezone })
    }

    /// Render `events` as one calendar. `dtstamp` is written to every event.
    pub fn render<'a, I>(&self, events: I, dtstamp: &str) -> ScheduleResult<String>
    where
        I: IntoIterator<Item = &'a SessionEvent>,
    {
        let mut cal = Calendar::new();
        let mut count = 0usize;

        for event in events {
            cal.push(self.build_event(event, dtstamp)?);
            count += 1;
        }

        let cal = cal.done();
        debug!(events = count, "rendered calendar");

        Ok(self.finish(&cal.to_string()))
    }

    fn build_event(&self, event: &SessionEvent, dtstamp: &str) -> ScheduleResult<icalendar::Event> {
        let layout = self.options.date_layout;
        let validation = self.options.validation;

        let start = format_with(validation, layout, &event.date, &event.start)?;
        let end = format_with(validation, layout, &event.date, &event.end)?;
        let uid = event_uid(&end, &event.course, &self.options.uid_namespace);
        trace!(%uid, %start, %end, "event");

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&uid);
        ics_event.summary(&event.label);

        // Floating times: no Z suffix, no TZID
        ics_event.add_property("DTSTART", &start);
        ics_event.add_property("DTEND", &end);
        ics_event.add_property("DTSTAMP", dtstamp);

        ics_event.location(&event.location);
        ics_event.add_property("STATUS", "CONFIRMED");
        ics_event.add_property("SEQUENCE", "0");

        Ok(ics_event.done())
    }

    /// Fixed header lines, in output order.
    fn header_lines(&self) -> Vec<String> {
        vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{}", self.options.product_id),
            "CALSCALE:GREGORIAN".to_string(),
            "METHOD:PUBLISH".to_string(),
            format!("X-WR-CALNAME:{}", self.options.calendar_name),
            format!("X-WR-TIMEZONE:{}", self.options.timezone),
        ]
    }

    /// Replace the icalendar crate's calendar header with ours, splice in the
    /// VTIMEZONE block and normalise line endings.
    ///
    /// The document ends with `END:VCALENDAR` and no trailing terminator.
    fn finish(&self, ics: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut in_header = false;

        for line in ics.lines() {
            if line == "BEGIN:VCALENDAR" {
                lines.extend(self.header_lines());
                if self.options.include_timezone {
                    if let Some(ref tz) = self.timezone {
                        lines.extend(tz.to_lines());
                    }
                }
                in_header = true;
                continue;
            }

            if in_header {
                if line.starts_with("BEGIN:") || line == "END:VCALENDAR" {
                    in_header = false;
                } else {
                    continue;
                }
            }

            lines.push(line.to_string());
        }

        lines.join(self.options.line_ending.as_str())
    }
}
