//! The build operation: selection in, calendar document out.

use tracing::info;

use crate::dataset::filter_events;
use crate::error::ScheduleResult;
use crate::event::SessionEvent;
use crate::ics::{CalendarOptions, ScheduleFormatter};
use crate::selection::Selection;
use crate::stamp::{Clock, generation_timestamp};

/// Result of a build request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// No course was selected; nothing was generated.
    NothingSelected,
    /// The rendered calendar and the number of events in it.
    Document { ics: String, events: usize },
}

/// Filter `events` to the selected courses and render them as one calendar.
///
/// An empty selection is not an error: it returns
/// [`BuildOutcome::NothingSelected`] without reading the clock. A selection
/// that matches no events still yields a (valid, empty) calendar.
pub fn build_schedule_document(
    events: &[SessionEvent],
    selection: &Selection,
    options: &CalendarOptions,
    clock: &dyn Clock,
) -> ScheduleResult<BuildOutcome> {
    if selection.is_empty() {
        info!("no courses selected, nothing to build");
        return Ok(BuildOutcome::NothingSelected);
    }

    let formatter = ScheduleFormatter::new(options.clone())?;
    let selected = filter_events(events, selection);
    let dtstamp = generation_timestamp(clock.now());

    let ics = formatter.render(selected.iter().copied(), &dtstamp)?;
    info!(
        courses = selection.len(),
        events = selected.len(),
        "built schedule"
    );

    Ok(BuildOutcome::Document {
        ics,
        events: selected.len(),
    })
}
