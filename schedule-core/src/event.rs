//! Course session records.

use serde::{Deserialize, Serialize};

/// One scheduled session of a course, as it appears in the dataset.
///
/// All fields are kept as the raw strings from the source data. `date` uses
/// the layout configured in [`crate::date_layout::DateLayout`], `start` and
/// `end` are `HH:MM` in 24-hour form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub course: String,
    pub label: String,
    pub location: String,
    pub date: String,
    pub start: String,
    pub end: String,
}
