use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CALENDAR_NAME, DEFAULT_PRODUCT_ID, DEFAULT_TIMEZONE, DEFAULT_UID_NAMESPACE,
};
use crate::date_layout::{DateLayout, DateValidation};
use crate::error::{ScheduleError, ScheduleResult};

/// Line terminator between content lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    #[default]
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Everything that shapes a generated calendar apart from the events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarOptions {
    /// PRODID value
    pub product_id: String,
    /// X-WR-CALNAME value
    pub calendar_name: String,
    /// IANA zone name for X-WR-TIMEZONE and the VTIMEZONE block
    pub timezone: String,
    /// Emit a VTIMEZONE block when one is known for `timezone`
    pub include_timezone: bool,
    pub date_layout: DateLayout,
    pub validation: DateValidation,
    /// Suffix after `@` in every UID
    pub uid_namespace: String,
    pub line_ending: LineEnding,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        CalendarOptions {
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            include_timezone: true,
            date_layout: DateLayout::default(),
            validation: DateValidation::default(),
            uid_namespace: DEFAULT_UID_NAMESPACE.to_string(),
            line_ending: LineEnding::default(),
        }
    }
}

impl CalendarOptions {
    /// Values written verbatim into content lines must stay on one line.
    pub fn validate(&self) -> ScheduleResult<()> {
        for (key, value) in [
            ("product_id", &self.product_id),
            ("calendar_name", &self.calendar_name),
            ("timezone", &self.timezone),
            ("uid_namespace", &self.uid_namespace),
        ] {
            if value.chars().any(char::is_control) {
                return Err(ScheduleError::Config(format!(
                    "{key} must not contain control characters"
                )));
            }
        }
        Ok(())
    }
}
