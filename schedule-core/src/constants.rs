/// Product identifier written to the PRODID header line
pub const DEFAULT_PRODUCT_ID: &str = "-//schedule-builder//schedule-builder 0.1//EN";

/// Calendar display name (X-WR-CALNAME)
pub const DEFAULT_CALENDAR_NAME: &str = "schedule-builder";

/// Zone declared in X-WR-TIMEZONE and described by the VTIMEZONE block
pub const DEFAULT_TIMEZONE: &str = "Europe/Amsterdam";

/// Suffix appended to every event UID
pub const DEFAULT_UID_NAMESPACE: &str = "schedule-builder";

/// File name used when saving the calendar
pub const DEFAULT_OUTPUT_FILE: &str = "calendar.ics";

/// Media type of the generated document
pub const ICS_MEDIA_TYPE: &str = "text/calendar;charset=UTF-8";

/// Name of the checklist group holding courses not listed in any configured group
pub const UNGROUPED_NAME: &str = "Other";
