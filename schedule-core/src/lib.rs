//! Core types for schedule-builder.
//!
//! This crate turns a flat list of course sessions into an .ics calendar:
//! - `dataset` and `event` for the source records
//! - `selection` for the course checklist and the selected course set
//! - `ics` for rendering the calendar document
//! - `schedule` for the single build operation tying them together

pub mod config;
pub mod constants;
pub mod dataset;
pub mod date_layout;
pub mod error;
pub mod event;
pub mod ics;
pub mod schedule;
pub mod selection;
pub mod stamp;
pub mod timezone;

pub use error::{ScheduleError, ScheduleResult};
pub use event::SessionEvent;
pub use schedule::{BuildOutcome, build_schedule_document};
pub use selection::Selection;
