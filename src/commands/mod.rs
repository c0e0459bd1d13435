pub mod build;
pub mod config;
pub mod courses;

use schedule_core::config::ScheduleConfig;
use schedule_core::dataset::Dataset;
use schedule_core::selection::Checklist;

/// The checklist for a dataset, grouped as configured. Nothing is checked.
pub fn checklist_for(config: &ScheduleConfig, dataset: &Dataset) -> Checklist {
    Checklist::from_courses(&dataset.courses(), &config.groups)
}
