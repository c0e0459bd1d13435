//! The static list of course sessions to pick from.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ScheduleError, ScheduleResult};
use crate::event::SessionEvent;
use crate::selection::Selection;

/// Course sessions loaded from a JSON array of records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    events: Vec<SessionEvent>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> ScheduleResult<Self> {
        let events: Vec<SessionEvent> = serde_json::from_str(json)?;
        Ok(Dataset { events })
    }

    /// Read a dataset file. A leading `~` is expanded to the home directory.
    pub fn load(path: &Path) -> ScheduleResult<Self> {
        let path = expand_path(path);

        let content = std::fs::read_to_string(&path).map_err(|e| {
            ScheduleError::Dataset(format!("Could not read {}: {e}", path.display()))
        })?;

        let dataset = Self::from_json_str(&content)?;
        debug!(
            path = %path.display(),
            events = dataset.events.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distinct course identifiers, in order of first appearance.
    pub fn courses(&self) -> Vec<String> {
        let mut courses: Vec<String> = Vec::new();
        for event in &self.events {
            if !courses.contains(&event.course) {
                courses.push(event.course.clone());
            }
        }
        courses
    }

    /// Number of sessions belonging to `course`.
    pub fn session_count(&self, course: &str) -> usize {
        self.events.iter().filter(|e| e.course == course).count()
    }

    /// Sessions whose course is in `selection`, in dataset order.
    pub fn filter(&self, selection: &Selection) -> Vec<&SessionEvent> {
        filter_events(&self.events, selection)
    }
}

/// Keep the events whose course is a member of `selection`.
pub fn filter_events<'a>(events: &'a [SessionEvent], selection: &Selection) -> Vec<&'a SessionEvent> {
    events
        .iter()
        .filter(|e| selection.contains(&e.course))
        .collect()
}

pub(crate) fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"course": "CS101", "label": "Intro", "location": "Room A", "date": "25/12/2024", "start": "09:00", "end": "10:30"},
        {"course": "MA201", "label": "Calculus", "location": "Room B", "date": "26/12/2024", "start": "11:00", "end": "12:00"},
        {"course": "CS101", "label": "Intro lab", "location": "Lab 1", "date": "27/12/2024", "start": "13:00", "end": "15:00"}
    ]"#;

    #[test]
    fn test_from_json_str() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(dataset.events().len(), 3);
        assert_eq!(dataset.events()[1].label, "Calculus");
    }

    #[test]
    fn test_courses_in_first_appearance_order() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(dataset.courses(), vec!["CS101", "MA201"]);
        assert_eq!(dataset.session_count("CS101"), 2);
        assert_eq!(dataset.session_count("PH110"), 0);
    }

    #[test]
    fn test_filter_by_selection() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();

        let selected = dataset.filter(&Selection::new(["CS101"]));
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|e| e.course == "CS101"));

        let duplicated = dataset.filter(&Selection::new(["MA201", "MA201"]));
        assert_eq!(duplicated.len(), 1);

        assert!(dataset.filter(&Selection::default()).is_empty());
    }

    #[test]
    fn test_rejects_missing_fields() {
        let result = Dataset::from_json_str(r#"[{"course": "CS101"}]"#);
        assert!(matches!(result, Err(ScheduleError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.courses().len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Dataset::load(Path::new("/nonexistent/schedule/data.json"));
        assert!(matches!(result, Err(ScheduleError::Dataset(_))));
    }
}
