//! Course selection: the checklist a user ticks and the set it produces.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::UNGROUPED_NAME;
use crate::error::{ScheduleError, ScheduleResult};

/// Course identifiers chosen for export, in the order they were encountered.
///
/// Duplicates are kept but only membership matters when filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    courses: Vec<String>,
}

impl Selection {
    pub fn new<I, S>(courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection {
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, course: &str) -> bool {
        self.courses.iter().any(|c| c == course)
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Selection::new(iter)
    }
}

/// Reduce `(course, checked)` pairs to the selected courses.
pub fn select_checked<'a, I>(pairs: I) -> Selection
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    pairs
        .into_iter()
        .filter(|(_, checked)| *checked)
        .map(|(course, _)| course)
        .collect()
}

/// A named list of course identifiers, as read from the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub name: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub course: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseGroup {
    pub name: String,
    pub checkboxes: Vec<Checkbox>,
}

/// All checkboxes, split into named groups. Everything starts unchecked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    groups: Vec<CourseGroup>,
}

impl Checklist {
    /// Build a checklist for the given courses.
    ///
    /// Courses named in a group definition are placed in that group (a course
    /// may appear in several). Group entries for courses missing from
    /// `courses` are dropped. The remaining courses end up in a trailing
    /// "Other" group, which is omitted when empty.
    pub fn from_courses(courses: &[String], groups: &[GroupDefinition]) -> Self {
        let mut result = Vec::with_capacity(groups.len() + 1);

        for group in groups {
            let checkboxes: Vec<Checkbox> = group
                .courses
                .iter()
                .filter(|c| courses.contains(*c))
                .map(|c| Checkbox {
                    course: c.clone(),
                    checked: false,
                })
                .collect();

            if checkboxes.len() < group.courses.len() {
                debug!(group = %group.name, "group lists courses missing from the dataset");
            }

            result.push(CourseGroup {
                name: group.name.clone(),
                checkboxes,
            });
        }

        let ungrouped: Vec<Checkbox> = courses
            .iter()
            .filter(|c| !groups.iter().any(|g| g.courses.contains(*c)))
            .map(|c| Checkbox {
                course: c.clone(),
                checked: false,
            })
            .collect();

        if !ungrouped.is_empty() {
            result.push(CourseGroup {
                name: UNGROUPED_NAME.to_string(),
                checkboxes: ungrouped,
            });
        }

        Checklist { groups: result }
    }

    pub fn groups(&self) -> &[CourseGroup] {
        &self.groups
    }

    fn group_mut(&mut self, name: &str) -> ScheduleResult<&mut CourseGroup> {
        self.groups
            .iter_mut()
            .find(|g| g.name == name)
            .ok_or_else(|| ScheduleError::UnknownGroup(name.to_string()))
    }

    fn set_group(&mut self, name: &str, checked: bool) -> ScheduleResult<()> {
        for checkbox in &mut self.group_mut(name)?.checkboxes {
            checkbox.checked = checked;
        }
        Ok(())
    }

    /// Check every checkbox in the named group.
    pub fn select_all(&mut self, group: &str) -> ScheduleResult<()> {
        self.set_group(group, true)
    }

    /// Uncheck every checkbox in the named group.
    pub fn unselect_all(&mut self, group: &str) -> ScheduleResult<()> {
        self.set_group(group, false)
    }

    /// Set every checkbox for `course`. Returns false if there is none.
    pub fn set(&mut self, course: &str, checked: bool) -> bool {
        let mut found = false;
        for checkbox in self.checkboxes_mut().filter(|c| c.course == course) {
            checkbox.checked = checked;
            found = true;
        }
        found
    }

    pub fn checkboxes(&self) -> impl Iterator<Item = &Checkbox> {
        self.groups.iter().flat_map(|g| g.checkboxes.iter())
    }

    fn checkboxes_mut(&mut self) -> impl Iterator<Item = &mut Checkbox> {
        self.groups.iter_mut().flat_map(|g| g.checkboxes.iter_mut())
    }

    /// The selection described by the current checkbox states.
    pub fn selection(&self) -> Selection {
        select_checked(self.checkboxes().map(|c| (c.course.as_str(), c.checked)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courses(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn group(name: &str, ids: &[&str]) -> GroupDefinition {
        GroupDefinition {
            name: name.to_string(),
            courses: courses(ids),
        }
    }

    #[test]
    fn test_select_checked_keeps_order_and_duplicates() {
        let selection = select_checked([
            ("MA201", true),
            ("CS101", false),
            ("PH110", true),
            ("MA201", true),
        ]);
        let ids: Vec<&str> = selection.iter().collect();
        assert_eq!(ids, vec!["MA201", "PH110", "MA201"]);
        assert!(selection.contains("PH110"));
        assert!(!selection.contains("CS101"));
    }

    #[test]
    fn test_select_checked_nothing() {
        let selection = select_checked([("CS101", false)]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_checklist_groups_and_other() {
        let checklist = Checklist::from_courses(
            &courses(&["CS101", "MA201", "PH110"]),
            &[group("Year 1", &["CS101", "XX999"])],
        );

        let names: Vec<&str> = checklist.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Year 1", "Other"]);
        assert_eq!(checklist.groups()[0].checkboxes.len(), 1);
        assert_eq!(checklist.groups()[1].checkboxes.len(), 2);
        assert!(checklist.selection().is_empty());
    }

    #[test]
    fn test_select_all_and_unselect_all() {
        let mut checklist = Checklist::from_courses(
            &courses(&["CS101", "CS102", "MA201"]),
            &[group("CS", &["CS101", "CS102"])],
        );

        checklist.select_all("CS").unwrap();
        let ids: Vec<String> = checklist.selection().iter().map(String::from).collect();
        assert_eq!(ids, vec!["CS101", "CS102"]);

        checklist.set("MA201", true);
        checklist.unselect_all("CS").unwrap();
        let ids: Vec<String> = checklist.selection().iter().map(String::from).collect();
        assert_eq!(ids, vec!["MA201"]);
    }

    #[test]
    fn test_unknown_group() {
        let mut checklist = Checklist::from_courses(&courses(&["CS101"]), &[]);
        assert!(matches!(
            checklist.select_all("Year 9"),
            Err(ScheduleError::UnknownGroup(_))
        ));
    }

    #[test]
    fn test_set_course_in_multiple_groups() {
        let mut checklist = Checklist::from_courses(
            &courses(&["CS101"]),
            &[group("A", &["CS101"]), group("B", &["CS101"])],
        );

        assert!(checklist.set("CS101", true));
        assert!(!checklist.set("NOPE", true));
        assert_eq!(checklist.selection().len(), 2);
    }
}
