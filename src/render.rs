//! Terminal rendering for checklist types using owo_colors.

use owo_colors::OwoColorize;
use schedule_core::selection::{Checkbox, CourseGroup};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for CourseGroup {
    fn render(&self) -> String {
        let checked = self.checkboxes.iter().filter(|c| c.checked).count();
        let tally = format!("{}/{}", checked, self.checkboxes.len());
        format!("📚 {} {}", self.name.bold(), tally.dimmed())
    }
}

impl Render for Checkbox {
    fn render(&self) -> String {
        if self.checked {
            format!("{} {}", "[x]".green(), self.course.green())
        } else {
            format!("{} {}", "[ ]".dimmed(), self.course)
        }
    }
}
