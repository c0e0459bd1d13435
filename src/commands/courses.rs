use anyhow::Result;
use owo_colors::OwoColorize;
use schedule_core::config::ScheduleConfig;
use schedule_core::dataset::Dataset;

use super::checklist_for;
use crate::render::Render;

pub fn run(config: &ScheduleConfig, dataset: &Dataset) -> Result<()> {
    let checklist = checklist_for(config, dataset);

    for (i, group) in checklist.groups().iter().enumerate() {
        println!("{}", group.render());

        for checkbox in &group.checkboxes {
            let count = dataset.session_count(&checkbox.course);
            let sessions = format!("({} {})", count, pluralize("session", count));
            println!("   {} {}", checkbox.course, sessions.dimmed());
        }

        // Add spacing between groups (but not after the last one)
        if i < checklist.groups().len() - 1 {
            println!();
        }
    }

    Ok(())
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
