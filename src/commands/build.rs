use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dialoguer::MultiSelect;
use owo_colors::OwoColorize;
use schedule_core::config::ScheduleConfig;
use schedule_core::dataset::Dataset;
use schedule_core::selection::Checklist;
use schedule_core::stamp::SystemClock;
use schedule_core::{BuildOutcome, build_schedule_document};
use tracing::debug;

use super::checklist_for;
use crate::render::Render;

pub struct BuildArgs {
    pub courses: Vec<String>,
    pub groups: Vec<String>,
    pub all: bool,
    pub interactive: bool,
    pub output: Option<PathBuf>,
    pub stdout: bool,
}

pub async fn run(config: &ScheduleConfig, dataset: &Dataset, args: BuildArgs) -> Result<()> {
    let mut checklist = checklist_for(config, dataset);
    apply_flags(&mut checklist, &args)?;

    if args.interactive {
        prompt_checklist(&mut checklist)?;
    }

    let selection = checklist.selection();
    let outcome = build_schedule_document(
        dataset.events(),
        &selection,
        &config.calendar_options(),
        &SystemClock,
    )?;

    let target = if args.stdout {
        Target::Stdout
    } else {
        Target::File(args.output.unwrap_or_else(|| config.output_path()))
    };

    let Some(events) = deliver(outcome, &target, &mut std::io::stdout()).await? else {
        // stdout carries only the calendar
        eprintln!("{}", "Nothing selected".dimmed());
        return Ok(());
    };

    let Target::File(path) = target else {
        return Ok(());
    };

    for group in checklist.groups() {
        let picked: Vec<String> = group
            .checkboxes
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.render())
            .collect();
        if !picked.is_empty() {
            println!("{}", group.render());
            println!("   {}", picked.join("  "));
        }
    }

    println!(
        "\nWrote {} {} to {}",
        events,
        if events == 1 { "event" } else { "events" },
        path.display().green()
    );

    Ok(())
}

/// Where a built calendar goes.
enum Target {
    Stdout,
    File(PathBuf),
}

/// Emit the document, if any. Returns the number of events written, or
/// `None` when nothing was selected, in which case nothing is emitted.
async fn deliver(
    outcome: BuildOutcome,
    target: &Target,
    out: &mut impl Write,
) -> Result<Option<usize>> {
    let BuildOutcome::Document { ics, events } = outcome else {
        return Ok(None);
    };

    match target {
        Target::Stdout => writeln!(out, "{ics}")?,
        Target::File(path) => write_document(path, &ics).await?,
    }

    Ok(Some(events))
}

/// Tick checkboxes from `--all`, `--group` and `--course`.
fn apply_flags(checklist: &mut Checklist, args: &BuildArgs) -> Result<()> {
    if args.all {
        let names: Vec<String> = checklist.groups().iter().map(|g| g.name.clone()).collect();
        for name in names {
            checklist.select_all(&name)?;
        }
    }

    for group in &args.groups {
        if let Err(e) = checklist.select_all(group) {
            let available: Vec<&str> = checklist.groups().iter().map(|g| g.name.as_str()).collect();
            anyhow::bail!("{e}. Available: {}", available.join(", "));
        }
    }

    for course in &args.courses {
        if !checklist.set(course, true) {
            let available: Vec<&str> = checklist.checkboxes().map(|c| c.course.as_str()).collect();
            anyhow::bail!(
                "Course '{}' not found. Available: {}",
                course,
                available.join(", ")
            );
        }
    }

    Ok(())
}

/// Let the user tick courses, starting from the current checkbox states.
fn prompt_checklist(checklist: &mut Checklist) -> Result<()> {
    let mut items = Vec::new();
    let mut defaults = Vec::new();
    for group in checklist.groups() {
        for checkbox in &group.checkboxes {
            items.push((group.name.clone(), checkbox.course.clone()));
            defaults.push(checkbox.checked);
        }
    }

    let labels: Vec<String> = items
        .iter()
        .map(|(group, course)| format!("{group} / {course}"))
        .collect();

    let selections = MultiSelect::new()
        .with_prompt("Select courses to export (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    let names: Vec<String> = checklist.groups().iter().map(|g| g.name.clone()).collect();
    for name in names {
        checklist.unselect_all(&name)?;
    }
    for idx in selections {
        checklist.set(&items[idx].1, true);
    }

    Ok(())
}

async fn write_document(path: &Path, ics: &str) -> Result<()> {
    debug!(path = %path.display(), "writing calendar");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }

    tokio::fs::write(path, ics)
        .await
        .with_context(|| format!("Could not write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedule_core::selection::GroupDefinition;

    fn checklist() -> Checklist {
        let courses: Vec<String> = ["CS101", "CS102", "MA201"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Checklist::from_courses(
            &courses,
            &[GroupDefinition {
                name: "CS".to_string(),
                courses: vec!["CS101".to_string(), "CS102".to_string()],
            }],
        )
    }

    fn args() -> BuildArgs {
        BuildArgs {
            courses: vec![],
            groups: vec![],
            all: false,
            interactive: false,
            output: None,
            stdout: false,
        }
    }

    fn selected(checklist: &Checklist) -> Vec<String> {
        checklist.selection().iter().map(String::from).collect()
    }

    #[test]
    fn test_no_flags_selects_nothing() {
        let mut checklist = checklist();
        apply_flags(&mut checklist, &args()).unwrap();
        assert!(checklist.selection().is_empty());
    }

    #[test]
    fn test_group_and_course_flags() {
        let mut checklist = checklist();
        let args = BuildArgs {
            groups: vec!["CS".to_string()],
            courses: vec!["MA201".to_string()],
            ..args()
        };
        apply_flags(&mut checklist, &args).unwrap();
        assert_eq!(selected(&checklist), vec!["CS101", "CS102", "MA201"]);
    }

    #[test]
    fn test_all_flag() {
        let mut checklist = checklist();
        let args = BuildArgs { all: true, ..args() };
        apply_flags(&mut checklist, &args).unwrap();
        assert_eq!(selected(&checklist).len(), 3);
    }

    #[test]
    fn test_unknown_course_lists_available() {
        let mut checklist = checklist();
        let args = BuildArgs {
            courses: vec!["XX999".to_string()],
            ..args()
        };
        let err = apply_flags(&mut checklist, &args).unwrap_err().to_string();
        assert!(err.contains("XX999"), "{err}");
        assert!(err.contains("CS101"), "{err}");
    }

    #[test]
    fn test_unknown_group() {
        let mut checklist = checklist();
        let args = BuildArgs {
            groups: vec!["Year 9".to_string()],
            ..args()
        };
        let err = apply_flags(&mut checklist, &args).unwrap_err().to_string();
        assert!(err.contains("Year 9"), "{err}");
    }

    #[tokio::test]
    async fn test_nothing_selected_emits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.ics");
        let mut out = Vec::new();

        let to_stdout = deliver(BuildOutcome::NothingSelected, &Target::Stdout, &mut out)
            .await
            .unwrap();
        assert_eq!(to_stdout, None);
        assert!(out.is_empty(), "stdout got {:?}", String::from_utf8_lossy(&out));

        let to_file = deliver(
            BuildOutcome::NothingSelected,
            &Target::File(path.clone()),
            &mut out,
        )
        .await
        .unwrap();
        assert_eq!(to_file, None);
        assert!(!path.exists());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_document_goes_to_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.ics");
        let document = || BuildOutcome::Document {
            ics: "BEGIN:VCALENDAR\r\nEND:VCALENDAR".to_string(),
            events: 0,
        };

        let mut out = Vec::new();
        let written = deliver(document(), &Target::Stdout, &mut out).await.unwrap();
        assert_eq!(written, Some(0));
        assert_eq!(String::from_utf8(out).unwrap(), "BEGIN:VCALENDAR\r\nEND:VCALENDAR\n");

        let mut out = Vec::new();
        deliver(document(), &Target::File(path.clone()), &mut out)
            .await
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "BEGIN:VCALENDAR\r\nEND:VCALENDAR"
        );
    }

    #[tokio::test]
    async fn test_write_document_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("calendar.ics");

        write_document(&path, "BEGIN:VCALENDAR\r\nEND:VCALENDAR").await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "BEGIN:VCALENDAR\r\nEND:VCALENDAR");
    }
}
