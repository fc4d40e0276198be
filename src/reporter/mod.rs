//! Human- and machine-readable renderings of a generated schedule and of the
//! comparator's results. The core generators return plain data; everything
//! here is presentation built on top of that data.

mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::error::Result;
use crate::generator::comparator::AlgorithmOutcome;
use crate::types::{Day, EntityNames, StudentGroupId, TeacherId, TimetableEntry};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Output format for a schedule report written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Write one file per requested format to `output_dir`, named
/// `timetable.{json,md,txt}`.
pub fn write_schedule_reports(
    algorithm: &str,
    entries: &[TimetableEntry],
    names: &EntityNames,
    unscheduled: usize,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(algorithm, entries, unscheduled)?;
                fs::write(output_dir.join("timetable.json"), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(algorithm, entries, names, unscheduled);
                fs::write(output_dir.join("timetable.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(algorithm, entries, names, unscheduled);
                fs::write(output_dir.join("timetable.txt"), txt)?;
            }
        }
    }

    Ok(())
}

/// A single student group's weekly schedule, one line per session ordered by
/// day then start time.
pub fn generate_group_schedule(entries: &[TimetableEntry], names: &EntityNames, group_id: &StudentGroupId) -> Option<String> {
    let mut mine: Vec<&TimetableEntry> = entries.iter().filter(|e| &e.student_group_id == group_id).collect();
    if mine.is_empty() {
        return None;
    }
    mine.sort_by_key(|e| (Day::ALL.iter().position(|d| *d == e.day).unwrap_or(usize::MAX), e.start_time.clone()));

    let mut lines = vec![format!("# Schedule for {}\n", names.student_group(group_id))];
    for entry in mine {
        lines.push(format!(
            "- **{}** {}-{}: {} with {} in {}",
            capitalize(entry.day.name()),
            entry.start_time,
            entry.end_time,
            names.course(&entry.course_id),
            names.teacher(&entry.teacher_id),
            names.classroom(&entry.classroom_id),
        ));
    }
    Some(lines.join("\n"))
}

/// A single teacher's weekly teaching load, one line per session ordered by
/// day then start time.
pub fn generate_teacher_schedule(entries: &[TimetableEntry], names: &EntityNames, teacher_id: &TeacherId) -> Option<String> {
    let mut mine: Vec<&TimetableEntry> = entries.iter().filter(|e| &e.teacher_id == teacher_id).collect();
    if mine.is_empty() {
        return None;
    }
    mine.sort_by_key(|e| (Day::ALL.iter().position(|d| *d == e.day).unwrap_or(usize::MAX), e.start_time.clone()));

    let mut lines = vec![format!("# Schedule for {}\n", names.teacher(teacher_id))];
    for entry in mine {
        lines.push(format!(
            "- **{}** {}-{}: {} ({}) in {}",
            capitalize(entry.day.name()),
            entry.start_time,
            entry.end_time,
            names.course(&entry.course_id),
            names.student_group(&entry.student_group_id),
            names.classroom(&entry.classroom_id),
        ));
    }
    Some(lines.join("\n"))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Render the comparator's per-algorithm outcomes as a colored terminal
/// table; a failed algorithm is shown inline rather than aborting the others.
pub fn render_comparison(outcomes: &[AlgorithmOutcome]) -> String {
    let mut lines = vec![
        "─".repeat(72),
        format!(
            "{:<14} {:>10} {:>12} {:>10}  {}",
            "ALGORITHM", "SCHEDULED", "UNSCHEDULED", "SUCCESS%", "DETAIL"
        ),
        "─".repeat(72),
    ];

    for outcome in outcomes {
        match outcome {
            AlgorithmOutcome::Ran(report) => {
                lines.push(format!(
                    "{:<14} {:>10} {:>12} {:>9.1}%  {}",
                    report.algorithm, report.total_slots, report.unscheduled, report.success_rate, report.metadata
                ));
            }
            AlgorithmOutcome::Failed { algorithm, error } => {
                lines.push(format!("{:<14} {}", algorithm, format!("ERROR: {error}").red()));
            }
        }
    }
    lines.push("─".repeat(72));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassroomId, CourseId, Day, EntryId, StudentGroupId, TeacherId};

    fn entry(day: Day, start: &str, group: &str, teacher: &str) -> TimetableEntry {
        TimetableEntry::new(
            EntryId(format!("{day}-{start}")),
            CourseId("c1".into()),
            StudentGroupId(group.into()),
            TeacherId(teacher.into()),
            ClassroomId("r1".into()),
            day,
            start,
            60,
            1,
            "fall-2026",
            "2026",
        )
        .unwrap()
    }

    #[test]
    fn group_schedule_only_includes_that_group() {
        let names = EntityNames::new();
        let entries = vec![entry(Day::Monday, "09:00", "g1", "t1"), entry(Day::Tuesday, "10:00", "g2", "t1")];
        let report = generate_group_schedule(&entries, &names, &StudentGroupId("g1".into())).unwrap();
        assert!(report.contains("Monday"));
        assert!(!report.contains("Tuesday"));
    }

    #[test]
    fn missing_group_yields_none() {
        let names = EntityNames::new();
        let entries = vec![entry(Day::Monday, "09:00", "g1", "t1")];
        assert!(generate_group_schedule(&entries, &names, &StudentGroupId("ghost".into())).is_none());
    }

    #[test]
    fn comparison_table_reports_one_row_per_outcome() {
        use crate::generator::comparator::AlgorithmReport;
        let outcomes = vec![
            AlgorithmOutcome::Ran(AlgorithmReport {
                algorithm: "dsatur".into(),
                total_slots: 2,
                unscheduled: 0,
                success_rate: 100.0,
                metadata: "colors_used=2".into(),
                fitness: None,
                hard_violations: None,
                soft_violations: None,
            }),
            AlgorithmOutcome::Failed {
                algorithm: "genetic".into(),
                error: "boom".into(),
            },
        ];
        let rendered = render_comparison(&outcomes);
        assert!(rendered.contains("dsatur"));
        assert!(rendered.contains("ERROR: boom"));
    }
}
