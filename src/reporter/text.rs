use crate::types::{Day, EntityNames, TimetableEntry};
use colored::Colorize;

/// Render a generated schedule as colored terminal text, grouped by day.
pub fn generate_text_report(algorithm: &str, entries: &[TimetableEntry], names: &EntityNames, unscheduled: usize) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push(format!("  TIMETABLE ({})", algorithm.to_uppercase()));
    lines.push("═".repeat(60));
    lines.push(String::new());

    for day in Day::ALL {
        let mut day_entries: Vec<&TimetableEntry> = entries.iter().filter(|e| e.day == day).collect();
        if day_entries.is_empty() {
            continue;
        }
        day_entries.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        lines.push(day.name().to_uppercase().bold().to_string());
        lines.push("─".repeat(40));
        for entry in day_entries {
            lines.push(format!(
                "  {}-{} {} | {} | {} | {}",
                entry.start_time,
                entry.end_time,
                names.course(&entry.course_id),
                names.student_group(&entry.student_group_id),
                names.teacher(&entry.teacher_id),
                names.classroom(&entry.classroom_id),
            ));
        }
        lines.push(String::new());
    }

    lines.push("─".repeat(40));
    lines.push(format!("Scheduled: {}   Unscheduled: {}", entries.len(), unscheduled));
    lines.push("═".repeat(60));

    lines.join("\n")
}

/// Print a quick colored summary to stdout after a generation run.
pub fn print_summary(algorithm: &str, total_slots: usize, unscheduled: usize) {
    println!();
    if unscheduled == 0 {
        println!("{}", "✓ Every session was placed".green().bold());
    } else {
        println!(
            "{}",
            format!("! {unscheduled} session(s) could not be placed").yellow().bold()
        );
    }
    println!();
    println!("  Algorithm:   {}", algorithm);
    println!("  Scheduled:   {}", total_slots);
    println!("  Unscheduled: {}", unscheduled);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassroomId, CourseId, EntryId, StudentGroupId, TeacherId};

    #[test]
    fn text_report_lists_scheduled_and_unscheduled_counts() {
        let names = EntityNames::new();
        let entry = TimetableEntry::new(
            EntryId("e1".into()),
            CourseId("c1".into()),
            StudentGroupId("g1".into()),
            TeacherId("t1".into()),
            ClassroomId("r1".into()),
            Day::Monday,
            "09:00",
            60,
            1,
            "fall-2026",
            "2026",
        )
        .unwrap();
        let report = generate_text_report("greedy", &[entry], &names, 1);
        assert!(report.contains("Scheduled: 1"));
        assert!(report.contains("Unscheduled: 1"));
    }
}
