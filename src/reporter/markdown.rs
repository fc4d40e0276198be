use crate::types::{Day, EntityNames, TimetableEntry};

/// Render a generated schedule as a markdown document: one table per day,
/// ordered by start time, plus an unscheduled-count footer.
pub fn generate_markdown_report(algorithm: &str, entries: &[TimetableEntry], names: &EntityNames, unscheduled: usize) -> String {
    let mut lines = vec![
        format!("# Timetable Report ({algorithm})"),
        String::new(),
        format!("Scheduled: {}  Unscheduled: {}", entries.len(), unscheduled),
        String::new(),
    ];

    for day in Day::ALL {
        let mut day_entries: Vec<&TimetableEntry> = entries.iter().filter(|e| e.day == day).collect();
        if day_entries.is_empty() {
            continue;
        }
        day_entries.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        lines.push(format!("## {}\n", capitalize(day.name())));
        lines.push("| Start | End | Course | Group | Teacher | Classroom |".to_string());
        lines.push("|-------|-----|--------|-------|---------|-----------|".to_string());
        for entry in day_entries {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
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

    lines.join("\n")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassroomId, CourseId, EntryId, StudentGroupId, TeacherId};

    #[test]
    fn groups_entries_under_their_day_heading() {
        let names = EntityNames::new();
        let entry = TimetableEntry::new(
            EntryId("e1".into()),
            CourseId("c1".into()),
            StudentGroupId("g1".into()),
            TeacherId("t1".into()),
            ClassroomId("r1".into()),
            Day::Tuesday,
            "09:00",
            60,
            1,
            "fall-2026",
            "2026",
        )
        .unwrap();
        let report = generate_markdown_report("greedy", &[entry], &names, 2);
        assert!(report.contains("## Tuesday"));
        assert!(report.contains("Unscheduled: 2"));
        assert!(!report.contains("## Monday"));
    }
}
