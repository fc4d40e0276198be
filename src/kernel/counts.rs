use super::{Conflict, ConflictKind};
use crate::types::{ClassroomId, EngineConfig, EntityNames, StudentGroupId, TeacherId, TimetableEntry};
use std::collections::HashMap;

/// Given a same-day slate that already includes the candidate entry, emit a
/// `CapExceeded` conflict for any teacher, student group, or classroom whose
/// daily lecture count exceeds its configured cap.
pub fn check_counts(same_day_with_candidate: &[TimetableEntry], config: &EngineConfig, names: &EntityNames) -> Vec<Conflict> {
    let mut teacher_counts: HashMap<&TeacherId, u32> = HashMap::new();
    let mut group_counts: HashMap<&StudentGroupId, u32> = HashMap::new();
    let mut classroom_counts: HashMap<&ClassroomId, u32> = HashMap::new();

    for entry in same_day_with_candidate {
        *teacher_counts.entry(&entry.teacher_id).or_insert(0) += 1;
        *group_counts.entry(&entry.student_group_id).or_insert(0) += 1;
        *classroom_counts.entry(&entry.classroom_id).or_insert(0) += 1;
    }

    let mut conflicts = Vec::new();

    for (teacher_id, count) in &teacher_counts {
        if *count > config.max_teacher_daily_lectures {
            conflicts.push(Conflict {
                kind: ConflictKind::CapExceeded,
                message: format!(
                    "Teacher {} has reached the maximum daily lectures ({} > {})",
                    names.teacher(teacher_id),
                    count,
                    config.max_teacher_daily_lectures
                ),
            });
        }
    }

    for (group_id, count) in &group_counts {
        if *count > config.max_group_daily_lectures {
            conflicts.push(Conflict {
                kind: ConflictKind::CapExceeded,
                message: format!(
                    "Student group {} has reached the maximum daily lectures ({} > {})",
                    names.student_group(group_id),
                    count,
                    config.max_group_daily_lectures
                ),
            });
        }
    }

    for (classroom_id, count) in &classroom_counts {
        if *count > config.max_classroom_daily_lectures {
            conflicts.push(Conflict {
                kind: ConflictKind::CapExceeded,
                message: format!(
                    "Classroom {} has reached the maximum daily lectures ({} > {})",
                    names.classroom(classroom_id),
                    count,
                    config.max_classroom_daily_lectures
                ),
            });
        }
    }

    conflicts
}
