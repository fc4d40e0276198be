//! The conflict kernel: the single conflict-detection path every generator and
//! manual placement route is built on. Pure with respect to every input except
//! the persisted-entry repository lookup; it performs no mutation.

mod counts;

pub use counts::check_counts;

use crate::repository::{EntryFilter, TimetableRepository};
use crate::types::{
    within_availability, ClassroomId, Classroom, CourseId, Day, EngineConfig, EntityNames, EntryId,
    StudentGroup, StudentGroupId, Teacher, TeacherId, TimetableEntry,
};

/// Structured classification of a single conflict, so call sites (notably the genetic
/// fitness function) match on an enum rather than substring-searching a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    DuplicateCourse,
    DuplicateGroup,
    DuplicateClassroom,
    DuplicateTeacher,
    CapExceeded,
    NotAvailable,
}

impl ConflictKind {
    /// Hard violations are uniqueness and capacity breaches: the four
    /// `Duplicate*` kinds plus `CapExceeded`, since a daily-cap overrun is a
    /// capacity violation on the candidate placement, not an availability
    /// issue. `NotAvailable` is the only soft violation.
    pub fn is_hard(&self) -> bool {
        !matches!(self, ConflictKind::NotAvailable)
    }
}

/// A single conflict: its structured kind plus the human-readable rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub message: String,
}

/// The placement under consideration.
#[derive(Debug, Clone)]
pub struct CandidatePlacement {
    pub course_id: CourseId,
    pub student_group_id: StudentGroupId,
    pub teacher_id: TeacherId,
    pub classroom_id: ClassroomId,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub exclude_entry_id: Option<EntryId>,
}

/// Resolved entity references for the candidate, used for the availability checks.
/// Any field may be `None` when the caller has no record for that entity; per the
/// Availability Filter, an absent entity is treated as unconstrained.
#[derive(Debug, Clone, Default)]
pub struct CandidateEntities<'a> {
    pub teacher: Option<&'a Teacher>,
    pub classroom: Option<&'a Classroom>,
    pub student_group: Option<&'a StudentGroup>,
}

fn as_entry(candidate: &CandidatePlacement) -> crate::error::Result<TimetableEntry> {
    TimetableEntry::new(
        candidate
            .exclude_entry_id
            .clone()
            .unwrap_or_else(|| EntryId("__candidate__".to_string())),
        candidate.course_id.clone(),
        candidate.student_group_id.clone(),
        candidate.teacher_id.clone(),
        candidate.classroom_id.clone(),
        candidate.day,
        candidate.start_time.clone(),
        {
            let start = crate::types::time::to_minutes(&candidate.start_time)?;
            let end = crate::types::time::to_minutes(&candidate.end_time)?;
            end.saturating_sub(start)
        },
        0,
        String::new(),
        String::new(),
    )
}

/// Check a candidate placement for conflicts. `repo` supplies persisted entries on
/// `candidate.day`; `pending` is restricted to the same day internally, so callers
/// may pass a pending set spanning multiple days without violating the daily-cap
/// scope rule (the count check only ever sees one day's slate).
pub fn check_conflicts(
    repo: &dyn TimetableRepository,
    config: &EngineConfig,
    names: &EntityNames,
    candidate: &CandidatePlacement,
    pending: &[TimetableEntry],
    entities: &CandidateEntities,
) -> crate::error::Result<Vec<Conflict>> {
    let filter = EntryFilter {
        course_id: Some(candidate.course_id.clone()),
        student_group_id: Some(candidate.student_group_id.clone()),
        classroom_id: Some(candidate.classroom_id.clone()),
        teacher_id: Some(candidate.teacher_id.clone()),
    };
    let persisted = repo.find_timetable(candidate.day, &filter, candidate.exclude_entry_id.as_ref());

    let pending_same_day: Vec<TimetableEntry> = pending
        .iter()
        .filter(|e| e.day == candidate.day)
        .cloned()
        .collect();

    let mut all: Vec<TimetableEntry> = persisted;
    all.extend(pending_same_day);

    let candidate_entry = as_entry(candidate)?;

    let mut all_with_candidate = all.clone();
    all_with_candidate.push(candidate_entry.clone());

    let mut conflicts = check_counts(&all_with_candidate, config, names);

    for entry in &all {
        if !crate::types::time::overlaps(
            &entry.start_time,
            &entry.end_time,
            &candidate.start_time,
            &candidate.end_time,
        )? {
            continue;
        }

        if entry.course_id == candidate.course_id {
            conflicts.push(Conflict {
                kind: ConflictKind::DuplicateCourse,
                message: format!(
                    "Course {} already scheduled at this time",
                    names.course(&entry.course_id)
                ),
            });
        }
        if entry.student_group_id == candidate.student_group_id {
            conflicts.push(Conflict {
                kind: ConflictKind::DuplicateGroup,
                message: format!(
                    "Student group {} already has a class at this time",
                    names.student_group(&entry.student_group_id)
                ),
            });
        }
        if entry.classroom_id == candidate.classroom_id {
            conflicts.push(Conflict {
                kind: ConflictKind::DuplicateClassroom,
                message: format!(
                    "Classroom {} is already booked at this time",
                    names.classroom(&entry.classroom_id)
                ),
            });
        }
        if entry.teacher_id == candidate.teacher_id {
            conflicts.push(Conflict {
                kind: ConflictKind::DuplicateTeacher,
                message: format!(
                    "Teacher {} already has a class at this time",
                    names.teacher(&entry.teacher_id)
                ),
            });
        }
    }

    if let Some(teacher) = entities.teacher {
        if !within_availability(Some(teacher), candidate.day, &candidate.start_time, &candidate.end_time)? {
            conflicts.push(Conflict {
                kind: ConflictKind::NotAvailable,
                message: format!("Teacher {} is not available at this time", teacher.name),
            });
        }
    }
    if let Some(classroom) = entities.classroom {
        if !within_availability(Some(classroom), candidate.day, &candidate.start_time, &candidate.end_time)? {
            conflicts.push(Conflict {
                kind: ConflictKind::NotAvailable,
                message: format!("Classroom {} is not available at this time", classroom.name),
            });
        }
    }
    if let Some(group) = entities.student_group {
        if !within_availability(Some(group), candidate.day, &candidate.start_time, &candidate.end_time)? {
            conflicts.push(Conflict {
                kind: ConflictKind::NotAvailable,
                message: format!("Student group {} is not available at this time", group.name),
            });
        }
    }

    Ok(conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::types::ClassroomId;

    fn placement(teacher: &str, group: &str, classroom: &str, course: &str) -> CandidatePlacement {
        CandidatePlacement {
            course_id: CourseId(course.into()),
            student_group_id: StudentGroupId(group.into()),
            teacher_id: TeacherId(teacher.into()),
            classroom_id: ClassroomId(classroom.into()),
            day: Day::Monday,
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            exclude_entry_id: None,
        }
    }

    fn pending_entry(teacher: &str, group: &str, classroom: &str, course: &str) -> TimetableEntry {
        TimetableEntry::new(
            EntryId("p1".into()),
            CourseId(course.into()),
            StudentGroupId(group.into()),
            TeacherId(teacher.into()),
            ClassroomId(classroom.into()),
            Day::Monday,
            "09:00",
            60,
            1,
            "fall-2026",
            "2026",
        )
        .unwrap()
    }

    #[test]
    fn scenario_1_teacher_pending_conflict() {
        let repo = InMemoryRepository::default();
        let config = EngineConfig::default();
        let names = EntityNames::new();
        let candidate = placement("t1", "sg2", "cl2", "c2");
        let pending = vec![pending_entry("t1", "sgX", "clX", "cX")];
        let conflicts =
            check_conflicts(&repo, &config, &names, &candidate, &pending, &CandidateEntities::default()).unwrap();
        assert!(conflicts.iter().any(|c| c.message.contains("Teacher")));
    }

    #[test]
    fn scenario_2_group_pending_conflict() {
        let repo = InMemoryRepository::default();
        let config = EngineConfig::default();
        let names = EntityNames::new();
        let candidate = placement("tX", "sg2", "clX", "cX");
        let pending = vec![pending_entry("tY", "sg2", "clY", "cY")];
        let conflicts =
            check_conflicts(&repo, &config, &names, &candidate, &pending, &CandidateEntities::default()).unwrap();
        assert!(conflicts.iter().any(|c| c.message.contains("Student group")));
    }

    #[test]
    fn scenario_3_classroom_pending_conflict() {
        let repo = InMemoryRepository::default();
        let config = EngineConfig::default();
        let names = EntityNames::new();
        let candidate = placement("tX", "sgX", "cl2", "cX");
        let pending = vec![pending_entry("tY", "sgY", "cl2", "cY")];
        let conflicts =
            check_conflicts(&repo, &config, &names, &candidate, &pending, &CandidateEntities::default()).unwrap();
        assert!(conflicts.iter().any(|c| c.message.contains("Classroom")));
    }

    #[test]
    fn no_conflicts_yields_empty_list() {
        let repo = InMemoryRepository::default();
        let config = EngineConfig::default();
        let names = EntityNames::new();
        let candidate = placement("t1", "g1", "r1", "c1");
        let conflicts =
            check_conflicts(&repo, &config, &names, &candidate, &[], &CandidateEntities::default()).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn touching_intervals_are_not_conflicts() {
        let repo = InMemoryRepository::default();
        let config = EngineConfig::default();
        let names = EntityNames::new();
        let mut candidate = placement("t1", "g1", "r1", "c1");
        candidate.start_time = "10:00".into();
        candidate.end_time = "11:00".into();
        let pending = vec![pending_entry("t1", "g1", "r1", "c1")]; // 09:00-10:00
        let conflicts =
            check_conflicts(&repo, &config, &names, &candidate, &pending, &CandidateEntities::default()).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn repeated_checks_are_idempotent() {
        let repo = InMemoryRepository::default();
        let config = EngineConfig::default();
        let names = EntityNames::new();
        let candidate = placement("t1", "g1", "r1", "c1");
        let pending = vec![pending_entry("t1", "g2", "r2", "c2")];
        let a = check_conflicts(&repo, &config, &names, &candidate, &pending, &CandidateEntities::default()).unwrap();
        let b = check_conflicts(&repo, &config, &names, &candidate, &pending, &CandidateEntities::default()).unwrap();
        assert_eq!(a, b);
    }
}
