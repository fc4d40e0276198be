//! Deterministic first-fit generator.

use crate::error::Result;
use crate::kernel::{check_conflicts, CandidateEntities, CandidatePlacement};
use crate::repository::TimetableRepository;
use crate::types::{time, Day, EngineConfig, EntitySnapshot, EntryId, TimetableEntry};

/// One session the greedy generator could not place, with the conflicts from
/// its last attempted slot for `--debug` diagnostics.
#[derive(Debug, Clone)]
pub struct UnscheduledSession {
    pub course_id: crate::types::CourseId,
    pub student_group_id: crate::types::StudentGroupId,
    pub last_conflicts: Vec<crate::kernel::Conflict>,
}

#[derive(Debug, Clone, Default)]
pub struct GreedyResult {
    pub placed: Vec<TimetableEntry>,
    pub unscheduled: Vec<UnscheduledSession>,
}

/// Run the greedy first-fit generator over `snapshot`'s active entities.
/// Course, group, day, slot, and classroom iteration is in input/fixed order,
/// so output is deterministic given identical inputs.
pub fn generate_greedy(
    repo: &dyn TimetableRepository,
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
    semester: &str,
    academic_year: &str,
) -> Result<GreedyResult> {
    let names = snapshot.names();
    let mut pending: Vec<TimetableEntry> = Vec::new();
    let mut unscheduled = Vec::new();
    let mut next_id: u64 = 0;

    for course in &snapshot.courses {
        let Some(teacher) = snapshot.teacher(&course.teacher_id) else {
            continue;
        };

        for group_id in &course.student_group_ids {
            let Some(group) = snapshot.student_group(group_id) else {
                continue;
            };

            for _session_index in 0..course.frequency {
                let mut placed = false;
                let mut last_conflicts = Vec::new();

                'search: for day in Day::ALL {
                    let slots =
                        time::generate_slots(&config.slot_start, &config.slot_end, config.slot_step, course.duration)?;
                    for start in &slots {
                        let end = time::end_of(start, course.duration)?;

                        for classroom in &snapshot.classrooms {
                            if !classroom.fits(group.size) {
                                continue;
                            }

                            let candidate = CandidatePlacement {
                                course_id: course.id.clone(),
                                student_group_id: group.id.clone(),
                                teacher_id: teacher.id.clone(),
                                classroom_id: classroom.id.clone(),
                                day,
                                start_time: start.clone(),
                                end_time: end.clone(),
                                exclude_entry_id: None,
                            };
                            let entities = CandidateEntities {
                                teacher: Some(teacher),
                                classroom: Some(classroom),
                                student_group: Some(group),
                            };

                            let conflicts =
                                check_conflicts(repo, config, &names, &candidate, &pending, &entities)?;

                            if conflicts.is_empty() {
                                let entry = TimetableEntry::new(
                                    EntryId(format!("greedy-{next_id}")),
                                    course.id.clone(),
                                    group.id.clone(),
                                    teacher.id.clone(),
                                    classroom.id.clone(),
                                    day,
                                    start.clone(),
                                    course.duration,
                                    1,
                                    semester,
                                    academic_year,
                                )?;
                                next_id += 1;
                                pending.push(entry);
                                placed = true;
                                break 'search;
                            } else {
                                last_conflicts = conflicts;
                            }
                        }
                    }
                }

                if !placed {
                    unscheduled.push(UnscheduledSession {
                        course_id: course.id.clone(),
                        student_group_id: group.id.clone(),
                        last_conflicts,
                    });
                }
            }
        }
    }

    Ok(GreedyResult {
        placed: pending,
        unscheduled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::types::{Classroom, ClassroomId, Course, CourseId, StudentGroup, StudentGroupId, Teacher, TeacherId};

    fn snapshot() -> EntitySnapshot {
        let teacher = Teacher {
            id: TeacherId("t1".into()),
            name: "Dr. A".into(),
            role: "faculty".into(),
            availability: Default::default(),
            blackout_periods: Default::default(),
            active: true,
            department: None,
        };
        let group = StudentGroup {
            id: StudentGroupId("g1".into()),
            name: "Group 1".into(),
            size: 20,
            availability: Default::default(),
            blackout_periods: Default::default(),
            active: true,
            semester: None,
            department: None,
        };
        let classroom = Classroom {
            id: ClassroomId("r1".into()),
            name: "Room 1".into(),
            capacity: 30,
            availability: Default::default(),
            blackout_periods: Default::default(),
            active: true,
        };
        let course = Course {
            id: CourseId("c1".into()),
            name: "Intro".into(),
            duration: 60,
            frequency: 2,
            teacher_id: TeacherId("t1".into()),
            student_group_ids: vec![StudentGroupId("g1".into())],
            active: true,
            semester: None,
            department: None,
        };
        EntitySnapshot {
            courses: vec![course],
            classrooms: vec![classroom],
            student_groups: vec![group],
            teachers: vec![teacher],
        }
    }

    #[test]
    fn places_every_session_when_capacity_allows() {
        let repo = InMemoryRepository::default();
        let config = EngineConfig::default();
        let snap = snapshot();
        let result = generate_greedy(&repo, &config, &snap, "fall-2026", "2026").unwrap();
        assert_eq!(result.placed.len(), 2);
        assert!(result.unscheduled.is_empty());
        assert_ne!(result.placed[0].start_time, result.placed[1].start_time);
    }

    #[test]
    fn no_classroom_meeting_capacity_yields_unscheduled() {
        let repo = InMemoryRepository::default();
        let config = EngineConfig::default();
        let mut snap = snapshot();
        snap.student_groups[0].size = 999;
        let result = generate_greedy(&repo, &config, &snap, "fall-2026", "2026").unwrap();
        assert!(result.placed.is_empty());
        assert_eq!(result.unscheduled.len(), 2);
    }
}
