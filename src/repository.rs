//! The repository interface consumed by the core. Persistence, HTTP routing, and
//! authorization are explicitly out of scope for this crate; a real deployment
//! implements `TimetableRepository` against its own database. This module also
//! ships `InMemoryRepository`, a reference implementation backing the CLI, the
//! bundled demo data set, and the test suite.

use crate::types::{Classroom, ClassroomId, Course, CourseId, Day, EntryId, StudentGroup, StudentGroupId, Teacher, TeacherId, TimetableEntry};

/// At-least-one-of filter for `find_timetable`: an entry matches if it shares any of
/// the identifiers that are `Some`.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub course_id: Option<CourseId>,
    pub student_group_id: Option<StudentGroupId>,
    pub classroom_id: Option<ClassroomId>,
    pub teacher_id: Option<TeacherId>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &TimetableEntry) -> bool {
        let course = self.course_id.as_ref().is_some_and(|id| id == &entry.course_id);
        let group = self
            .student_group_id
            .as_ref()
            .is_some_and(|id| id == &entry.student_group_id);
        let classroom = self
            .classroom_id
            .as_ref()
            .is_some_and(|id| id == &entry.classroom_id);
        let teacher = self.teacher_id.as_ref().is_some_and(|id| id == &entry.teacher_id);
        course || group || classroom || teacher
    }
}

/// Entity and timetable access consumed by the conflict kernel and the generators.
pub trait TimetableRepository {
    /// Persisted entries for `day` matching at least one identifier in `filter`,
    /// excluding `exclude_id` when given.
    fn find_timetable(&self, day: Day, filter: &EntryFilter, exclude_id: Option<&EntryId>) -> Vec<TimetableEntry>;

    fn find_courses(&self, semester: &str, department: Option<&str>) -> Vec<Course>;
    fn find_classrooms(&self) -> Vec<Classroom>;
    fn find_student_groups(&self, semester: &str, department: Option<&str>) -> Vec<StudentGroup>;
    fn find_faculty(&self, department: Option<&str>) -> Vec<Teacher>;

    /// Caller-driven bulk insert, post-generation. Performs no conflict re-check;
    /// intended only for schedules the core just produced.
    fn insert_many(&mut self, entries: Vec<TimetableEntry>);
}

/// Reference `TimetableRepository` backed by in-process vectors. Used by the CLI, the
/// bundled demo data, and the test suite; not a statement that persistence is in scope.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    pub courses: Vec<Course>,
    pub classrooms: Vec<Classroom>,
    pub student_groups: Vec<StudentGroup>,
    pub teachers: Vec<Teacher>,
    pub entries: Vec<TimetableEntry>,
}

impl InMemoryRepository {
    pub fn new(
        courses: Vec<Course>,
        classrooms: Vec<Classroom>,
        student_groups: Vec<StudentGroup>,
        teachers: Vec<Teacher>,
    ) -> Self {
        Self {
            courses,
            classrooms,
            student_groups,
            teachers,
            entries: Vec::new(),
        }
    }

    pub fn snapshot(&self, semester: &str, department: Option<&str>) -> crate::types::EntitySnapshot {
        crate::types::EntitySnapshot {
            courses: self.find_courses(semester, department),
            classrooms: self.find_classrooms(),
            student_groups: self.find_student_groups(semester, department),
            teachers: self.find_faculty(department),
        }
    }
}

fn matches_scope<T>(
    item_semester: &Option<String>,
    item_department: &Option<String>,
    semester: &str,
    department: Option<&str>,
) -> bool
where
    T: ?Sized,
{
    let semester_ok = item_semester.as_deref().map(|s| s == semester).unwrap_or(true);
    let department_ok = match department {
        None => true,
        Some(d) => item_department.as_deref().map(|v| v == d).unwrap_or(true),
    };
    semester_ok && department_ok
}

impl TimetableRepository for InMemoryRepository {
    fn find_timetable(&self, day: Day, filter: &EntryFilter, exclude_id: Option<&EntryId>) -> Vec<TimetableEntry> {
        self.entries
            .iter()
            .filter(|e| e.day == day)
            .filter(|e| exclude_id.map(|id| id != &e.id).unwrap_or(true))
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    fn find_courses(&self, semester: &str, department: Option<&str>) -> Vec<Course> {
        self.courses
            .iter()
            .filter(|c| c.active)
            .filter(|c| matches_scope::<Course>(&c.semester, &c.department, semester, department))
            .cloned()
            .collect()
    }

    fn find_classrooms(&self) -> Vec<Classroom> {
        self.classrooms.iter().filter(|r| r.active).cloned().collect()
    }

    fn find_student_groups(&self, semester: &str, department: Option<&str>) -> Vec<StudentGroup> {
        self.student_groups
            .iter()
            .filter(|g| g.active)
            .filter(|g| matches_scope::<StudentGroup>(&g.semester, &g.department, semester, department))
            .cloned()
            .collect()
    }

    fn find_faculty(&self, department: Option<&str>) -> Vec<Teacher> {
        self.teachers
            .iter()
            .filter(|t| t.active)
            .filter(|t| match department {
                None => true,
                Some(d) => t.department.as_deref().map(|v| v == d).unwrap_or(true),
            })
            .cloned()
            .collect()
    }

    fn insert_many(&mut self, entries: Vec<TimetableEntry>) {
        self.entries.extend(entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassroomId, CourseId, StudentGroupId, TeacherId};

    fn entry(course: &str, group: &str, teacher: &str, classroom: &str, day: Day) -> TimetableEntry {
        TimetableEntry::new(
            EntryId("e1".into()),
            CourseId(course.into()),
            StudentGroupId(group.into()),
            TeacherId(teacher.into()),
            ClassroomId(classroom.into()),
            day,
            "09:00",
            60,
            1,
            "fall-2026",
            "2026",
        )
        .unwrap()
    }

    #[test]
    fn entry_filter_matches_any_identifier() {
        let e = entry("c1", "g1", "t1", "r1", Day::Monday);
        let filter = EntryFilter {
            teacher_id: Some(TeacherId("t1".into())),
            ..Default::default()
        };
        assert!(filter.matches(&e));

        let filter = EntryFilter {
            teacher_id: Some(TeacherId("other".into())),
            ..Default::default()
        };
        assert!(!filter.matches(&e));
    }

    #[test]
    fn find_timetable_restricts_to_day_and_excludes_id() {
        let mut repo = InMemoryRepository::default();
        let mut e = entry("c1", "g1", "t1", "r1", Day::Monday);
        e.id = EntryId("keep-me-out".into());
        repo.entries.push(e.clone());

        let filter = EntryFilter {
            teacher_id: Some(TeacherId("t1".into())),
            ..Default::default()
        };
        assert_eq!(repo.find_timetable(Day::Monday, &filter, None).len(), 1);
        assert_eq!(
            repo.find_timetable(Day::Monday, &filter, Some(&e.id)).len(),
            0
        );
        assert_eq!(repo.find_timetable(Day::Tuesday, &filter, None).len(), 0);
    }
}
