use super::time::end_of;
use super::{ClassroomId, CourseId, Day, EntryId, StudentGroupId, TeacherId};
use serde::{Deserialize, Serialize};

/// One scheduled session: a placement of a course's session for one student group
/// in one classroom, taught by one teacher, at one day/time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub id: EntryId,
    pub course_id: CourseId,
    pub student_group_id: StudentGroupId,
    pub teacher_id: TeacherId,
    pub classroom_id: ClassroomId,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
    pub week_number: u32,
    pub semester: String,
    pub academic_year: String,
}

impl TimetableEntry {
    /// Build an entry, deriving `end_time` from `start_time + duration` rather than
    /// accepting it as an independent input.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EntryId,
        course_id: CourseId,
        student_group_id: StudentGroupId,
        teacher_id: TeacherId,
        classroom_id: ClassroomId,
        day: Day,
        start_time: impl Into<String>,
        duration: u32,
        week_number: u32,
        semester: impl Into<String>,
        academic_year: impl Into<String>,
    ) -> crate::error::Result<Self> {
        let start_time = start_time.into();
        let end_time = end_of(&start_time, duration)?;
        Ok(Self {
            id,
            course_id,
            student_group_id,
            teacher_id,
            classroom_id,
            day,
            start_time,
            end_time,
            duration,
            week_number,
            semester: semester.into(),
            academic_year: academic_year.into(),
        })
    }
}
