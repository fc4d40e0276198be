use super::{ClassroomId, Classroom, Course, CourseId, StudentGroup, StudentGroupId, Teacher, TeacherId};
use std::collections::HashMap;

/// Side table mapping opaque identifiers to display names. Consulted only when
/// rendering a human-readable message or report; the kernel and generators never
/// branch on whether a name happens to be resolved.
#[derive(Debug, Clone, Default)]
pub struct EntityNames {
    courses: HashMap<CourseId, String>,
    teachers: HashMap<TeacherId, String>,
    classrooms: HashMap<ClassroomId, String>,
    student_groups: HashMap<StudentGroupId, String>,
}

impl EntityNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(
        courses: &[Course],
        teachers: &[Teacher],
        classrooms: &[Classroom],
        student_groups: &[StudentGroup],
    ) -> Self {
        Self {
            courses: courses.iter().map(|c| (c.id.clone(), c.name.clone())).collect(),
            teachers: teachers.iter().map(|t| (t.id.clone(), t.name.clone())).collect(),
            classrooms: classrooms.iter().map(|r| (r.id.clone(), r.name.clone())).collect(),
            student_groups: student_groups
                .iter()
                .map(|g| (g.id.clone(), g.name.clone()))
                .collect(),
        }
    }

    pub fn course(&self, id: &CourseId) -> String {
        self.courses.get(id).cloned().unwrap_or_else(|| id.to_string())
    }

    pub fn teacher(&self, id: &TeacherId) -> String {
        self.teachers.get(id).cloned().unwrap_or_else(|| id.to_string())
    }

    pub fn classroom(&self, id: &ClassroomId) -> String {
        self.classrooms.get(id).cloned().unwrap_or_else(|| id.to_string())
    }

    pub fn student_group(&self, id: &StudentGroupId) -> String {
        self.student_groups
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }
}
