mod availability;
mod classroom;
mod config;
mod course;
mod entry;
mod ids;
mod names;
mod student_group;
mod teacher;
pub mod time;

pub use availability::*;
pub use classroom::*;
pub use config::*;
pub use course::*;
pub use entry::*;
pub use ids::*;
pub use names::*;
pub use student_group::*;
pub use teacher::*;
pub use time::Day;

/// A read-only snapshot of every entity the engine needs for one generation request:
/// the active courses, classrooms, student groups, and faculty for a given
/// semester/academic-year/department filter. Built by the caller from its own
/// repository and handed to a generator; the engine never mutates it.
#[derive(Debug, Clone)]
pub struct EntitySnapshot {
    pub courses: Vec<Course>,
    pub classrooms: Vec<Classroom>,
    pub student_groups: Vec<StudentGroup>,
    pub teachers: Vec<Teacher>,
}

impl EntitySnapshot {
    pub fn names(&self) -> EntityNames {
        EntityNames::from_snapshot(&self.courses, &self.teachers, &self.classrooms, &self.student_groups)
    }

    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| &c.id == id)
    }

    pub fn classroom(&self, id: &ClassroomId) -> Option<&Classroom> {
        self.classrooms.iter().find(|r| &r.id == id)
    }

    pub fn student_group(&self, id: &StudentGroupId) -> Option<&StudentGroup> {
        self.student_groups.iter().find(|g| &g.id == id)
    }

    pub fn teacher(&self, id: &TeacherId) -> Option<&Teacher> {
        self.teachers.iter().find(|t| &t.id == id)
    }
}
