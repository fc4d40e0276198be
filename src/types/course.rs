use super::{CourseId, StudentGroupId, TeacherId};
use serde::{Deserialize, Serialize};

fn default_duration() -> u32 {
    60
}

fn default_frequency() -> u32 {
    1
}

/// A course offering: one teacher, one or more assigned student groups, a fixed
/// per-session duration, and a weekly session count owed to each assigned group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    /// Minutes per session, 30..180.
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// Sessions per week owed to each assigned student group.
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    pub teacher_id: TeacherId,
    pub student_group_ids: Vec<StudentGroupId>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Course {
    /// `(course, group, frequency-index)` triples this course owes, in input order.
    pub fn sessions(&self) -> Vec<(StudentGroupId, u32)> {
        self.student_group_ids
            .iter()
            .flat_map(|g| (0..self.frequency).map(move |i| (g.clone(), i)))
            .collect()
    }
}
