use crate::error::Result;
use crate::repository::InMemoryRepository;
use std::collections::HashSet;

/// Accumulated validation findings: errors block generation, warnings don't.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate a loaded repository's entity set: duplicate IDs and dangling
/// course->teacher / course->student-group references. Returns `Err` when
/// any error-level finding is present; warnings are reported but do not
/// block generation.
pub fn validate_input(repo: &InMemoryRepository) -> Result<ValidationResult> {
    let mut result = ValidationResult::default();

    check_duplicate_ids(repo.courses.iter().map(|c| c.id.to_string()), "course", &mut result);
    check_duplicate_ids(repo.teachers.iter().map(|t| t.id.to_string()), "teacher", &mut result);
    check_duplicate_ids(repo.classrooms.iter().map(|r| r.id.to_string()), "classroom", &mut result);
    check_duplicate_ids(
        repo.student_groups.iter().map(|g| g.id.to_string()),
        "student group",
        &mut result,
    );

    let teacher_ids: HashSet<&str> = repo.teachers.iter().map(|t| t.id.0.as_str()).collect();
    let group_ids: HashSet<&str> = repo.student_groups.iter().map(|g| g.id.0.as_str()).collect();

    for course in &repo.courses {
        if !teacher_ids.contains(course.teacher_id.0.as_str()) {
            result.add_error(format!(
                "Course '{}' references unknown teacher '{}'",
                course.id, course.teacher_id
            ));
        }
        for group_id in &course.student_group_ids {
            if !group_ids.contains(group_id.0.as_str()) {
                result.add_error(format!(
                    "Course '{}' references unknown student group '{}'",
                    course.id, group_id
                ));
            }
        }
    }

    if repo.classrooms.is_empty() {
        result.add_warning("No classrooms loaded; no course sessions can be placed".to_string());
    }

    let max_classroom_capacity = repo.classrooms.iter().map(|r| r.capacity).max().unwrap_or(0);
    for group in &repo.student_groups {
        if group.size > max_classroom_capacity {
            result.add_warning(format!(
                "Student group '{}' size ({}) exceeds the largest classroom capacity ({})",
                group.id, group.size, max_classroom_capacity
            ));
        }
    }

    if !result.is_valid() {
        return Err(anyhow::anyhow!(
            "Validation failed with {} error(s):\n{}",
            result.errors.len(),
            result.errors.join("\n")
        ));
    }

    Ok(result)
}

fn check_duplicate_ids(ids: impl Iterator<Item = String>, label: &str, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            result.add_error(format!("Duplicate {label} ID: '{id}'"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Classroom, ClassroomId, Course, CourseId, StudentGroup, StudentGroupId, Teacher, TeacherId};

    fn sample_repo() -> InMemoryRepository {
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
            frequency: 1,
            teacher_id: TeacherId("t1".into()),
            student_group_ids: vec![StudentGroupId("g1".into())],
            active: true,
            semester: None,
            department: None,
        };
        InMemoryRepository::new(vec![course], vec![classroom], vec![group], vec![teacher])
    }

    #[test]
    fn well_formed_repository_validates_cleanly() {
        let repo = sample_repo();
        let result = validate_input(&repo).unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn dangling_teacher_reference_is_an_error() {
        let mut repo = sample_repo();
        repo.courses[0].teacher_id = TeacherId("ghost".into());
        assert!(validate_input(&repo).is_err());
    }

    #[test]
    fn duplicate_course_id_is_an_error() {
        let mut repo = sample_repo();
        let dup = repo.courses[0].clone();
        repo.courses.push(dup);
        assert!(validate_input(&repo).is_err());
    }
}
