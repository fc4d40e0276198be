use crate::error::{Result, SchedulerError};
use crate::repository::InMemoryRepository;
use crate::types::{Classroom, Course, EngineConfig, StudentGroup, Teacher, TimetableEntry};
use std::fs;
use std::path::Path;

/// Load the four entity files and an optional `config.toml` from a directory:
/// `courses.json`, `teachers.json`, `classrooms.json`, `student_groups.json`.
/// An `entries.json` file, if present, seeds the repository's persisted
/// timetable entries so `timetable check`/`timetable list` have something to
/// query.
pub fn load_input_from_dir(dir: &Path) -> Result<(InMemoryRepository, EngineConfig)> {
    let courses = load_courses(&dir.join("courses.json"))?;
    let teachers = load_teachers(&dir.join("teachers.json"))?;
    let classrooms = load_classrooms(&dir.join("classrooms.json"))?;
    let student_groups = load_student_groups(&dir.join("student_groups.json"))?;
    let config = load_config_or_default(&dir.join("config.toml"));

    let mut repo = InMemoryRepository::new(courses, classrooms, student_groups, teachers);

    let entries_path = dir.join("entries.json");
    if entries_path.exists() {
        repo.insert_many(load_entries(&entries_path)?);
    }

    Ok((repo, config))
}

pub fn load_courses(path: &Path) -> Result<Vec<Course>> {
    load_json_file(path)
}

pub fn load_teachers(path: &Path) -> Result<Vec<Teacher>> {
    load_json_file(path)
}

pub fn load_classrooms(path: &Path) -> Result<Vec<Classroom>> {
    load_json_file(path)
}

pub fn load_student_groups(path: &Path) -> Result<Vec<StudentGroup>> {
    load_json_file(path)
}

pub fn load_entries(path: &Path) -> Result<Vec<TimetableEntry>> {
    load_json_file(path)
}

/// Load `config.toml`, overlaying environment variables, or fall back to
/// built-in defaults when the file is absent.
pub fn load_config_or_default(path: &Path) -> EngineConfig {
    let base = if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => EngineConfig::default(),
        }
    } else {
        EngineConfig::default()
    };
    base.with_env_overrides()
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SchedulerError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}
