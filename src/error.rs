use crate::kernel::Conflict;
use thiserror::Error;

/// Domain-specific errors for the scheduling engine
#[derive(Error, Debug)]
pub enum SchedulerError {
    // Input/parse errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("Invalid time value '{0}'")]
    InvalidTime(String),

    // Data validation errors
    #[error("Course '{course_id}' references unknown teacher '{teacher_id}'")]
    UnknownTeacher { course_id: String, teacher_id: String },

    #[error("Course '{course_id}' references unknown student group '{group_id}'")]
    UnknownStudentGroup { course_id: String, group_id: String },

    #[error("Duplicate ID found: {id_type} '{id}'")]
    DuplicateId { id_type: String, id: String },

    #[error("No {entity_type} found with id '{id}'")]
    NotFound { entity_type: String, id: String },

    // Modeled for a future HTTP front-end; unenforced by this crate (authn/authz is out of scope)
    #[error("Caller is not authorized to perform this action: {0}")]
    Unauthorized(String),

    #[error("Placement rejected with {} conflict(s)", .conflicts.len())]
    Conflict { conflicts: Vec<Conflict> },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
