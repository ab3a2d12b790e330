use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    ProjectNotFound,
    SprintNotFound,
    TaskNotFound,
    AmbiguousRef,
    SprintCompleted,
    ColumnConflict,
    DefaultColumn,
    ColumnNotEmpty,
    ValidationError,
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::SprintNotFound => "SPRINT_NOT_FOUND",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::SprintCompleted => "SPRINT_COMPLETED",
            Self::ColumnConflict => "COLUMN_CONFLICT",
            Self::DefaultColumn => "DEFAULT_COLUMN",
            Self::ColumnNotEmpty => "COLUMN_NOT_EMPTY",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct SprintboardError {
    pub code: ErrorCode,
    pub message: String,
}

impl SprintboardError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "sprintboard is not initialized. Run `sprintboard init` first.",
        )
    }

    pub fn project_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::ProjectNotFound,
            format!("Project not found: {reference}"),
        )
    }

    pub fn sprint_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::SprintNotFound,
            format!("Sprint not found: {reference}"),
        )
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn sprint_completed(sprint_id: &str) -> Self {
        Self::new(
            ErrorCode::SprintCompleted,
            format!("Sprint {sprint_id} is completed and can no longer be edited"),
        )
    }

    pub fn column_conflict(name: &str) -> Self {
        Self::new(
            ErrorCode::ColumnConflict,
            format!("A column named '{name}' already exists"),
        )
    }

    pub fn default_column(id: &str) -> Self {
        Self::new(
            ErrorCode::DefaultColumn,
            format!("Cannot remove default column '{id}'"),
        )
    }

    pub fn column_not_empty(id: &str) -> Self {
        Self::new(
            ErrorCode::ColumnNotEmpty,
            format!("Cannot remove column '{id}' because it contains tasks"),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl From<rusqlite::Error> for SprintboardError {
    fn from(e: rusqlite::Error) -> Self {
        Self::database(e.to_string())
    }
}
