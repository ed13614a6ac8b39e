//! Program-cycle error types.
//!
//! # HTTP Status Mapping
//!
//! | Kind | HTTP Status |
//! |------|-------------|
//! | NotFound | 404 |
//! | ValidationFailure | 400 |
//! | Conflict | 409 |
//! | Infrastructure | 500 |

use chrono::NaiveDate;

use crate::domain::foundation::{
    ContextId, DomainError, ErrorCode, ProgramCycleId, TrackId, ValidationError,
};

use super::CycleScope;

/// Caller-facing category of a [`ProgramCycleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    ValidationFailure,
    Conflict,
    Infrastructure,
}

/// Errors raised by program-cycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramCycleError {
    /// No cycle with this id.
    NotFound(ProgramCycleId),

    /// Referenced track does not exist.
    TrackNotFound(TrackId),

    /// Referenced context does not exist.
    ContextNotFound(ContextId),

    /// End date precedes start date.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// A field failed validation.
    ValidationFailed { field: String, message: String },

    /// Another cycle in the scope already uses this name.
    NameTaken { scope: CycleScope, name: String },

    /// Another cycle in the scope is already active.
    ActiveCycleExists {
        scope: CycleScope,
        existing_id: ProgramCycleId,
        existing_name: String,
    },

    /// Progress has been recorded against the cycle.
    HasProgress { id: ProgramCycleId, count: u64 },

    /// Storage rejected the write because of a concurrent conflicting write.
    /// `code` names the uniqueness rule the store enforced.
    StorageConflict { code: ErrorCode, message: String },

    /// Infrastructure failure.
    Infrastructure(String),
}

impl ProgramCycleError {
    pub fn not_found(id: ProgramCycleId) -> Self {
        ProgramCycleError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProgramCycleError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn name_taken(scope: CycleScope, name: impl Into<String>) -> Self {
        ProgramCycleError::NameTaken {
            scope,
            name: name.into(),
        }
    }

    pub fn active_cycle_exists(
        scope: CycleScope,
        existing_id: ProgramCycleId,
        existing_name: impl Into<String>,
    ) -> Self {
        ProgramCycleError::ActiveCycleExists {
            scope,
            existing_id,
            existing_name: existing_name.into(),
        }
    }

    pub fn has_progress(id: ProgramCycleId, count: u64) -> Self {
        ProgramCycleError::HasProgress { id, count }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProgramCycleError::Infrastructure(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProgramCycleError::NotFound(_)
            | ProgramCycleError::TrackNotFound(_)
            | ProgramCycleError::ContextNotFound(_) => ErrorKind::NotFound,
            ProgramCycleError::InvalidDateRange { .. }
            | ProgramCycleError::ValidationFailed { .. }
            | ProgramCycleError::HasProgress { .. } => ErrorKind::ValidationFailure,
            ProgramCycleError::NameTaken { .. }
            | ProgramCycleError::ActiveCycleExists { .. }
            | ProgramCycleError::StorageConflict { .. } => ErrorKind::Conflict,
            ProgramCycleError::Infrastructure(_) => ErrorKind::Infrastructure,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProgramCycleError::NotFound(_) => ErrorCode::ProgramCycleNotFound,
            ProgramCycleError::TrackNotFound(_) => ErrorCode::TrackNotFound,
            ProgramCycleError::ContextNotFound(_) => ErrorCode::ContextNotFound,
            ProgramCycleError::InvalidDateRange { .. } => ErrorCode::InvalidDateRange,
            ProgramCycleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ProgramCycleError::NameTaken { .. } => ErrorCode::ProgramCycleNameTaken,
            ProgramCycleError::ActiveCycleExists { .. } => ErrorCode::ActiveProgramCycleExists,
            ProgramCycleError::HasProgress { .. } => ErrorCode::ProgressRecordsExist,
            ProgramCycleError::StorageConflict { code, .. } => *code,
            ProgramCycleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            ProgramCycleError::NotFound(id) => format!("Program cycle not found: {}", id),
            ProgramCycleError::TrackNotFound(id) => format!("Track not found: {}", id),
            ProgramCycleError::ContextNotFound(id) => format!("Context not found: {}", id),
            ProgramCycleError::InvalidDateRange { start, end } => {
                format!("End date {} is before start date {}", end, start)
            }
            ProgramCycleError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ProgramCycleError::NameTaken { scope, name } => {
                format!("A program cycle named '{}' already exists for {}", name, scope)
            }
            ProgramCycleError::ActiveCycleExists {
                scope,
                existing_id,
                existing_name,
            } => format!(
                "Program cycle '{}' ({}) is already active for {}",
                existing_name, existing_id, scope
            ),
            ProgramCycleError::HasProgress { id, count } => format!(
                "Program cycle {} has {} progress record(s) and cannot be deleted",
                id, count
            ),
            ProgramCycleError::StorageConflict { message, .. } => {
                format!("Conflicting write: {}", message)
            }
            ProgramCycleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ProgramCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProgramCycleError {}

impl From<ValidationError> for ProgramCycleError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvertedRange { start, end } => {
                ProgramCycleError::InvalidDateRange { start, end }
            }
            ValidationError::EmptyField { ref field }
            | ValidationError::InvalidFormat { ref field, .. } => ProgramCycleError::ValidationFailed {
                field: field.clone(),
                message: err.to_string(),
            },
        }
    }
}

impl From<DomainError> for ProgramCycleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            // Unique indexes caught a write that raced past the application checks.
            ErrorCode::ProgramCycleNameTaken | ErrorCode::ActiveProgramCycleExists => {
                ProgramCycleError::StorageConflict {
                    code: err.code,
                    message: err.message,
                }
            }
            _ => ProgramCycleError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ProgramCycleError> for DomainError {
    fn from(err: ProgramCycleError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
