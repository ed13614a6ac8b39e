//! Error types for the domain layer.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("End date {end} is before start date {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an error for a date range that ends before it starts.
    pub fn inverted_range(start: NaiveDate, end: NaiveDate) -> Self {
        ValidationError::InvertedRange { start, end }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidDateRange,
    ProgressRecordsExist,

    // Not found errors
    ProgramCycleNotFound,
    TrackNotFound,
    ContextNotFound,

    // Conflict errors
    ProgramCycleNameTaken,
    ActiveProgramCycleExists,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidDateRange => "INVALID_DATE_RANGE",
            ErrorCode::ProgressRecordsExist => "PROGRESS_RECORDS_EXIST",
            ErrorCode::ProgramCycleNotFound => "PROGRAM_CYCLE_NOT_FOUND",
            ErrorCode::TrackNotFound => "TRACK_NOT_FOUND",
            ErrorCode::ContextNotFound => "CONTEXT_NOT_FOUND",
            ErrorCode::ProgramCycleNameTaken => "PROGRAM_CYCLE_NAME_TAKEN",
            ErrorCode::ActiveProgramCycleExists => "ACTIVE_PROGRAM_CYCLE_EXISTS",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// Ports return this for infrastructure failures; the module error types
/// wrap it rather than flattening it into strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error for a failed persistence operation.
    pub fn database(operation: &str, err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::DatabaseError,
            format!("Failed to {}: {}", operation, err),
        )
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
