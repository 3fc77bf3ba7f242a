//! Core error types for the PitchDesk application.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the CRM.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A record does not exist or is not owned by the caller.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    /// An integration (SMS, email, social) is missing its credentials.
    #[error("{0}")]
    NotConfigured(String),

    /// An outbound provider call failed.
    #[error("{0}")]
    Outreach(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn not_found(entity: &str) -> Self {
        Error::NotFound(format!("{entity} not found"))
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Errors raised while validating user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(String),

    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    #[error("Invalid value '{value}' for {field}")]
    UnknownValue { field: String, value: String },

    #[error("{0}")]
    InvalidInput(String),
}
