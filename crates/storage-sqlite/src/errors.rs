//! Storage-specific error types for SQLite operations.
//!
//! This module provides error types that wrap Diesel-specific errors and convert
//! them to the database-agnostic error types defined in `pitchdesk_core`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;
use pitchdesk_core::errors::{DatabaseError, Error};

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `pitchdesk_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A core error raised inside a write job; passed through untouched.
    #[error(transparent)]
    Core(#[from] Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Core(e) => e,
        }
    }
}

/// Extension trait for easily converting Diesel Results to core Results.
///
/// This provides a `.into_core()` method on any `Result<T, diesel::result::Error>`
/// which handles the conversion through StorageError.
pub trait IntoCore<T> {
    fn into_core(self) -> pitchdesk_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> pitchdesk_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> pitchdesk_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, diesel::ConnectionError> {
    fn into_core(self) -> pitchdesk_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_pass_through_the_write_boundary() {
        let storage: StorageError = Error::not_found("Client").into();
        let core: Error = storage.into();
        assert!(matches!(core, Error::NotFound(ref m) if m == "Client not found"));
    }

    #[test]
    fn diesel_not_found_maps_to_database_not_found() {
        let core: Error = StorageError::from(DieselError::NotFound).into();
        assert!(matches!(core, Error::Database(DatabaseError::NotFound(_))));
    }
}
