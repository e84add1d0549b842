//! # Store Errors
//!
//! ```text
//! sqlx::Error ──► DbError ──► ApiError (command host) ──► caller
//! ```
//!
//! A missing row is never an error here: lookups return `Ok(None)` and a
//! delete of an unknown uid returns `Ok(false)`.

use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// A uid argument does not parse as a UUID.
    #[error("Invalid uid '{uid}': {reason}")]
    InvalidUid { uid: String, reason: String },

    /// A write broke a schema rule (duplicate uid, bad metadata kind, ...).
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// The store could not be opened or has been closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected or failed a statement.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored row could not be turned back into a record.
    #[error("Corrupt row {uid}: {reason}")]
    Corrupt { uid: String, reason: String },

    /// Every connection stayed busy past the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn invalid_uid(uid: impl Into<String>, reason: impl ToString) -> Self {
        DbError::InvalidUid {
            uid: uid.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) => match e.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::CheckViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::ForeignKeyViolation => DbError::Constraint(e.message().to_string()),
                _ => DbError::QueryFailed(e.message().to_string()),
            },
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("store is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
