//! # API Error Type
//!
//! Unified error type for the `fumo_*` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Fumo                                   │
//! │                                                                         │
//! │  invoke('fumo_get_by_uid', { uid })                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command handler → Result<T, ApiError>                           │  │
//! │  │         │                                                        │  │
//! │  │  DbError::InvalidUid ──────────► ApiError { INVALID_ARGUMENT }   │  │
//! │  │  DbError::QueryFailed ─────────► ApiError { DATABASE_ERROR }     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Webview: promise rejects with { code, message }                        │
//! │  LocalChannel: ChannelError::Rejected { command, code, message }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fumo_core::{ChannelError, RepositoryError};
use fumo_db::DbError;
use serde::Serialize;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_ARGUMENT",
///   "message": "Invalid uid 'X': invalid length: expected ..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No repository is registered under the requested name
    NotFound,

    /// Malformed command arguments
    InvalidArgument,

    /// Database operation failed
    DatabaseError,

    /// A repository's command channel failed for another reason
    Internal,
}

impl ErrorCode {
    /// Wire spelling, same as the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Parses the wire spelling back.
    pub fn parse(code: &str) -> Option<Self> {
        [
            ErrorCode::NotFound,
            ErrorCode::InvalidArgument,
            ErrorCode::DatabaseError,
            ErrorCode::Internal,
        ]
        .into_iter()
        .find(|c| c.as_str() == code)
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidArgument, message)
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            e @ DbError::InvalidUid { .. } => ApiError::invalid_argument(e.to_string()),
            e @ DbError::Constraint(_) => ApiError::invalid_argument(e.to_string()),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            e @ DbError::Corrupt { .. } => {
                tracing::error!("{}", e);
                ApiError::new(ErrorCode::DatabaseError, "Stored item is unreadable")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts a repository lookup failure. A coded rejection keeps the host's
/// code; anything else on the channel is `INTERNAL`.
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Channel(ChannelError::Rejected { code, message, .. }) => {
                let code = code
                    .as_deref()
                    .and_then(ErrorCode::parse)
                    .unwrap_or(ErrorCode::Internal);
                ApiError::new(code, message)
            }
            RepositoryError::Channel(e) => ApiError::new(ErrorCode::Internal, e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
