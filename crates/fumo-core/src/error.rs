//! # Error Types
//!
//! Error types for fumo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fumo-core errors (this file)                                          │
//! │  ├── ChannelError     - The command channel failed or rejected         │
//! │  └── RepositoryError  - What a repository lookup can surface           │
//! │                                                                         │
//! │  fumo-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Command host errors (in app)                                          │
//! │  └── ApiError         - What the caller of a command sees              │
//! │                                                                         │
//! │  Flow: DbError → ApiError → ChannelError::Rejected → RepositoryError   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Not-found is never an error here: lookups return `Ok(None)`.

use thiserror::Error;

use crate::channel::Command;

// =============================================================================
// Channel Error
// =============================================================================

/// Failure of a single command invocation.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The command ran and the host rejected it.
    ///
    /// ## When This Occurs
    /// - The backing store failed (database locked, disk full, ...)
    /// - The arguments were malformed (e.g. a uid that is not a UUID)
    ///
    /// `code` carries the host's machine-readable error code when it sent one.
    #[error("{command} rejected: {message}")]
    Rejected {
        command: Command,
        code: Option<String>,
        message: String,
    },

    /// The command never reached the host.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The reply did not have the expected shape.
    #[error("{command} returned an unexpected reply: {source}")]
    Decode {
        command: Command,
        #[source]
        source: serde_json::Error,
    },

    /// The arguments could not be serialized.
    #[error("{command} arguments could not be encoded: {source}")]
    Encode {
        command: Command,
        #[source]
        source: serde_json::Error,
    },
}

impl ChannelError {
    /// Creates a Rejected error.
    pub fn rejected(command: Command, message: impl Into<String>) -> Self {
        ChannelError::Rejected {
            command,
            code: None,
            message: message.into(),
        }
    }

    /// Creates a Rejected error tagged with the host's error code.
    pub fn rejected_with_code(
        command: Command,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ChannelError::Rejected {
            command,
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// The host's error code, if this is a coded rejection.
    pub fn code(&self) -> Option<&str> {
        match self {
            ChannelError::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

// =============================================================================
// Repository Error
// =============================================================================

/// Errors a repository lookup can surface to its caller.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The remote channel failed.
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// Convenience type alias for Results with RepositoryError.
pub type RepoResult<T> = Result<T, RepositoryError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ChannelError::rejected(Command::GetByUid, "invalid uid");
        assert_eq!(err.to_string(), "fumo_get_by_uid rejected: invalid uid");

        assert_eq!(err.code(), None);

        let err = ChannelError::rejected_with_code(Command::Add, "DATABASE_ERROR", "disk full");
        assert_eq!(err.code(), Some("DATABASE_ERROR"));
        assert_eq!(err.to_string(), "fumo_add rejected: disk full");

        let err = ChannelError::Transport("ipc closed".to_string());
        assert_eq!(err.to_string(), "transport failure: ipc closed");
    }

    #[test]
    fn test_channel_error_converts_to_repository_error() {
        let err: RepositoryError = ChannelError::Transport("down".into()).into();
        assert!(matches!(err, RepositoryError::Channel(ChannelError::Transport(_))));
        assert_eq!(err.to_string(), "transport failure: down");
    }
}
