//! Error types for backend operations.

use std::io;
use thiserror::Error;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors that can occur while talking to a key-value backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend could not be reached or dropped the connection.
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend did not answer within its configured timeout.
    #[error("backend operation timed out")]
    Timeout,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backend rejected a command or answered with an unexpected reply.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Persisted backend state could not be read back.
    #[error("backend state corrupted: {0}")]
    Corrupted(String),

    /// Another process holds the backend's exclusive lock.
    #[error("backend locked: another process has exclusive access")]
    Locked,

    /// The backend configuration is unusable.
    #[error("invalid backend configuration: {0}")]
    InvalidConfig(String),
}

impl BackendError {
    /// Creates a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Creates a corruption error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }

    /// Returns true if the error means the backend itself is unreachable,
    /// as opposed to a rejected command.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            BackendError::Connection(_) | BackendError::Timeout | BackendError::Io(_)
        )
    }
}
