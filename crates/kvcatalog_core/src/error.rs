//! Error types for catalog operations.

use crate::record::RecordId;
use kvcatalog_backend::BackendError;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur in catalog operations.
///
/// Backend failures of every kind are folded into
/// [`CatalogError::BackendUnavailable`]; no backend-specific error type
/// crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The backend could not serve the request, or the store is degraded.
    #[error("backend unavailable: {reason}")]
    BackendUnavailable {
        /// What went wrong.
        reason: String,
    },

    /// No record exists for the requested id.
    #[error("record {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: RecordId,
    },

    /// A stored value could not be decoded.
    #[error("malformed record at {key}: {reason}")]
    Malformed {
        /// Backend key holding the bad value.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Caller-supplied input failed a type constraint.
    #[error("validation error: {message}")]
    Validation {
        /// Description of the rejected input.
        message: String,
    },
}

impl CatalogError {
    /// Creates a backend unavailable error.
    pub fn backend_unavailable(reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            reason: reason.into(),
        }
    }

    /// Creates a malformed record error.
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns true for [`CatalogError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for [`CatalogError::BackendUnavailable`].
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }
}

impl From<BackendError> for CatalogError {
    fn from(err: BackendError) -> Self {
        Self::backend_unavailable(err.to_string())
    }
}
