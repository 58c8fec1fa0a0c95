//! Error types for storage and auditing

use thiserror::Error;

/// Repository failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Entity has no id to store it under
    #[error("{kind} has no id")]
    MissingId {
        /// Entity kind
        kind: &'static str,
    },

    /// An entity with the same id is already stored
    #[error("{kind} {id} already exists")]
    Duplicate {
        /// Entity kind
        kind: &'static str,
        /// Conflicting id
        id: String,
    },

    /// Nothing stored under the id
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind
        kind: &'static str,
        /// Missing id
        id: String,
    },

    /// Backend could not serve the request
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Check if error is transient
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Backend(_))
    }

    /// Check if the error means the target does not exist
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Audit chain failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// Chain link or event hash does not match
    #[error("audit chain broken at event {index}")]
    IntegrityViolation {
        /// Position of the first bad event
        index: usize,
    },
}
