//! Notification System Error Types
//!
//! Registry operations (add, post, remove) never fail. These errors only
//! surface from vocabulary validation and key parsing.

use thiserror::Error;

/// Result type for notification operations
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors raised while validating notification names and keys
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// Namespace is empty
    #[error("Notification namespace must not be empty")]
    EmptyNamespace,

    /// Namespace contains the key separator
    #[error("Notification namespace '{0}' must not contain '.'")]
    InvalidNamespace(String),

    /// A case of the vocabulary has an empty name
    #[error("Notification case in '{namespace}' has an empty name")]
    EmptyCaseName { namespace: String },

    /// A case name contains the key separator
    #[error("Notification case '{case}' in '{namespace}' must not contain '.'")]
    InvalidCaseName { namespace: String, case: String },

    /// Two cases of the same vocabulary share a name
    #[error("Duplicate notification case '{case}' in '{namespace}'")]
    DuplicateCaseName { namespace: String, case: String },

    /// A name does not belong to the vocabulary
    #[error("Unknown notification case '{case}' for '{namespace}'")]
    UnknownCase { namespace: String, case: String },

    /// A key string is not of the form `<namespace>.<case>`
    #[error("Malformed notification key: '{0}'")]
    MalformedKey(String),
}

impl NotificationError {
    /// Create an unknown case error
    pub fn unknown_case<S: Into<String>>(namespace: S, case: S) -> Self {
        Self::UnknownCase {
            namespace: namespace.into(),
            case: case.into(),
        }
    }

    /// Create a duplicate case error
    pub fn duplicate_case<S: Into<String>>(namespace: S, case: S) -> Self {
        Self::DuplicateCaseName {
            namespace: namespace.into(),
            case: case.into(),
        }
    }

    /// Create a malformed key error
    pub fn malformed_key<S: Into<String>>(key: S) -> Self {
        Self::MalformedKey(key.into())
    }
}
