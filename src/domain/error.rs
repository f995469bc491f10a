//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the hierarchy or interaction rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed hierarchy at {path}: {reason}")]
    MalformedHierarchy { path: String, reason: String },

    #[error("organization not found: {0}")]
    NodeNotFound(String),

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("drag already in progress for account: {active}")]
    DragInProgress { active: String },
}

impl DomainError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedHierarchy {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
