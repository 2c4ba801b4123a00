//! Domain error taxonomy.

use thiserror::Error;

/// Errors surfaced by domain operations.
///
/// `NotFound`, `Conflict`, and `Unauthorized` are raised close to the check
/// that detects them and carry a caller-facing message. `Internal` wraps any
/// store, cache, or queue transport failure; it is propagated without retry.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// True for the domain-level errors a caller can act on, as opposed to
    /// transport failures.
    pub fn is_domain(&self) -> bool {
        !matches!(self, DomainError::Internal(_))
    }
}
