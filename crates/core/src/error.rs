//! Domain error model shared by the data and business tiers.

use thiserror::Error;

/// Result type used across the service layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every failure a service can report falls into one of these kinds; the HTTP
/// layer maps each kind to a status code family.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A keyed lookup (or a reference inside a payload) found nothing.
    #[error("{0}")]
    NotFound(String),

    /// A unique name is already taken.
    #[error("{0}")]
    Duplicate(String),

    /// A business rule rejected the request before any mutation happened.
    #[error("{0}")]
    Validation(String),

    /// The business tier could not talk to the data tier.
    ///
    /// The message never carries transport details; those only go to the logs.
    #[error("{0}")]
    Communication(String),

    /// The entity store failed (unclassified).
    #[error("storage failure: {0}")]
    Storage(String),

    /// A computation could not produce a result, e.g. a decimal overflow.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The single communication fault raised for any data-tier transport failure.
    pub fn communication() -> Self {
        Self::Communication("error communicating with the data service".to_string())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message_for_client_facing_kinds() {
        assert_eq!(
            DomainError::not_found("product not found with id: 7").to_string(),
            "product not found with id: 7"
        );
        assert_eq!(
            DomainError::validation("price must exceed zero").to_string(),
            "price must exceed zero"
        );
    }

    #[test]
    fn communication_fault_has_a_fixed_message() {
        assert_eq!(DomainError::communication(), DomainError::communication());
        assert!(!DomainError::communication().to_string().is_empty());
    }
}
