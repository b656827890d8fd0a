//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (field
/// validation, lookups, key conflicts). Persistence concerns belong elsewhere.
/// Every variant is recoverable: the caller re-prompts, aborts the single
/// operation, or branches (e.g. offers an update instead of an add).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A product identifier was empty or contained whitespace.
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// A product name was empty.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// A price was negative or not a finite number.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// A quantity was negative or not an integer.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// No product with the given id exists.
    #[error("product `{0}` not found")]
    NotFound(String),

    /// A product with the given id already exists.
    #[error("product `{0}` already exists")]
    AlreadyExists(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_name(msg: impl Into<String>) -> Self {
        Self::InvalidName(msg.into())
    }

    pub fn invalid_price(msg: impl Into<String>) -> Self {
        Self::InvalidPrice(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn already_exists(id: impl Into<String>) -> Self {
        Self::AlreadyExists(id.into())
    }
}
