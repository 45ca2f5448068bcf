//! Repository traits for the domain layer
//!
//! Collaborator interfaces live with their aggregate (`tariff::repository`);
//! this module holds the shared result type.

use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
