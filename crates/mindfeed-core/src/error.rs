//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::validation::Violation;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Public API for callers that need a missing target to be an error.
    /// `FeedService` itself reports missing targets as `None` / `false`.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {}", join_violations(.0))]
    ValidationFailed(Vec<Violation>),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    /// Violation messages in the order the rules reported them.
    pub fn violation_messages(&self) -> Vec<String> {
        match self {
            DomainError::ValidationFailed(violations) => {
                violations.iter().map(ToString::to_string).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Stored row could not be converted: {0}")]
    Conversion(String),
}
