//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::CategoryId;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("category not found: {0}")]
    NotFound(CategoryId),

    #[error("category cannot be linked to itself: {0}")]
    SelfLink(CategoryId),

    // Field is not named `source`: thiserror reserves that name for the
    // error-source chain, and CategoryId is not an error type.
    #[error("link between {source_id} and {target_id} is redundant with tree containment")]
    RedundantLink {
        source_id: CategoryId,
        target_id: CategoryId,
    },

    #[error("link from {id} to {target} is not mirrored with the same label")]
    AsymmetricLink { id: CategoryId, target: CategoryId },

    #[error("duplicate category id in snapshot: {0}")]
    DuplicateId(CategoryId),

    #[error("snapshot parent mismatch for {id}: declared {declared:?}, nested under {actual:?}")]
    ParentMismatch {
        id: CategoryId,
        declared: Option<CategoryId>,
        actual: Option<CategoryId>,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
