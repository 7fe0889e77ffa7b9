//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule violations on the link collection.
/// These are independent of storage and presentation concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("name must be populated")]
    EmptyName,

    #[error("name already taken: {0}")]
    DuplicateName(String),

    #[error("url format invalid: {0}")]
    InvalidUrl(String),

    #[error("parent does not exist: {0}")]
    UnknownParent(String),

    #[error("link not found: {0}")]
    RecordNotFound(String),

    #[error("link has children and cannot be deleted: {0}")]
    HasChildren(String),
}
