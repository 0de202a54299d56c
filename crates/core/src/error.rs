use crate::types::DbId;

/// Domain-level failures produced by the services.
///
/// Each variant carries the key it was looked up by. Anything that is not
/// one of these kinds (constraint violations, connectivity errors) passes
/// through the service layer as an opaque database error instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Category already exists: {0}")]
    CategoryAlreadyExists(String),

    #[error("Todo not found: {0}")]
    TodoNotFound(DbId),
}
