use todo_core::error::DomainError;

/// Service-level error type.
///
/// Wraps [`DomainError`] for the classified domain failures and adds a
/// database catch-all for everything else (constraint violations,
/// connectivity errors). The embedding layer dispatches on the variant,
/// not on a type hierarchy.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A classified domain failure.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An unclassified infrastructure failure from the store.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for service return values.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Name of the unique constraint guarding category names.
const CATEGORY_NAME_CONSTRAINT: &str = "uq_categories_name";

/// Classify a category-insert failure.
///
/// Two concurrent creates for the same name can both pass the existence
/// check; the storage-level unique constraint is the hard guard. A
/// PostgreSQL unique violation (error code 23505) on the category-name
/// constraint is therefore still reported as `CategoryAlreadyExists`.
pub(crate) fn classify_category_insert(err: sqlx::Error, name: &str) -> ServiceError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(CATEGORY_NAME_CONSTRAINT)
        {
            return DomainError::CategoryAlreadyExists(name.to_owned()).into();
        }
    }
    ServiceError::Database(err)
}
