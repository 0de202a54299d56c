//! Category service: uniqueness and existence invariants over the
//! category store.

use sqlx::PgPool;
use todo_core::error::DomainError;
use todo_db::models::category::Category;
use todo_db::repositories::CategoryRepo;

use crate::error::{classify_category_insert, ServiceResult};

/// Operations on categories.
pub struct CategoryService;

impl CategoryService {
    /// Create a category with a unique name.
    ///
    /// The existence check is an early exit; the storage-level unique
    /// constraint remains the hard guard, and a lost race is reported as
    /// `CategoryAlreadyExists` just the same.
    pub async fn create(pool: &PgPool, name: &str) -> ServiceResult<Category> {
        if CategoryRepo::exists_by_name(pool, name).await? {
            return Err(DomainError::CategoryAlreadyExists(name.to_owned()).into());
        }

        CategoryRepo::create(pool, name)
            .await
            .map_err(|err| classify_category_insert(err, name))
    }

    /// List all categories.
    pub async fn list(pool: &PgPool) -> ServiceResult<Vec<Category>> {
        Ok(CategoryRepo::list(pool).await?)
    }

    /// Get a category by its exact name.
    pub async fn get_by_name(pool: &PgPool, name: &str) -> ServiceResult<Category> {
        CategoryRepo::find_by_name(pool, name)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFound(name.to_owned()).into())
    }

    /// Delete a category by its exact name.
    ///
    /// Deleting a category that is still referenced by todos is not
    /// guarded here; the foreign key rejects it and the failure surfaces
    /// as a database error.
    pub async fn delete_by_name(pool: &PgPool, name: &str) -> ServiceResult<()> {
        let category = Self::get_by_name(pool, name).await?;
        CategoryRepo::delete(pool, category.id).await?;
        tracing::debug!(category = %name, "Category deleted");
        Ok(())
    }
}
