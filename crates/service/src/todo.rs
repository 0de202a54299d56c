//! Todo service: creation and update against the category service and
//! todo store, the completion-timestamp rule, and the aggregate reads.

use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use todo_core::error::DomainError;
use todo_core::lifecycle::completion_stamp;
use todo_core::types::DbId;
use todo_db::models::stats::{
    CategoryTimeOpenAverage, CategoryTodoCount, OpenPriorityCount, TimeOpenSummary,
};
use todo_db::models::todo::{NewTodo, Priority, Todo, TodoChanges};
use todo_db::repositories::TodoRepo;

use crate::category::CategoryService;
use crate::error::ServiceResult;

/// Request to create a todo. `category` is the category name; the
/// category must already exist.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
}

/// Request to update a todo.
///
/// `title`, `description`, `completed`, and `priority` replace the stored
/// values unconditionally. `category`, when present, is re-resolved by
/// name; when absent the category is left unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub category: Option<String>,
    pub priority: Priority,
}

/// Operations on todos.
pub struct TodoService;

impl TodoService {
    /// Create a todo in an existing category.
    ///
    /// An unknown category name fails with `CategoryNotFound` before
    /// anything is persisted. The new todo starts open with `created_at`
    /// stamped here, once.
    pub async fn create(pool: &PgPool, input: &CreateTodo) -> ServiceResult<Todo> {
        let category = CategoryService::get_by_name(pool, &input.category).await?;

        let row = NewTodo {
            title: input.title.clone(),
            description: input.description.clone(),
            priority: input.priority,
            category_id: category.id,
            created_at: Utc::now(),
        };

        Ok(TodoRepo::create(pool, &row).await?)
    }

    /// Update a todo, applying the completion-timestamp rule.
    ///
    /// The rule fires exactly once, on the first transition to completed:
    /// it stamps `completed_at = now` and the elapsed whole seconds since
    /// creation. Later updates never recompute the stamp, and toggling
    /// back to open preserves it.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateTodo) -> ServiceResult<Todo> {
        let existing = TodoRepo::find_by_id(pool, id)
            .await?
            .ok_or(DomainError::TodoNotFound(id))?;

        let category_id = match &input.category {
            Some(name) => Some(CategoryService::get_by_name(pool, name).await?.id),
            None => None,
        };

        let stamp = completion_stamp(
            input.completed,
            existing.created_at,
            existing.completed_at,
            Utc::now(),
        );
        if let Some(stamp) = &stamp {
            tracing::debug!(
                todo_id = id,
                time_open_secs = stamp.time_open_secs,
                "Todo completed"
            );
        }

        let changes = TodoChanges {
            title: input.title.clone(),
            description: input.description.clone(),
            completed: input.completed,
            priority: input.priority,
            category_id,
            completed_at: stamp.map(|s| s.completed_at),
            time_open_secs: stamp.map(|s| s.time_open_secs),
        };

        TodoRepo::update(pool, id, &changes)
            .await?
            .ok_or_else(|| DomainError::TodoNotFound(id).into())
    }

    /// Delete a todo by ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> ServiceResult<()> {
        if !TodoRepo::exists_by_id(pool, id).await? {
            return Err(DomainError::TodoNotFound(id).into());
        }
        TodoRepo::delete(pool, id).await?;
        tracing::debug!(todo_id = id, "Todo deleted");
        Ok(())
    }

    /// Get a todo by ID.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> ServiceResult<Todo> {
        TodoRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| DomainError::TodoNotFound(id).into())
    }

    /// List all todos.
    pub async fn list(pool: &PgPool) -> ServiceResult<Vec<Todo>> {
        Ok(TodoRepo::list(pool).await?)
    }

    /// List completed todos.
    pub async fn list_completed(pool: &PgPool) -> ServiceResult<Vec<Todo>> {
        Ok(TodoRepo::list_by_completed(pool, true).await?)
    }

    /// List todos in the named category. An unknown name yields an empty
    /// list, not an error.
    pub async fn list_by_category(pool: &PgPool, category_name: &str) -> ServiceResult<Vec<Todo>> {
        Ok(TodoRepo::list_by_category_name(pool, category_name).await?)
    }

    // -----------------------------------------------------------------------
    // Aggregate reads (delegated to the store)
    // -----------------------------------------------------------------------

    /// Todo count per category.
    pub async fn count_per_category(pool: &PgPool) -> ServiceResult<Vec<CategoryTodoCount>> {
        Ok(TodoRepo::count_per_category(pool).await?)
    }

    /// Average time-open per category, over completed todos.
    pub async fn average_time_open_per_category(
        pool: &PgPool,
    ) -> ServiceResult<Vec<CategoryTimeOpenAverage>> {
        Ok(TodoRepo::average_time_open_per_category(pool).await?)
    }

    /// Open-todo count per priority.
    pub async fn open_by_priority(pool: &PgPool) -> ServiceResult<Vec<OpenPriorityCount>> {
        Ok(TodoRepo::count_open_by_priority(pool).await?)
    }

    /// Todos completed on the store's current date.
    pub async fn completed_today(pool: &PgPool) -> ServiceResult<Vec<Todo>> {
        Ok(TodoRepo::list_completed_today(pool).await?)
    }

    /// The up-to-five longest-open todos, earliest `created_at` first.
    pub async fn longest_open(pool: &PgPool) -> ServiceResult<Vec<Todo>> {
        Ok(TodoRepo::list_longest_open(pool).await?)
    }

    /// Min/max/avg time-open across all completed todos.
    pub async fn time_open_summary(pool: &PgPool) -> ServiceResult<TimeOpenSummary> {
        Ok(TodoRepo::time_open_summary(pool).await?)
    }
}
