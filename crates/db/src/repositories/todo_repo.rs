//! Repository for the `todos` table, including the aggregate queries.

use sqlx::PgPool;
use todo_core::types::DbId;

use crate::models::stats::{
    CategoryTimeOpenAverage, CategoryTodoCount, OpenPriorityCount, TimeOpenSummary,
};
use crate::models::todo::{NewTodo, Todo, TodoChanges};

/// Column list for todos queries.
const COLUMNS: &str =
    "id, title, description, completed, created_at, completed_at, time_open_secs, priority, category_id";

/// How many todos the longest-open query returns at most.
const LONGEST_OPEN_LIMIT: i64 = 5;

/// Provides CRUD and aggregate operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo, returning the created row. The row starts open:
    /// `completed` is false and no completion stamp is set.
    pub async fn create(pool: &PgPool, input: &NewTodo) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (title, description, completed, created_at, priority, category_id)
             VALUES ($1, $2, FALSE, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.created_at)
            .bind(input.priority)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find a todo by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a todo with this ID exists.
    pub async fn exists_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM todos WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// Update a todo by ID, returning the updated row.
    ///
    /// `category_id` and the completion-stamp fields coalesce with the
    /// existing row: a `None` leaves the stored value untouched, so an
    /// existing stamp can never be overwritten through this method.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &TodoChanges,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                title = $2,
                description = $3,
                completed = $4,
                priority = $5,
                category_id = COALESCE($6, category_id),
                completed_at = COALESCE($7, completed_at),
                time_open_secs = COALESCE($8, time_open_secs)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.completed)
            .bind(input.priority)
            .bind(input.category_id)
            .bind(input.completed_at)
            .bind(input.time_open_secs)
            .fetch_optional(pool)
            .await
    }

    /// Delete a todo by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all todos.
    pub async fn list(pool: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos ORDER BY id ASC");
        sqlx::query_as::<_, Todo>(&query).fetch_all(pool).await
    }

    /// List todos by completion state.
    pub async fn list_by_completed(
        pool: &PgPool,
        completed: bool,
    ) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE completed = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Todo>(&query)
            .bind(completed)
            .fetch_all(pool)
            .await
    }

    /// List todos belonging to the named category.
    pub async fn list_by_category_name(
        pool: &PgPool,
        category_name: &str,
    ) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!(
            "SELECT t.id, t.title, t.description, t.completed, t.created_at,
                    t.completed_at, t.time_open_secs, t.priority, t.category_id
             FROM todos t
             JOIN categories c ON t.category_id = c.id
             WHERE c.name = $1
             ORDER BY t.id ASC"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(category_name)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Aggregate queries
    // -----------------------------------------------------------------------

    /// Todo count per category, for categories with at least one todo.
    pub async fn count_per_category(pool: &PgPool) -> Result<Vec<CategoryTodoCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryTodoCount>(
            "SELECT c.name AS category_name, COUNT(t.id) AS todo_count
             FROM todos t
             JOIN categories c ON t.category_id = c.id
             GROUP BY c.name
             ORDER BY c.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Average time-open per category, over completed todos only.
    /// Categories with no completed todo are absent from the result.
    pub async fn average_time_open_per_category(
        pool: &PgPool,
    ) -> Result<Vec<CategoryTimeOpenAverage>, sqlx::Error> {
        sqlx::query_as::<_, CategoryTimeOpenAverage>(
            "SELECT c.name AS category_name,
                    AVG(t.time_open_secs)::double precision AS avg_time_open_secs
             FROM todos t
             JOIN categories c ON t.category_id = c.id
             WHERE t.completed = TRUE
             GROUP BY c.name
             ORDER BY c.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Open-todo count per priority, for priorities present among open todos.
    pub async fn count_open_by_priority(
        pool: &PgPool,
    ) -> Result<Vec<OpenPriorityCount>, sqlx::Error> {
        sqlx::query_as::<_, OpenPriorityCount>(
            "SELECT priority, COUNT(*) AS open_count
             FROM todos
             WHERE completed = FALSE
             GROUP BY priority
             ORDER BY priority ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Todos whose completion instant falls on the database's current date.
    pub async fn list_completed_today(pool: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM todos WHERE completed_at::date = CURRENT_DATE ORDER BY id ASC");
        sqlx::query_as::<_, Todo>(&query).fetch_all(pool).await
    }

    /// The open todos that have been open the longest: earliest
    /// `created_at` first, at most five rows.
    pub async fn list_longest_open(pool: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM todos
             WHERE completed = FALSE
             ORDER BY created_at ASC
             LIMIT $1"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(LONGEST_OPEN_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Min/max/avg time-open across all completed todos. Always a single
    /// row; every field is NULL when no completed todo exists.
    pub async fn time_open_summary(pool: &PgPool) -> Result<TimeOpenSummary, sqlx::Error> {
        sqlx::query_as::<_, TimeOpenSummary>(
            "SELECT MIN(time_open_secs) AS min_secs,
                    MAX(time_open_secs) AS max_secs,
                    AVG(time_open_secs)::double precision AS avg_secs
             FROM todos
             WHERE completed = TRUE",
        )
        .fetch_one(pool)
        .await
    }
}
