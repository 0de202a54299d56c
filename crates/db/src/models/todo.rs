//! Todo entity model and write DTOs.
//!
//! The write DTOs are built by the service layer, which owns the
//! lifecycle rules: `created_at` and the completion stamp are always
//! supplied explicitly, never defaulted inside the store.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::types::{DbId, Timestamp};

/// Priority of a todo, stored as uppercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// A row from the `todos` table.
///
/// `completed_at` and `time_open_secs` are absent until the todo is
/// completed for the first time, then permanent.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub time_open_secs: Option<i64>,
    pub priority: Priority,
    pub category_id: DbId,
}

/// Insert DTO for a new todo. The row always starts open.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category_id: DbId,
    pub created_at: Timestamp,
}

/// Update DTO for an existing todo.
///
/// `title`, `description`, `completed`, and `priority` overwrite the row
/// unconditionally. `category_id` is applied only when present. The stamp
/// fields are applied set-if-absent: an existing `completed_at` /
/// `time_open_secs` pair is never overwritten.
#[derive(Debug, Clone)]
pub struct TodoChanges {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub category_id: Option<DbId>,
    pub completed_at: Option<Timestamp>,
    pub time_open_secs: Option<i64>,
}
