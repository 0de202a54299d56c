//! Aggregate statistics shapes (computed, not DB rows).

use serde::Serialize;
use sqlx::FromRow;

use super::todo::Priority;

/// Number of todos in one category. Only categories with at least one
/// todo appear in the result set.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CategoryTodoCount {
    pub category_name: String,
    pub todo_count: i64,
}

/// Average time-open of one category's completed todos. Categories with
/// no completed todo do not appear.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CategoryTimeOpenAverage {
    pub category_name: String,
    pub avg_time_open_secs: f64,
}

/// Number of open todos at one priority. Only priorities present among
/// open todos appear.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct OpenPriorityCount {
    pub priority: Priority,
    pub open_count: i64,
}

/// Min/max/avg time-open across all completed todos. All fields are
/// absent (not zero) when no completed todo exists.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TimeOpenSummary {
    pub min_secs: Option<i64>,
    pub max_secs: Option<i64>,
    pub avg_secs: Option<f64>,
}
