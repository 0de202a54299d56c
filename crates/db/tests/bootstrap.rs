use sqlx::PgPool;

/// Full bootstrap: connect, verify health, re-apply migrations.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    todo_db::health_check(&pool).await.unwrap();

    // Running migrations against an already-migrated database is a no-op.
    todo_db::run_migrations(&pool).await.unwrap();

    for table in ["categories", "todos"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Pool construction from environment configuration.
///
/// Connects to the database named by `DATABASE_URL` (the same variable
/// the test harness itself requires) without touching its schema.
#[tokio::test]
async fn test_connect_from_env() {
    let pool = todo_db::connect_from_env().await.unwrap();
    todo_db::health_check(&pool).await.unwrap();

    let url = std::env::var("DATABASE_URL").unwrap();
    let pool = todo_db::create_pool(&url).await.unwrap();
    todo_db::health_check(&pool).await.unwrap();
}

/// The category-name unique constraint must exist under its documented
/// name; the service layer classifies violations by it.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_name_constraint_exists(pool: PgPool) {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM pg_constraint
         WHERE conname = 'uq_categories_name' AND contype = 'u'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(row.0, 1, "uq_categories_name unique constraint is missing");
}
