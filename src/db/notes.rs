use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::Note;

pub async fn list_by_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> Result<Vec<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        "SELECT * FROM notes WHERE customer_id = ? ORDER BY created_at, id",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &SqlitePool,
    customer_id: i64,
    content: &str,
) -> Result<Note, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        "INSERT INTO notes (customer_id, content, created_at) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(customer_id)
    .bind(content)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
