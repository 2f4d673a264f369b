use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::Customer;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>(
        "SELECT * FROM customers ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Lookup used by update to allow a customer to keep its own email.
pub async fn find_by_email_excluding(
    pool: &SqlitePool,
    email: &str,
    id: i64,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE email = ? AND id <> ?")
        .bind(email)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &SqlitePool,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    company: &str,
) -> Result<Customer, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Customer>(
        "INSERT INTO customers (first_name, last_name, email, phone, company, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(phone)
    .bind(company)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    company: &str,
) -> Result<Customer, sqlx::Error> {
    sqlx::query_as::<_, Customer>(
        "UPDATE customers SET first_name = ?, last_name = ?, email = ?, phone = ?, company = ?,
         updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(phone)
    .bind(company)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Returns the number of rows removed. Notes go with the customer via
/// the ON DELETE CASCADE foreign key.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM customers WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
