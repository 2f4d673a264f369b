use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub customer_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
