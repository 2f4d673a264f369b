use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::models::Note;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateNote {
    pub content: Option<String>,
}

pub async fn create(
    State(state): State<SharedState>,
    Path(customer_id): Path<i64>,
    Json(payload): Json<CreateNote>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    db::customers::find_by_id(&state.pool, customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    let content = payload
        .content
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Note content is required".to_string()))?;

    let note = db::notes::create(&state.pool, customer_id, &content)
        .await
        .map_err(|e| match e {
            // Customer removed between the check and the insert.
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound("Customer not found".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = db::notes::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Note not found".to_string()));
    }

    Ok(Json(
        serde_json::json!({ "message": "Note deleted successfully" }),
    ))
}
