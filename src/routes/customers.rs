use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::models::{Customer, CustomerDetail};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CustomerPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

/// Required fields extracted from a create/update payload, with the
/// optional ones defaulted to empty strings.
struct CustomerFields {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    company: String,
}

fn validate(payload: CustomerPayload) -> Result<CustomerFields, AppError> {
    let required = |field: Option<String>| field.filter(|s| !s.is_empty());

    match (
        required(payload.first_name),
        required(payload.last_name),
        required(payload.email),
    ) {
        (Some(first_name), Some(last_name), Some(email)) => Ok(CustomerFields {
            first_name,
            last_name,
            email,
            phone: payload.phone.unwrap_or_default(),
            company: payload.company.unwrap_or_default(),
        }),
        _ => Err(AppError::BadRequest("Missing required fields".to_string())),
    }
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = db::customers::list(&state.pool).await?;
    Ok(Json(customers))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerDetail>, AppError> {
    let customer = db::customers::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;
    let notes = db::notes::list_by_customer(&state.pool, id).await?;

    Ok(Json(CustomerDetail { customer, notes }))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let fields = validate(payload)?;

    // Fast-path check for a friendly error. The UNIQUE constraint below is
    // what actually guards against concurrent duplicates.
    if db::customers::find_by_email(&state.pool, &fields.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Email already exists".to_string()));
    }

    let customer = db::customers::create(
        &state.pool,
        &fields.first_name,
        &fields.last_name,
        &fields.email,
        &fields.phone,
        &fields.company,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::BadRequest("Email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::debug!(customer_id = customer.id, "customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<Customer>, AppError> {
    db::customers::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    let fields = validate(payload)?;

    // Self-match is fine; only another customer holding the email conflicts.
    if db::customers::find_by_email_excluding(&state.pool, &fields.email, id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Email already exists".to_string()));
    }

    let customer = db::customers::update(
        &state.pool,
        id,
        &fields.first_name,
        &fields.last_name,
        &fields.email,
        &fields.phone,
        &fields.company,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Customer not found".to_string()),
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::BadRequest("Email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    Ok(Json(customer))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = db::customers::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Customer not found".to_string()));
    }

    tracing::debug!(customer_id = id, "customer deleted");
    Ok(Json(
        serde_json::json!({ "message": "Customer deleted successfully" }),
    ))
}
