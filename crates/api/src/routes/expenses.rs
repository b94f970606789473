//! Recurring expense template routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::response::{ApiError, ApiResult};
use fintrack_db::repositories::{
    CreateRecurringExpenseInput, RecurringExpenseRepository, UpdateRecurringExpenseInput,
};
use fintrack_shared::AppError;

/// Creates the recurring expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recurring-expenses", get(list).post(create))
        .route("/recurring-expenses/{id}", put(update).delete(delete))
}

/// Query parameters for listing recurring expenses.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Include soft-deleted templates.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Query parameters for deleting a recurring expense.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    /// Hard-delete instead of deactivating.
    #[serde(default)]
    pub hard: bool,
}

/// Request body for creating a recurring expense.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Display name.
    pub name: String,
    /// Monthly amount.
    pub amount: Decimal,
    /// Spending category; defaults to `general`.
    pub category: Option<String>,
}

/// Request body for updating a recurring expense.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    /// New display name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New category.
    pub category: Option<String>,
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError(AppError::Validation(
            "Name must not be empty".to_string(),
        )));
    }
    Ok(())
}

/// GET `/recurring-expenses` - List the caller's recurring expenses.
async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let repo = RecurringExpenseRepository::new((*state.db).clone());
    let expenses = repo.list(auth.user_id(), query.include_inactive).await?;
    Ok(Json(expenses))
}

/// POST `/recurring-expenses` - Create a recurring expense.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_name(&payload.name)?;

    let repo = RecurringExpenseRepository::new((*state.db).clone());
    let expense = repo
        .create(
            auth.user_id(),
            CreateRecurringExpenseInput {
                name: payload.name,
                amount: payload.amount,
                category: payload.category,
            },
        )
        .await?;
    info!(user_id = %auth.user_id(), id = %expense.id, "recurring expense created");

    Ok((StatusCode::CREATED, Json(expense)))
}

/// PUT `/recurring-expenses/{id}` - Update a recurring expense.
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequest>,
) -> ApiResult<impl IntoResponse> {
    if let Some(name) = &payload.name {
        validate_name(name)?;
    }

    let repo = RecurringExpenseRepository::new((*state.db).clone());
    let expense = repo
        .update(
            auth.user_id(),
            id,
            UpdateRecurringExpenseInput {
                name: payload.name,
                amount: payload.amount,
                category: payload.category,
            },
        )
        .await?;

    Ok(Json(expense))
}

/// DELETE `/recurring-expenses/{id}` - Deactivate (or hard-delete) an expense.
async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<impl IntoResponse> {
    let repo = RecurringExpenseRepository::new((*state.db).clone());
    if query.hard {
        repo.delete(auth.user_id(), id).await?;
    } else {
        repo.deactivate(auth.user_id(), id).await?;
    }
    info!(user_id = %auth.user_id(), %id, hard = query.hard, "recurring expense deleted");

    Ok(StatusCode::NO_CONTENT)
}
