//! Daily incidental expense routes.
//!
//! These rows live outside the monthly ledger and are merged into its
//! totals on read; creating one never creates a ledger or a ledger item.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::response::{ApiError, ApiResult};
use crate::routes::parse_month;
use fintrack_db::entities::daily_expenses;
use fintrack_db::repositories::{CreateDailyExpenseInput, DailyExpenseRepository};
use fintrack_shared::AppError;

/// Creates the daily expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/daily-expenses", get(list).post(create))
        .route("/daily-expenses/{id}", axum::routing::delete(delete))
}

/// Query parameters for listing daily expenses.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Month to list, as `YYYY-MM`.
    pub month: String,
}

/// Request body for recording a daily expense.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Calendar day of the expense; defaults to today.
    pub date: Option<NaiveDate>,
    /// Amount spent.
    pub amount: Decimal,
    /// Spending category; defaults to `general`.
    pub category: Option<String>,
    /// Where the money went.
    pub vendor: Option<String>,
}

/// A month of daily expenses plus their windowed total.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Expense rows, newest day first.
    pub expenses: Vec<daily_expenses::Model>,
    /// Sum over the month's effective date window.
    pub total: Decimal,
}

/// GET `/daily-expenses?month=YYYY-MM` - List a month's daily expenses.
async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let month = parse_month(&query.month)?;
    let repo = DailyExpenseRepository::new((*state.db).clone());

    let expenses = repo.list_for_month(auth.user_id(), month).await?;
    let total = repo
        .month_total(auth.user_id(), month, Utc::now().date_naive())
        .await?;

    Ok(Json(ListResponse { expenses, total }))
}

/// POST `/daily-expenses` - Record a daily expense.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.amount <= Decimal::ZERO {
        return Err(ApiError(AppError::Validation(
            "Amount must be positive".to_string(),
        )));
    }

    let repo = DailyExpenseRepository::new((*state.db).clone());
    let expense = repo
        .create(
            auth.user_id(),
            CreateDailyExpenseInput {
                date: payload.date.unwrap_or_else(|| Utc::now().date_naive()),
                amount: payload.amount,
                category: payload.category,
                vendor: payload.vendor,
            },
        )
        .await?;
    info!(user_id = %auth.user_id(), id = %expense.id, date = %expense.date, "daily expense recorded");

    Ok((StatusCode::CREATED, Json(expense)))
}

/// DELETE `/daily-expenses/{id}` - Delete a daily expense.
async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = DailyExpenseRepository::new((*state.db).clone());
    repo.delete(auth.user_id(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}
