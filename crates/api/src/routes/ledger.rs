//! Monthly ledger routes: fork-on-read, scoped item mutation, status.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::response::{ApiError, ApiResult};
use crate::routes::{parse_month, parse_section};
use fintrack_core::ledger::{
    LedgerItemPatch, LedgerSnapshot, LedgerStatus, MonthlyTotals, NewLedgerItem, compute_totals,
};
use fintrack_db::repositories::{LedgerRepository, SettingsRepository};

/// Creates the monthly ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ledger/{month}", get(get_ledger))
        .route("/ledger/{month}/status", put(set_status))
        .route("/ledger/{month}/{section}/items", post(add_item))
        .route(
            "/ledger/{month}/{section}/items/{item_id}",
            put(update_item).delete(remove_item),
        )
}

/// A ledger read plus everything derived from it on this request.
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    /// The ledger with its items.
    pub ledger: LedgerSnapshot,
    /// Live sum of the month's incidental daily expenses.
    pub daily_expenses_total: Decimal,
    /// Totals computed from the items and the daily total.
    pub totals: MonthlyTotals,
}

/// Request body for updating the ledger status.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// New lifecycle status.
    pub status: LedgerStatus,
}

async fn ledger_response(
    state: &AppState,
    user_id: Uuid,
    ledger: LedgerSnapshot,
    daily_expenses_total: Decimal,
) -> ApiResult<LedgerResponse> {
    let rates = SettingsRepository::new((*state.db).clone())
        .rate_table(user_id)
        .await?;
    let totals = compute_totals(
        &ledger.incomes,
        &ledger.expenses,
        &ledger.investments,
        daily_expenses_total,
        &rates,
    );
    Ok(LedgerResponse {
        ledger,
        daily_expenses_total,
        totals,
    })
}

/// GET `/ledger/{month}` - Read the month's ledger, forking it on first read.
async fn get_ledger(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(month): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let month = parse_month(&month)?;
    let repo = LedgerRepository::new((*state.db).clone());

    let read = repo
        .get_or_create(auth.user_id(), month, Utc::now().date_naive())
        .await?;
    let response =
        ledger_response(&state, auth.user_id(), read.ledger, read.daily_expenses_total).await?;

    Ok(Json(response))
}

/// PUT `/ledger/{month}/status` - Mark the ledger draft or finalized.
async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(month): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    let month = parse_month(&month)?;
    let repo = LedgerRepository::new((*state.db).clone());

    let ledger = repo
        .set_status(auth.user_id(), month, payload.status)
        .await?;
    info!(user_id = %auth.user_id(), %month, status = ?payload.status, "ledger status updated");

    let daily = daily_total(&state, auth.user_id(), month).await?;
    Ok(Json(ledger_response(&state, auth.user_id(), ledger, daily).await?))
}

/// POST `/ledger/{month}/{section}/items` - Append an ad-hoc item.
async fn add_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((month, section)): Path<(String, String)>,
    Json(payload): Json<NewLedgerItem>,
) -> ApiResult<impl IntoResponse> {
    let month = parse_month(&month)?;
    let section = parse_section(&section)?;
    payload.validate().map_err(ApiError::from)?;

    let repo = LedgerRepository::new((*state.db).clone());
    let ledger = repo
        .add_item(auth.user_id(), month, section, &payload)
        .await?;
    info!(user_id = %auth.user_id(), %month, %section, name = %payload.name, "ledger item added");

    let daily = daily_total(&state, auth.user_id(), month).await?;
    let response = ledger_response(&state, auth.user_id(), ledger, daily).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT `/ledger/{month}/{section}/items/{item_id}` - Patch one item.
async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((month, section, item_id)): Path<(String, String, Uuid)>,
    Json(payload): Json<LedgerItemPatch>,
) -> ApiResult<impl IntoResponse> {
    let month = parse_month(&month)?;
    let section = parse_section(&section)?;

    let repo = LedgerRepository::new((*state.db).clone());
    let ledger = repo
        .update_item(auth.user_id(), month, section, item_id, &payload)
        .await?;

    let daily = daily_total(&state, auth.user_id(), month).await?;
    Ok(Json(ledger_response(&state, auth.user_id(), ledger, daily).await?))
}

/// DELETE `/ledger/{month}/{section}/items/{item_id}` - Remove one item.
///
/// Removing an already-absent item is a no-op; the response is the current
/// ledger either way.
async fn remove_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((month, section, item_id)): Path<(String, String, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    let month = parse_month(&month)?;
    let section = parse_section(&section)?;

    let repo = LedgerRepository::new((*state.db).clone());
    let ledger = repo
        .remove_item(auth.user_id(), month, section, item_id)
        .await?;

    let daily = daily_total(&state, auth.user_id(), month).await?;
    Ok(Json(ledger_response(&state, auth.user_id(), ledger, daily).await?))
}

async fn daily_total(
    state: &AppState,
    user_id: Uuid,
    month: fintrack_shared::Month,
) -> ApiResult<Decimal> {
    let repo = fintrack_db::repositories::DailyExpenseRepository::new((*state.db).clone());
    Ok(repo
        .month_total(user_id, month, Utc::now().date_naive())
        .await?)
}
