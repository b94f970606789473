//! Income source template routes.
//!
//! Template edits only affect months that have not forked yet; existing
//! ledgers keep their copies.

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
use fintrack_core::ledger::IncomeKind;
use fintrack_db::repositories::{
    CreateIncomeSourceInput, IncomeSourceRepository, UpdateIncomeSourceInput,
};
use fintrack_shared::AppError;

/// Creates the income source routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/income-sources", get(list).post(create))
        .route("/income-sources/{id}", put(update).delete(delete))
}

/// Query parameters for listing income sources.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Include soft-deleted templates.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Query parameters for deleting an income source.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    /// Hard-delete instead of deactivating.
    #[serde(default)]
    pub hard: bool,
}

/// Request body for creating an income source.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Display name.
    pub name: String,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// ISO currency code; defaults to the base currency.
    pub currency: Option<String>,
    /// Income classification; defaults to `other`.
    pub kind: Option<IncomeKind>,
    /// Taxable flag; defaults to false.
    #[serde(default)]
    pub taxable: bool,
    /// Tax rate in percent.
    pub tax_rate: Option<Decimal>,
}

/// Request body for updating an income source.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    /// New display name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New currency code.
    pub currency: Option<String>,
    /// New classification.
    pub kind: Option<IncomeKind>,
    /// New taxable flag.
    pub taxable: Option<bool>,
    /// New tax rate.
    pub tax_rate: Option<Decimal>,
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError(AppError::Validation(
            "Name must not be empty".to_string(),
        )));
    }
    Ok(())
}

/// GET `/income-sources` - List the caller's income sources.
async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let repo = IncomeSourceRepository::new((*state.db).clone());
    let sources = repo.list(auth.user_id(), query.include_inactive).await?;
    Ok(Json(sources))
}

/// POST `/income-sources` - Create an income source.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_name(&payload.name)?;

    let repo = IncomeSourceRepository::new((*state.db).clone());
    let source = repo
        .create(
            auth.user_id(),
            CreateIncomeSourceInput {
                name: payload.name,
                amount: payload.amount,
                currency: payload.currency,
                kind: payload.kind.unwrap_or(IncomeKind::Other),
                taxable: payload.taxable,
                tax_rate: payload.tax_rate,
            },
        )
        .await?;
    info!(user_id = %auth.user_id(), id = %source.id, "income source created");

    Ok((StatusCode::CREATED, Json(source)))
}

/// PUT `/income-sources/{id}` - Update an income source.
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequest>,
) -> ApiResult<impl IntoResponse> {
    if let Some(name) = &payload.name {
        validate_name(name)?;
    }

    let repo = IncomeSourceRepository::new((*state.db).clone());
    let source = repo
        .update(
            auth.user_id(),
            id,
            UpdateIncomeSourceInput {
                name: payload.name,
                amount: payload.amount,
                currency: payload.currency,
                kind: payload.kind,
                taxable: payload.taxable,
                tax_rate: payload.tax_rate,
            },
        )
        .await?;

    Ok(Json(source))
}

/// DELETE `/income-sources/{id}` - Deactivate (or hard-delete) an income source.
async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<impl IntoResponse> {
    let repo = IncomeSourceRepository::new((*state.db).clone());
    if query.hard {
        repo.delete(auth.user_id(), id).await?;
    } else {
        repo.deactivate(auth.user_id(), id).await?;
    }
    info!(user_id = %auth.user_id(), %id, hard = query.hard, "income source deleted");

    Ok(StatusCode::NO_CONTENT)
}
