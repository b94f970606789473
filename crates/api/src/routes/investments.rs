//! Investment template routes.

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
use fintrack_core::ledger::{InvestmentKind, InvestmentStatus};
use fintrack_db::repositories::{
    CreateInvestmentInput, InvestmentRepository, UpdateInvestmentInput,
};
use fintrack_shared::AppError;

/// Creates the investment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/investments", get(list).post(create))
        .route("/investments/{id}", put(update).delete(delete))
}

/// Query parameters for listing investments.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Include soft-deleted templates.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Query parameters for deleting an investment.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    /// Hard-delete instead of deactivating.
    #[serde(default)]
    pub hard: bool,
}

/// Request body for creating an investment.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Display name.
    pub name: String,
    /// Monthly contribution amount.
    pub amount: Decimal,
    /// Broker or platform.
    pub platform: Option<String>,
    /// Contribution style; defaults to `voluntary`.
    pub kind: Option<InvestmentKind>,
}

/// Request body for updating an investment.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    /// New display name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New platform.
    pub platform: Option<String>,
    /// New contribution style.
    pub kind: Option<InvestmentKind>,
    /// New status; `stopped` excludes the investment from totals.
    pub status: Option<InvestmentStatus>,
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError(AppError::Validation(
            "Name must not be empty".to_string(),
        )));
    }
    Ok(())
}

/// GET `/investments` - List the caller's investments.
async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let repo = InvestmentRepository::new((*state.db).clone());
    let investments = repo.list(auth.user_id(), query.include_inactive).await?;
    Ok(Json(investments))
}

/// POST `/investments` - Create an investment.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_name(&payload.name)?;

    let repo = InvestmentRepository::new((*state.db).clone());
    let investment = repo
        .create(
            auth.user_id(),
            CreateInvestmentInput {
                name: payload.name,
                amount: payload.amount,
                platform: payload.platform,
                kind: payload.kind.unwrap_or(InvestmentKind::Voluntary),
            },
        )
        .await?;
    info!(user_id = %auth.user_id(), id = %investment.id, "investment created");

    Ok((StatusCode::CREATED, Json(investment)))
}

/// PUT `/investments/{id}` - Update an investment.
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequest>,
) -> ApiResult<impl IntoResponse> {
    if let Some(name) = &payload.name {
        validate_name(name)?;
    }

    let repo = InvestmentRepository::new((*state.db).clone());
    let investment = repo
        .update(
            auth.user_id(),
            id,
            UpdateInvestmentInput {
                name: payload.name,
                amount: payload.amount,
                platform: payload.platform,
                kind: payload.kind,
                status: payload.status,
            },
        )
        .await?;

    Ok(Json(investment))
}

/// DELETE `/investments/{id}` - Deactivate (or hard-delete) an investment.
async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<impl IntoResponse> {
    let repo = InvestmentRepository::new((*state.db).clone());
    if query.hard {
        repo.delete(auth.user_id(), id).await?;
    } else {
        repo.deactivate(auth.user_id(), id).await?;
    }
    info!(user_id = %auth.user_id(), %id, hard = query.hard, "investment deleted");

    Ok(StatusCode::NO_CONTENT)
}
