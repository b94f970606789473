//! User settings and exchange rate routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::response::{ApiError, ApiResult};
use fintrack_db::entities::exchange_rates;
use fintrack_db::repositories::SettingsRepository;
use fintrack_shared::AppError;

/// Creates the settings routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(get_settings).put(update_settings))
        .route("/settings/exchange-rates", get(list_rates))
        .route("/settings/exchange-rates/{code}", put(set_rate))
}

/// Settings view for the caller.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    /// Base currency everything is reported in.
    pub base_currency: String,
    /// Configured per-currency exchange rates.
    pub exchange_rates: Vec<exchange_rates::Model>,
}

/// Request body for updating settings.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    /// New base currency code.
    pub base_currency: String,
}

/// Request body for setting an exchange rate.
#[derive(Debug, Deserialize)]
pub struct SetRateRequest {
    /// Units of base currency per unit of the foreign currency.
    pub rate: Decimal,
}

fn validate_currency_code(code: &str) -> Result<(), ApiError> {
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(ApiError(AppError::Validation(format!(
            "Invalid currency code '{code}': expected a 3-letter ISO code"
        ))));
    }
    Ok(())
}

/// GET `/settings` - The caller's base currency and exchange rates.
async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = SettingsRepository::new((*state.db).clone());
    let base_currency = repo.base_currency(auth.user_id()).await?;
    let exchange_rates = repo.list_rates(auth.user_id()).await?;

    Ok(Json(SettingsResponse {
        base_currency,
        exchange_rates,
    }))
}

/// PUT `/settings` - Update the caller's base currency.
async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateSettingsRequest>,
) -> ApiResult<impl IntoResponse> {
    let code = payload.base_currency.to_uppercase();
    validate_currency_code(&code)?;

    let repo = SettingsRepository::new((*state.db).clone());
    let settings = repo.set_base_currency(auth.user_id(), code).await?;
    info!(user_id = %auth.user_id(), base_currency = %settings.base_currency, "base currency updated");

    Ok(Json(settings))
}

/// GET `/settings/exchange-rates` - List configured exchange rates.
async fn list_rates(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl IntoResponse> {
    let repo = SettingsRepository::new((*state.db).clone());
    let rates = repo.list_rates(auth.user_id()).await?;
    Ok(Json(rates))
}

/// PUT `/settings/exchange-rates/{code}` - Set the rate for one currency.
async fn set_rate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(code): Path<String>,
    Json(payload): Json<SetRateRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_currency_code(&code)?;
    if payload.rate <= Decimal::ZERO {
        return Err(ApiError(AppError::Validation(
            "Exchange rate must be positive".to_string(),
        )));
    }

    let repo = SettingsRepository::new((*state.db).clone());
    let rate = repo.set_rate(auth.user_id(), &code, payload.rate).await?;
    info!(
        user_id = %auth.user_id(),
        currency = %rate.currency_code,
        rate = %rate.rate,
        "exchange rate updated"
    );

    Ok(Json(rate))
}
