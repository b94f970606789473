//! API route definitions.

use axum::Router;

use crate::AppState;
use crate::response::ApiError;
use fintrack_core::ledger::Section;
use fintrack_shared::{AppError, Month};

pub mod daily_expenses;
pub mod dashboard;
pub mod expenses;
pub mod health;
pub mod incomes;
pub mod investments;
pub mod ledger;
pub mod settings;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(ledger::routes())
        .merge(dashboard::routes())
        .merge(incomes::routes())
        .merge(expenses::routes())
        .merge(investments::routes())
        .merge(daily_expenses::routes())
        .merge(settings::routes())
}

/// Parses a `YYYY-MM` path segment, rejecting malformed tokens with 400.
pub(crate) fn parse_month(raw: &str) -> Result<Month, ApiError> {
    raw.parse()
        .map_err(|e: fintrack_shared::types::MonthParseError| {
            ApiError(AppError::Validation(e.to_string()))
        })
}

/// Parses a ledger section path segment, rejecting unknown names with 400.
pub(crate) fn parse_section(raw: &str) -> Result<Section, ApiError> {
    raw.parse().map_err(ApiError::from)
}
