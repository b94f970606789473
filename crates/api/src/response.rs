//! JSON error responses shared by every route.
//!
//! Handlers return [`ApiResult`] and use `?`; the conversions here collapse
//! the repository error enums onto the shared [`AppError`] taxonomy so every
//! failure renders as the same `{"error", "message"}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use fintrack_db::repositories::{LedgerError, SettingsError, TemplateError};
use fintrack_shared::AppError;

/// Result alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper rendering an [`AppError`] as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::LedgerNotFound(_) | LedgerError::ItemNotFound { .. } => {
                Self(AppError::NotFound(e.to_string()))
            }
            LedgerError::Database(db) => {
                error!(error = %db, "ledger operation failed");
                Self(AppError::Database(db.to_string()))
            }
        }
    }
}

impl From<TemplateError> for ApiError {
    fn from(e: TemplateError) -> Self {
        match e {
            TemplateError::NotFound(_) => Self(AppError::NotFound(e.to_string())),
            TemplateError::Database(db) => {
                error!(error = %db, "template operation failed");
                Self(AppError::Database(db.to_string()))
            }
        }
    }
}

impl From<SettingsError> for ApiError {
    fn from(e: SettingsError) -> Self {
        match e {
            SettingsError::Database(db) => {
                error!(error = %db, "settings operation failed");
                Self(AppError::Database(db.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use fintrack_shared::Month;
    use uuid::Uuid;

    #[test]
    fn test_app_error_maps_to_status() {
        let resp = ApiError(AppError::Validation("bad month".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError(AppError::Unauthorized("no header".into())).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_ledger_errors_map_to_not_found() {
        let month: Month = "2025-04".parse().unwrap();

        let resp = ApiError::from(LedgerError::LedgerNotFound(month)).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = ApiError::from(LedgerError::ItemNotFound {
            month,
            section: fintrack_core::ledger::Section::Incomes,
            item_id: Uuid::new_v4(),
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
