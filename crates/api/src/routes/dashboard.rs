//! Dashboard route: effective-data view of a month without forking.
//!
//! Reads the forked ledger when one exists, otherwise the live templates,
//! and feeds whichever side wins into the same total computation the ledger
//! page uses. Viewing a month here never creates a ledger.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::response::ApiResult;
use crate::routes::parse_month;
use fintrack_core::ledger::{
    EffectiveSource, ExpenseItem, IncomeItem, InvestmentItem, MonthlyTotals, TemplateItems,
    compute_totals, effective,
};
use fintrack_db::repositories::{
    DailyExpenseRepository, IncomeSourceRepository, InvestmentRepository, LedgerRepository,
    RecurringExpenseRepository, SettingsRepository,
};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/{month}", get(get_dashboard))
}

/// Effective month view for the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Whether the data came from a forked ledger or live templates.
    pub source: EffectiveSource,
    /// Income items.
    pub incomes: Vec<IncomeItem>,
    /// Expense items.
    pub expenses: Vec<ExpenseItem>,
    /// Investment items.
    pub investments: Vec<InvestmentItem>,
    /// Live sum of the month's incidental daily expenses.
    pub daily_expenses_total: Decimal,
    /// Totals computed from the effective items.
    pub totals: MonthlyTotals,
}

/// GET `/dashboard/{month}` - Effective view of a month, read-only.
async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(month): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let month = parse_month(&month)?;
    let user_id = auth.user_id();
    let db = (*state.db).clone();

    let ledger = LedgerRepository::new(db.clone())
        .find_snapshot(user_id, month)
        .await?;

    // Templates are only needed for pre-fork months, but the selector
    // decides which side wins.
    let templates = if ledger.is_some() {
        TemplateItems::default()
    } else {
        TemplateItems {
            incomes: IncomeSourceRepository::new(db.clone())
                .active_as_items(user_id)
                .await?,
            expenses: RecurringExpenseRepository::new(db.clone())
                .active_as_items(user_id)
                .await?,
            investments: InvestmentRepository::new(db.clone())
                .active_as_items(user_id)
                .await?,
        }
    };

    let view = effective::select(ledger.as_ref(), &templates);

    let daily_expenses_total = DailyExpenseRepository::new(db.clone())
        .month_total(user_id, month, Utc::now().date_naive())
        .await?;
    let rates = SettingsRepository::new(db).rate_table(user_id).await?;

    let totals = compute_totals(
        view.incomes,
        view.expenses,
        view.investments,
        daily_expenses_total,
        &rates,
    );

    Ok(Json(DashboardResponse {
        source: view.source,
        incomes: view.incomes.to_vec(),
        expenses: view.expenses.to_vec(),
        investments: view.investments.to_vec(),
        daily_expenses_total,
        totals,
    }))
}
