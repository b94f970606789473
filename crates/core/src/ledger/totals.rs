//! Monthly total aggregation.
//!
//! Totals are computed from ledger items (or template-derived items, see
//! [`super::effective`]) plus the live daily-expense total for the month.
//! Nothing here is persisted; every read recomputes from current state.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::currency::RateTable;

use super::types::{ExpenseItem, IncomeItem, IncomeKind, InvestmentItem, InvestmentStatus,
    InvestmentKind};

/// Computed totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// Income converted into the base currency.
    pub total_income: Decimal,
    /// All ledger expense items, recurring and one-off alike.
    pub total_expenses: Decimal,
    /// Systematic investment contributions.
    pub total_sips: Decimal,
    /// Voluntary investment contributions.
    pub total_voluntary_investments: Decimal,
    /// Live total of incidental daily expenses for the month.
    pub daily_expenses_total: Decimal,
    /// What is left after everything above. May be negative.
    pub remaining: Decimal,
}

/// Income contribution in the base currency.
///
/// Equity-vesting income denominated in a foreign currency is converted at
/// the current rate; everything else counts at face value.
fn income_in_base_currency(item: &IncomeItem, rates: &RateTable) -> Decimal {
    if item.kind == IncomeKind::RecurringEquityVesting && item.currency != rates.base_currency() {
        item.amount * rates.rate_for(&item.currency)
    } else {
        item.amount
    }
}

/// Computes the month's totals.
///
/// Stopped investments are skipped even though the fork only copies active
/// templates: ad-hoc or edited items can carry any status.
#[must_use]
pub fn compute_totals(
    incomes: &[IncomeItem],
    expenses: &[ExpenseItem],
    investments: &[InvestmentItem],
    daily_expenses_total: Decimal,
    rates: &RateTable,
) -> MonthlyTotals {
    let total_income: Decimal = incomes
        .iter()
        .map(|item| income_in_base_currency(item, rates))
        .sum();

    let total_expenses: Decimal = expenses.iter().map(|item| item.amount).sum();

    let active_investments = || {
        investments
            .iter()
            .filter(|item| item.status == InvestmentStatus::Active)
    };
    let total_sips: Decimal = active_investments()
        .filter(|item| item.kind == InvestmentKind::Systematic)
        .map(|item| item.amount)
        .sum();
    let total_voluntary_investments: Decimal = active_investments()
        .filter(|item| item.kind == InvestmentKind::Voluntary)
        .map(|item| item.amount)
        .sum();

    let remaining = total_income
        - total_expenses
        - total_sips
        - total_voluntary_investments
        - daily_expenses_total;

    MonthlyTotals {
        total_income,
        total_expenses,
        total_sips,
        total_voluntary_investments,
        daily_expenses_total,
        remaining,
    }
}

#[cfg(test)]
#[path = "totals_tests.rs"]
mod tests;
