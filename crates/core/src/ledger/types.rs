//! Ledger item types and mutation inputs.

use fintrack_shared::{AppError, AppResult, Month};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three item sections of a monthly ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Income items.
    Incomes,
    /// Expense items.
    Expenses,
    /// Investment items.
    Investments,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Incomes => "incomes",
            Self::Expenses => "expenses",
            Self::Investments => "investments",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Section {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incomes" => Ok(Self::Incomes),
            "expenses" => Ok(Self::Expenses),
            "investments" => Ok(Self::Investments),
            other => Err(AppError::Validation(format!(
                "Unknown ledger section '{other}' (expected incomes, expenses, or investments)"
            ))),
        }
    }
}

/// Ledger lifecycle status.
///
/// `Finalized` is recorded for display but does not currently block item
/// mutation; mutators only log a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerStatus {
    /// Open for edits.
    Draft,
    /// Marked final by the user.
    Finalized,
}

/// Classification of an income source or income item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncomeKind {
    /// Regular salary.
    Salary,
    /// Freelance or contract income.
    Freelance,
    /// Recurring equity vesting, usually paid in a foreign currency.
    RecurringEquityVesting,
    /// Anything else.
    Other,
}

/// Investment contribution style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentKind {
    /// Systematic investment plan (fixed recurring contribution).
    Systematic,
    /// One-off voluntary contribution.
    Voluntary,
}

/// Whether an investment is still being contributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    /// Contributions ongoing.
    Active,
    /// Contributions stopped; excluded from totals.
    Stopped,
}

/// An income item inside a monthly ledger.
///
/// A value copy of an income source at fork time, or an ad-hoc addition.
/// `source_id` is provenance only: it is never dereferenced automatically
/// and carries no lifecycle coupling to the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeItem {
    /// Identity within the ledger.
    pub id: Uuid,
    /// Originating template, or `None` for ad-hoc items.
    pub source_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// ISO currency code the amount is denominated in.
    pub currency: String,
    /// Income classification.
    pub kind: IncomeKind,
    /// Whether this income is taxable.
    pub taxable: bool,
    /// Tax rate in percent, when known.
    pub tax_rate: Option<Decimal>,
}

/// An expense item inside a monthly ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    /// Identity within the ledger.
    pub id: Uuid,
    /// Originating template, or `None` for ad-hoc items.
    pub source_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Amount in the user's base currency.
    pub amount: Decimal,
    /// Spending category.
    pub category: String,
    /// Whether the expense recurs month over month.
    pub is_recurring: bool,
}

/// An investment item inside a monthly ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentItem {
    /// Identity within the ledger.
    pub id: Uuid,
    /// Originating template, or `None` for ad-hoc items.
    pub source_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Monthly contribution amount.
    pub amount: Decimal,
    /// Broker or platform, when known.
    pub platform: Option<String>,
    /// Contribution style.
    pub kind: InvestmentKind,
    /// Whether contributions are ongoing.
    pub status: InvestmentStatus,
}

/// A monthly ledger with its three item sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Ledger identity.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Calendar month this ledger covers.
    pub month: Month,
    /// Lifecycle status.
    pub status: LedgerStatus,
    /// Income items.
    pub incomes: Vec<IncomeItem>,
    /// Expense items.
    pub expenses: Vec<ExpenseItem>,
    /// Investment items.
    pub investments: Vec<InvestmentItem>,
}

/// Input for adding an ad-hoc item to a ledger section.
///
/// Name and amount are required; the remaining fields apply to whichever
/// section the item targets and fall back to section defaults when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLedgerItem {
    /// Display name (required, non-empty).
    pub name: String,
    /// Amount (required).
    pub amount: Decimal,
    /// Income: currency code.
    pub currency: Option<String>,
    /// Income: classification.
    pub kind: Option<IncomeKind>,
    /// Income: taxable flag.
    pub taxable: Option<bool>,
    /// Income: tax rate in percent.
    pub tax_rate: Option<Decimal>,
    /// Expense: spending category.
    pub category: Option<String>,
    /// Expense: recurring flag.
    pub is_recurring: Option<bool>,
    /// Investment: platform.
    pub platform: Option<String>,
    /// Investment: contribution style.
    pub investment_kind: Option<InvestmentKind>,
    /// Investment: status.
    pub investment_status: Option<InvestmentStatus>,
}

impl NewLedgerItem {
    /// Checks the required fields before any store access.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Item name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Field-level patch for an existing ledger item.
///
/// Only fields present in the patch are written; everything else keeps its
/// prior value. `source_id` is deliberately not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerItemPatch {
    /// New display name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// Income: new currency code.
    pub currency: Option<String>,
    /// Income: new classification.
    pub kind: Option<IncomeKind>,
    /// Income: new taxable flag.
    pub taxable: Option<bool>,
    /// Income: new tax rate.
    pub tax_rate: Option<Decimal>,
    /// Expense: new category.
    pub category: Option<String>,
    /// Expense: new recurring flag.
    pub is_recurring: Option<bool>,
    /// Investment: new platform.
    pub platform: Option<String>,
    /// Investment: new contribution style.
    pub investment_kind: Option<InvestmentKind>,
    /// Investment: new status.
    pub investment_status: Option<InvestmentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_section_parse_round_trip() {
        for s in ["incomes", "expenses", "investments"] {
            let section: Section = s.parse().unwrap();
            assert_eq!(section.to_string(), s);
        }
        assert!("income".parse::<Section>().is_err());
        assert!("".parse::<Section>().is_err());
    }

    #[test]
    fn test_income_kind_serde_uses_kebab_case() {
        let json = serde_json::to_string(&IncomeKind::RecurringEquityVesting).unwrap();
        assert_eq!(json, "\"recurring-equity-vesting\"");
    }

    #[test]
    fn test_new_item_requires_name() {
        let item = NewLedgerItem {
            name: "  ".to_string(),
            amount: dec!(100),
            ..NewLedgerItem::default()
        };
        assert!(item.validate().is_err());

        let item = NewLedgerItem {
            name: "Groceries".to_string(),
            amount: dec!(100),
            ..NewLedgerItem::default()
        };
        assert!(item.validate().is_ok());
    }
}
