//! Postgres enum types used by the entities, with conversions to and from
//! the pure domain enums in `fintrack-core`.

use fintrack_core::ledger as domain;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ledger item section discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ledger_section")]
pub enum LedgerSection {
    /// Income items.
    #[sea_orm(string_value = "incomes")]
    Incomes,
    /// Expense items.
    #[sea_orm(string_value = "expenses")]
    Expenses,
    /// Investment items.
    #[sea_orm(string_value = "investments")]
    Investments,
}

/// Ledger lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ledger_status")]
pub enum LedgerStatus {
    /// Open for edits.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Marked final by the user.
    #[sea_orm(string_value = "finalized")]
    Finalized,
}

/// Income classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "income_kind")]
pub enum IncomeKind {
    /// Regular salary.
    #[sea_orm(string_value = "salary")]
    Salary,
    /// Freelance or contract income.
    #[sea_orm(string_value = "freelance")]
    Freelance,
    /// Recurring equity vesting, usually foreign-currency.
    #[sea_orm(string_value = "recurring-equity-vesting")]
    RecurringEquityVesting,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Investment contribution style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "investment_kind")]
pub enum InvestmentKind {
    /// Systematic investment plan.
    #[sea_orm(string_value = "systematic")]
    Systematic,
    /// One-off voluntary contribution.
    #[sea_orm(string_value = "voluntary")]
    Voluntary,
}

/// Whether an investment is still being contributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "investment_status")]
pub enum InvestmentStatus {
    /// Contributions ongoing.
    #[sea_orm(string_value = "active")]
    Active,
    /// Contributions stopped.
    #[sea_orm(string_value = "stopped")]
    Stopped,
}

impl From<domain::Section> for LedgerSection {
    fn from(value: domain::Section) -> Self {
        match value {
            domain::Section::Incomes => Self::Incomes,
            domain::Section::Expenses => Self::Expenses,
            domain::Section::Investments => Self::Investments,
        }
    }
}

impl From<LedgerSection> for domain::Section {
    fn from(value: LedgerSection) -> Self {
        match value {
            LedgerSection::Incomes => Self::Incomes,
            LedgerSection::Expenses => Self::Expenses,
            LedgerSection::Investments => Self::Investments,
        }
    }
}

impl From<domain::LedgerStatus> for LedgerStatus {
    fn from(value: domain::LedgerStatus) -> Self {
        match value {
            domain::LedgerStatus::Draft => Self::Draft,
            domain::LedgerStatus::Finalized => Self::Finalized,
        }
    }
}

impl From<LedgerStatus> for domain::LedgerStatus {
    fn from(value: LedgerStatus) -> Self {
        match value {
            LedgerStatus::Draft => Self::Draft,
            LedgerStatus::Finalized => Self::Finalized,
        }
    }
}

impl From<domain::IncomeKind> for IncomeKind {
    fn from(value: domain::IncomeKind) -> Self {
        match value {
            domain::IncomeKind::Salary => Self::Salary,
            domain::IncomeKind::Freelance => Self::Freelance,
            domain::IncomeKind::RecurringEquityVesting => Self::RecurringEquityVesting,
            domain::IncomeKind::Other => Self::Other,
        }
    }
}

impl From<IncomeKind> for domain::IncomeKind {
    fn from(value: IncomeKind) -> Self {
        match value {
            IncomeKind::Salary => Self::Salary,
            IncomeKind::Freelance => Self::Freelance,
            IncomeKind::RecurringEquityVesting => Self::RecurringEquityVesting,
            IncomeKind::Other => Self::Other,
        }
    }
}

impl From<domain::InvestmentKind> for InvestmentKind {
    fn from(value: domain::InvestmentKind) -> Self {
        match value {
            domain::InvestmentKind::Systematic => Self::Systematic,
            domain::InvestmentKind::Voluntary => Self::Voluntary,
        }
    }
}

impl From<InvestmentKind> for domain::InvestmentKind {
    fn from(value: InvestmentKind) -> Self {
        match value {
            InvestmentKind::Systematic => Self::Systematic,
            InvestmentKind::Voluntary => Self::Voluntary,
        }
    }
}

impl From<domain::InvestmentStatus> for InvestmentStatus {
    fn from(value: domain::InvestmentStatus) -> Self {
        match value {
            domain::InvestmentStatus::Active => Self::Active,
            domain::InvestmentStatus::Stopped => Self::Stopped,
        }
    }
}

impl From<InvestmentStatus> for domain::InvestmentStatus {
    fn from(value: InvestmentStatus) -> Self {
        match value {
            InvestmentStatus::Active => Self::Active,
            InvestmentStatus::Stopped => Self::Stopped,
        }
    }
}
