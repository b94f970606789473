//! Repository layer for data access.

pub mod daily_expense;
pub mod expense;
pub mod income;
pub mod investment;
pub mod ledger;
pub mod settings;

pub use daily_expense::{CreateDailyExpenseInput, DailyExpenseRepository};
pub use expense::{
    CreateRecurringExpenseInput, RecurringExpenseRepository, UpdateRecurringExpenseInput,
};
pub use income::{
    CreateIncomeSourceInput, IncomeSourceRepository, TemplateError, UpdateIncomeSourceInput,
};
pub use investment::{CreateInvestmentInput, InvestmentRepository, UpdateInvestmentInput};
pub use ledger::{LedgerError, LedgerRead, LedgerRepository};
pub use settings::{SettingsError, SettingsRepository};
