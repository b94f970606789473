//! `SeaORM` entity definitions.

pub mod daily_expenses;
pub mod exchange_rates;
pub mod income_sources;
pub mod investments;
pub mod ledger_items;
pub mod monthly_ledgers;
pub mod recurring_expenses;
pub mod sea_orm_active_enums;
pub mod user_settings;
