//! Monthly ledger domain model.
//!
//! A monthly ledger is a per-user, per-calendar-month snapshot forked from
//! the user's live recurring templates. After the fork it diverges freely:
//! template edits never reach the ledger and ledger edits never reach the
//! templates. The modules here are pure; persistence lives in `fintrack-db`.

pub mod effective;
pub mod totals;
pub mod types;

pub use effective::{EffectiveSource, EffectiveView, TemplateItems};
pub use totals::{MonthlyTotals, compute_totals};
pub use types::{
    ExpenseItem, IncomeItem, IncomeKind, InvestmentItem, InvestmentKind, InvestmentStatus,
    LedgerItemPatch, LedgerSnapshot, LedgerStatus, NewLedgerItem, Section,
};
