//! Effective-data selection.
//!
//! Reporting surfaces must agree on whether a month has been forked: when a
//! ledger exists its items are authoritative, otherwise the live templates
//! (mapped into item shape by the caller) feed the same total computation.
//! The dashboard and the ledger page both go through this rule.

use serde::Serialize;

use super::types::{ExpenseItem, IncomeItem, InvestmentItem, LedgerSnapshot};

/// Where a month's effective data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveSource {
    /// A forked ledger exists; its items were used.
    Ledger,
    /// No ledger yet; live templates were used.
    Templates,
}

/// Live template entities mapped into ledger-item shape.
///
/// Built in memory for pre-fork months; nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct TemplateItems {
    /// Active income sources as income items.
    pub incomes: Vec<IncomeItem>,
    /// Active recurring expenses as expense items.
    pub expenses: Vec<ExpenseItem>,
    /// Active investments as investment items.
    pub investments: Vec<InvestmentItem>,
}

/// The items that should feed the total aggregator for a month.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveView<'a> {
    /// Income items.
    pub incomes: &'a [IncomeItem],
    /// Expense items.
    pub expenses: &'a [ExpenseItem],
    /// Investment items.
    pub investments: &'a [InvestmentItem],
    /// Which side the items came from.
    pub source: EffectiveSource,
}

/// Selects ledger items when a ledger exists, template items otherwise.
#[must_use]
pub fn select<'a>(
    ledger: Option<&'a LedgerSnapshot>,
    templates: &'a TemplateItems,
) -> EffectiveView<'a> {
    match ledger {
        Some(snapshot) => EffectiveView {
            incomes: &snapshot.incomes,
            expenses: &snapshot.expenses,
            investments: &snapshot.investments,
            source: EffectiveSource::Ledger,
        },
        None => EffectiveView {
            incomes: &templates.incomes,
            expenses: &templates.expenses,
            investments: &templates.investments,
            source: EffectiveSource::Templates,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{IncomeKind, LedgerStatus};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn sample_income(name: &str) -> IncomeItem {
        IncomeItem {
            id: Uuid::new_v4(),
            source_id: None,
            name: name.to_string(),
            amount: dec!(100),
            currency: "INR".to_string(),
            kind: IncomeKind::Salary,
            taxable: true,
            tax_rate: None,
        }
    }

    #[test]
    fn test_forked_month_prefers_ledger() {
        let snapshot = LedgerSnapshot {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            month: "2025-04".parse().unwrap(),
            status: LedgerStatus::Draft,
            incomes: vec![sample_income("ledger salary")],
            expenses: vec![],
            investments: vec![],
        };
        let templates = TemplateItems {
            incomes: vec![sample_income("template salary")],
            ..TemplateItems::default()
        };

        let view = select(Some(&snapshot), &templates);
        assert_eq!(view.source, EffectiveSource::Ledger);
        assert_eq!(view.incomes[0].name, "ledger salary");
    }

    #[test]
    fn test_unforked_month_falls_back_to_templates() {
        let templates = TemplateItems {
            incomes: vec![sample_income("template salary")],
            ..TemplateItems::default()
        };

        let view = select(None, &templates);
        assert_eq!(view.source, EffectiveSource::Templates);
        assert_eq!(view.incomes[0].name, "template salary");
    }
}
