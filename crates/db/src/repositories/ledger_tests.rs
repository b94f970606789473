//! Unit tests for the fork-time copy, ad-hoc item, and patch builders.
//!
//! Database-backed behavior (fork race, divergence, section isolation) is
//! covered by the integration tests in `tests/`.

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

use fintrack_core::ledger::{
    IncomeKind, InvestmentKind, InvestmentStatus, LedgerItemPatch, NewLedgerItem, Section,
};

use super::{ad_hoc_item, expense_item, income_copy, income_item, patch_model};
use crate::entities::{income_sources, ledger_items, sea_orm_active_enums};

fn income_template(user_id: Uuid) -> income_sources::Model {
    income_sources::Model {
        id: Uuid::new_v4(),
        user_id,
        name: "RSU vesting".to_string(),
        amount: dec!(500),
        currency: "USD".to_string(),
        kind: sea_orm_active_enums::IncomeKind::RecurringEquityVesting,
        taxable: true,
        tax_rate: Some(dec!(30)),
        is_active: true,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

#[test]
fn test_income_copy_preserves_fields_and_records_provenance() {
    let template = income_template(Uuid::new_v4());
    let ledger_id = Uuid::new_v4();

    let copy = income_copy(ledger_id, &template, Utc::now().into());

    assert_eq!(copy.ledger_id, Set(ledger_id));
    assert_eq!(copy.section, Set(sea_orm_active_enums::LedgerSection::Incomes));
    assert_eq!(copy.source_id, Set(Some(template.id)));
    assert_eq!(copy.name, Set("RSU vesting".to_string()));
    assert_eq!(copy.amount, Set(dec!(500)));
    assert_eq!(copy.currency, Set(Some("USD".to_string())));
    assert_eq!(
        copy.income_kind,
        Set(Some(sea_orm_active_enums::IncomeKind::RecurringEquityVesting))
    );
    // Variant columns of other sections stay empty.
    assert_eq!(copy.category, Set(None));
    assert_eq!(copy.investment_kind, Set(None));
}

#[test]
fn test_ad_hoc_item_has_no_provenance_and_applies_section_defaults() {
    let input = NewLedgerItem {
        name: "Cab rides".to_string(),
        amount: dec!(1200),
        ..NewLedgerItem::default()
    };

    let expense = ad_hoc_item(Uuid::new_v4(), Section::Expenses, &input, Utc::now().into());
    assert_eq!(expense.source_id, Set(None));
    assert_eq!(expense.category, Set(Some("general".to_string())));
    assert_eq!(expense.is_recurring, Set(Some(false)));
    assert_eq!(expense.currency, Set(None));

    let income = ad_hoc_item(Uuid::new_v4(), Section::Incomes, &input, Utc::now().into());
    assert_eq!(income.currency, Set(Some("INR".to_string())));
    assert_eq!(
        income.income_kind,
        Set(Some(sea_orm_active_enums::IncomeKind::Other))
    );

    let investment = ad_hoc_item(
        Uuid::new_v4(),
        Section::Investments,
        &input,
        Utc::now().into(),
    );
    assert_eq!(
        investment.investment_kind,
        Set(Some(sea_orm_active_enums::InvestmentKind::Voluntary))
    );
    assert_eq!(
        investment.investment_status,
        Set(Some(sea_orm_active_enums::InvestmentStatus::Active))
    );
}

#[test]
fn test_ad_hoc_item_honors_explicit_fields() {
    let input = NewLedgerItem {
        name: "Consulting".to_string(),
        amount: dec!(2000),
        currency: Some("USD".to_string()),
        kind: Some(IncomeKind::Freelance),
        taxable: Some(true),
        ..NewLedgerItem::default()
    };

    let item = ad_hoc_item(Uuid::new_v4(), Section::Incomes, &input, Utc::now().into());
    assert_eq!(item.currency, Set(Some("USD".to_string())));
    assert_eq!(
        item.income_kind,
        Set(Some(sea_orm_active_enums::IncomeKind::Freelance))
    );
    assert_eq!(item.taxable, Set(Some(true)));
}

#[test]
fn test_patch_model_only_sets_present_fields() {
    let patch = LedgerItemPatch {
        amount: Some(dec!(999)),
        ..LedgerItemPatch::default()
    };

    let model = patch_model(&patch);
    assert_eq!(model.amount, Set(dec!(999)));
    assert!(model.name.is_not_set());
    assert!(model.currency.is_not_set());
    assert!(model.category.is_not_set());
    assert!(model.investment_status.is_not_set());
    // source_id is not patchable at all.
    assert!(model.source_id.is_not_set());
    assert!(model.updated_at.is_set());
}

#[test]
fn test_patch_model_maps_enum_fields() {
    let patch = LedgerItemPatch {
        investment_kind: Some(InvestmentKind::Systematic),
        investment_status: Some(InvestmentStatus::Stopped),
        ..LedgerItemPatch::default()
    };

    let model = patch_model(&patch);
    assert_eq!(
        model.investment_kind,
        Set(Some(sea_orm_active_enums::InvestmentKind::Systematic))
    );
    assert_eq!(
        model.investment_status,
        Set(Some(sea_orm_active_enums::InvestmentStatus::Stopped))
    );
}

#[test]
fn test_row_mapping_defaults_for_sparse_rows() {
    let row = ledger_items::Model {
        id: Uuid::new_v4(),
        ledger_id: Uuid::new_v4(),
        section: sea_orm_active_enums::LedgerSection::Incomes,
        source_id: None,
        name: "Sparse".to_string(),
        amount: dec!(10),
        currency: None,
        income_kind: None,
        taxable: None,
        tax_rate: None,
        category: None,
        is_recurring: None,
        platform: None,
        investment_kind: None,
        investment_status: None,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    };

    let income = income_item(row.clone());
    assert_eq!(income.currency, "INR");
    assert_eq!(income.kind, IncomeKind::Other);
    assert!(!income.taxable);

    let expense = expense_item(row);
    assert_eq!(expense.category, "general");
    assert!(!expense.is_recurring);
}
