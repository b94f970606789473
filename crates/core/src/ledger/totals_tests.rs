//! Unit and property tests for monthly total aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::currency::RateTable;
use crate::ledger::totals::compute_totals;
use crate::ledger::types::{
    ExpenseItem, IncomeItem, IncomeKind, InvestmentItem, InvestmentKind, InvestmentStatus,
};

fn income(amount: Decimal, currency: &str, kind: IncomeKind) -> IncomeItem {
    IncomeItem {
        id: Uuid::new_v4(),
        source_id: None,
        name: "income".to_string(),
        amount,
        currency: currency.to_string(),
        kind,
        taxable: true,
        tax_rate: None,
    }
}

fn expense(amount: Decimal, is_recurring: bool) -> ExpenseItem {
    ExpenseItem {
        id: Uuid::new_v4(),
        source_id: None,
        name: "expense".to_string(),
        amount,
        category: "general".to_string(),
        is_recurring,
    }
}

fn investment(amount: Decimal, kind: InvestmentKind, status: InvestmentStatus) -> InvestmentItem {
    InvestmentItem {
        id: Uuid::new_v4(),
        source_id: None,
        name: "investment".to_string(),
        amount,
        platform: None,
        kind,
        status,
    }
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_equity_vesting_income_converted_at_configured_rate() {
    // Salary 100000 INR + equity vesting 500 USD at 89 INR/USD.
    let incomes = vec![
        income(dec!(100000), "INR", IncomeKind::Salary),
        income(dec!(500), "USD", IncomeKind::RecurringEquityVesting),
    ];
    let rates = RateTable::new("INR").with_rate("USD", dec!(89));

    let totals = compute_totals(&incomes, &[], &[], Decimal::ZERO, &rates);
    assert_eq!(totals.total_income, dec!(144500));
    assert_eq!(totals.remaining, dec!(144500));
}

#[test]
fn test_rate_lookup_is_live_not_frozen() {
    // The item stores the original foreign-currency amount, so recomputing
    // with an updated rate table changes the total.
    let incomes = vec![income(dec!(500), "USD", IncomeKind::RecurringEquityVesting)];

    let before = compute_totals(
        &incomes,
        &[],
        &[],
        Decimal::ZERO,
        &RateTable::new("INR").with_rate("USD", dec!(89)),
    );
    let after = compute_totals(
        &incomes,
        &[],
        &[],
        Decimal::ZERO,
        &RateTable::new("INR").with_rate("USD", dec!(90)),
    );

    assert_eq!(before.total_income, dec!(44500));
    assert_eq!(after.total_income, dec!(45000));
}

#[test]
fn test_non_vesting_foreign_income_counts_at_face_value() {
    let incomes = vec![income(dec!(500), "USD", IncomeKind::Freelance)];
    let rates = RateTable::new("INR").with_rate("USD", dec!(89));

    let totals = compute_totals(&incomes, &[], &[], Decimal::ZERO, &rates);
    assert_eq!(totals.total_income, dec!(500));
}

#[test]
fn test_vesting_in_base_currency_is_not_converted() {
    let incomes = vec![income(dec!(500), "INR", IncomeKind::RecurringEquityVesting)];
    let totals = compute_totals(&incomes, &[], &[], Decimal::ZERO, &RateTable::new("INR"));
    assert_eq!(totals.total_income, dec!(500));
}

#[test]
fn test_expenses_count_regardless_of_recurring_flag() {
    let expenses = vec![expense(dec!(30000), true), expense(dec!(1200), false)];
    let totals = compute_totals(&[], &expenses, &[], Decimal::ZERO, &RateTable::default());
    assert_eq!(totals.total_expenses, dec!(31200));
}

#[test]
fn test_investments_split_by_kind_and_skip_stopped() {
    let investments = vec![
        investment(dec!(10000), InvestmentKind::Systematic, InvestmentStatus::Active),
        investment(dec!(5000), InvestmentKind::Voluntary, InvestmentStatus::Active),
        investment(dec!(7000), InvestmentKind::Systematic, InvestmentStatus::Stopped),
        investment(dec!(3000), InvestmentKind::Voluntary, InvestmentStatus::Stopped),
    ];
    let totals = compute_totals(&[], &[], &investments, Decimal::ZERO, &RateTable::default());
    assert_eq!(totals.total_sips, dec!(10000));
    assert_eq!(totals.total_voluntary_investments, dec!(5000));
}

#[test]
fn test_remaining_includes_daily_expenses_and_may_go_negative() {
    let incomes = vec![income(dec!(1000), "INR", IncomeKind::Salary)];
    let expenses = vec![expense(dec!(800), true)];
    let investments = vec![investment(
        dec!(300),
        InvestmentKind::Systematic,
        InvestmentStatus::Active,
    )];

    let totals = compute_totals(
        &incomes,
        &expenses,
        &investments,
        dec!(150),
        &RateTable::default(),
    );
    assert_eq!(totals.daily_expenses_total, dec!(150));
    assert_eq!(totals.remaining, dec!(-250));
}

#[test]
fn test_empty_ledger_totals_are_zero() {
    let totals = compute_totals(&[], &[], &[], Decimal::ZERO, &RateTable::default());
    assert_eq!(totals.total_income, Decimal::ZERO);
    assert_eq!(totals.total_expenses, Decimal::ZERO);
    assert_eq!(totals.total_sips, Decimal::ZERO);
    assert_eq!(totals.total_voluntary_investments, Decimal::ZERO);
    assert_eq!(totals.remaining, Decimal::ZERO);
}

// ============================================================================
// Properties
// ============================================================================

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn income_kind_strategy() -> impl Strategy<Value = IncomeKind> {
    prop_oneof![
        Just(IncomeKind::Salary),
        Just(IncomeKind::Freelance),
        Just(IncomeKind::RecurringEquityVesting),
        Just(IncomeKind::Other),
    ]
}

fn income_strategy() -> impl Strategy<Value = IncomeItem> {
    (
        amount_strategy(),
        prop_oneof![Just("INR"), Just("USD"), Just("EUR")],
        income_kind_strategy(),
    )
        .prop_map(|(amount, currency, kind)| income(amount, currency, kind))
}

fn investment_strategy() -> impl Strategy<Value = InvestmentItem> {
    (
        amount_strategy(),
        prop_oneof![Just(InvestmentKind::Systematic), Just(InvestmentKind::Voluntary)],
        prop_oneof![Just(InvestmentStatus::Active), Just(InvestmentStatus::Stopped)],
    )
        .prop_map(|(amount, kind, status)| investment(amount, kind, status))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Remaining always equals the arithmetic identity over the other totals.
    #[test]
    fn prop_remaining_identity(
        incomes in prop::collection::vec(income_strategy(), 0..8),
        expense_amounts in prop::collection::vec(amount_strategy(), 0..8),
        investments in prop::collection::vec(investment_strategy(), 0..8),
        daily in amount_strategy(),
    ) {
        let expenses: Vec<_> = expense_amounts
            .into_iter()
            .map(|a| expense(a, false))
            .collect();
        let rates = RateTable::new("INR").with_rate("USD", dec!(89)).with_rate("EUR", dec!(96));

        let totals = compute_totals(&incomes, &expenses, &investments, daily, &rates);

        prop_assert_eq!(
            totals.remaining,
            totals.total_income
                - totals.total_expenses
                - totals.total_sips
                - totals.total_voluntary_investments
                - totals.daily_expenses_total
        );
    }

    /// Non-negative item amounts never produce negative section totals.
    #[test]
    fn prop_section_totals_non_negative(
        incomes in prop::collection::vec(income_strategy(), 0..8),
        investments in prop::collection::vec(investment_strategy(), 0..8),
    ) {
        let totals = compute_totals(&incomes, &[], &investments, Decimal::ZERO, &RateTable::default());
        prop_assert!(totals.total_income >= Decimal::ZERO);
        prop_assert!(totals.total_sips >= Decimal::ZERO);
        prop_assert!(totals.total_voluntary_investments >= Decimal::ZERO);
    }

    /// Stopped investments contribute to neither investment total.
    #[test]
    fn prop_stopped_investments_never_counted(
        active in prop::collection::vec(investment_strategy(), 0..8),
        stopped_amounts in prop::collection::vec(amount_strategy(), 0..8),
    ) {
        let baseline = compute_totals(&[], &[], &active, Decimal::ZERO, &RateTable::default());

        let mut with_stopped = active.clone();
        with_stopped.extend(stopped_amounts.into_iter().map(|a| {
            investment(a, InvestmentKind::Systematic, InvestmentStatus::Stopped)
        }));
        let totals = compute_totals(&[], &[], &with_stopped, Decimal::ZERO, &RateTable::default());

        prop_assert_eq!(totals.total_sips, baseline.total_sips);
        prop_assert_eq!(totals.total_voluntary_investments, baseline.total_voluntary_investments);
    }
}
