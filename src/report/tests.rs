#![allow(clippy::unwrap_used)]

use super::*;
use crate::allocate::add_allocations;
use crate::ledger;
use crate::models::{AllocationCategory, AllocationInputs, Expense};
use rust_decimal_macros::dec;

// ── category_breakdown ────────────────────────────────────────

#[test]
fn test_breakdown_groups_and_omits_empty() {
    let db = Database::open_in_memory().unwrap();
    ledger::add(&db, "food", "2024-05", "2024-05-01", "", "10").unwrap();
    ledger::add(&db, "food", "2024-05", "2024-05-02", "", "15").unwrap();
    ledger::add(&db, "transport", "2024-05", "2024-05-03", "", "5").unwrap();
    ledger::add(&db, "housing", "2024-06", "2024-06-01", "", "800").unwrap();

    let breakdown = category_breakdown(&db, "2024-05").unwrap();
    let expected: BTreeMap<String, Decimal> =
        [("food".to_string(), dec!(25)), ("transport".to_string(), dec!(5))]
            .into_iter()
            .collect();
    assert_eq!(breakdown, expected);
}

#[test]
fn test_breakdown_empty_month() {
    let db = Database::open_in_memory().unwrap();
    assert!(category_breakdown(&db, "2024-05").unwrap().is_empty());
}

// ── budget_vs_savings ─────────────────────────────────────────

#[test]
fn test_budget_vs_savings_current_month() {
    let mut db = Database::open_in_memory().unwrap();
    let inputs = AllocationInputs::new()
        .with(AllocationCategory::Housing, "25")
        .with(AllocationCategory::Food, "10");
    add_allocations(&mut db, "2024-05", dec!(2000), &inputs).unwrap();
    ledger::add(&db, "food", "2024-05", "2024-05-01", "", "150").unwrap();

    let view = budget_vs_savings(&db, "2024-05", dec!(2000)).unwrap();
    assert_eq!(
        view.allocations,
        vec![("housing".to_string(), dec!(500)), ("food".to_string(), dec!(200))]
    );
    assert_eq!(view.savings, dec!(1850));
}

#[test]
fn test_budget_vs_savings_uses_all_history_categories() {
    let mut db = Database::open_in_memory().unwrap();
    let may = AllocationInputs::new()
        .with(AllocationCategory::Housing, "25")
        .with(AllocationCategory::Investment, "5");
    add_allocations(&mut db, "2024-05", dec!(2000), &may).unwrap();
    let june = AllocationInputs::new().with(AllocationCategory::Housing, "30");
    add_allocations(&mut db, "2024-06", dec!(2000), &june).unwrap();

    let view = budget_vs_savings(&db, "2024-06", dec!(2000)).unwrap();
    assert_eq!(
        view.allocations,
        vec![
            ("housing".to_string(), dec!(600)),
            ("investment".to_string(), Decimal::ZERO),
        ]
    );
}

#[test]
fn test_budget_vs_savings_negative_savings() {
    let db = Database::open_in_memory().unwrap();
    ledger::add(&db, "rent", "2024-05", "2024-05-01", "", "2500").unwrap();
    let view = budget_vs_savings(&db, "2024-05", dec!(2000)).unwrap();
    assert!(view.allocations.is_empty());
    assert_eq!(view.savings, dec!(-500));
}

#[test]
fn test_series_ends_with_savings() {
    let view = BudgetVsSavings {
        month: "2024-05".into(),
        allocations: vec![("housing".into(), dec!(500)), ("savings".into(), dec!(100))],
        savings: dec!(42),
    };
    let series = view.series();
    assert_eq!(series.len(), 3);
    assert_eq!(series[1].0, "savings");
    assert_eq!(series[2], (SAVINGS_LABEL.to_string(), dec!(42)));
}

// ── monthly_trend ─────────────────────────────────────────────

#[test]
fn test_trend_same_salary_for_every_month() {
    let db = Database::open_in_memory().unwrap();
    ledger::add(&db, "rent", "2024-05", "2024-05-01", "", "600").unwrap();
    ledger::add(&db, "food", "2024-05", "2024-05-02", "", "400").unwrap();
    ledger::add(&db, "rent", "2024-06", "2024-06-01", "", "1200").unwrap();

    let trend = monthly_trend(&db, dec!(3000)).unwrap();
    assert_eq!(
        trend,
        vec![
            MonthTotals {
                month: "2024-05".into(),
                expenses: dec!(1000),
                savings: dec!(2000),
            },
            MonthTotals {
                month: "2024-06".into(),
                expenses: dec!(1200),
                savings: dec!(1800),
            },
        ]
    );
}

#[test]
fn test_trend_ignores_allocation_only_months() {
    let mut db = Database::open_in_memory().unwrap();
    let inputs = AllocationInputs::new().with(AllocationCategory::Housing, "25");
    add_allocations(&mut db, "2024-04", dec!(2000), &inputs).unwrap();
    ledger::add(&db, "food", "2024-05", "2024-05-02", "", "10").unwrap();

    let months: Vec<String> = monthly_trend(&db, dec!(100))
        .unwrap()
        .into_iter()
        .map(|t| t.month)
        .collect();
    assert_eq!(months, ["2024-05"]);
}

#[test]
fn test_trend_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(monthly_trend(&db, dec!(3000)).unwrap().is_empty());
}

// ── Out-of-range stored data ──────────────────────────────────

fn stored_expense(db: &Database, month: &str, amount: Decimal) {
    db.insert_expense(&Expense::new(
        "imported".into(),
        month.into(),
        format!("{month}-01"),
        String::new(),
        amount,
    ))
    .unwrap();
}

#[test]
fn test_overflowing_month_is_an_error() {
    let db = Database::open_in_memory().unwrap();
    stored_expense(&db, "2024-05", dec!(5e28));
    stored_expense(&db, "2024-05", dec!(5e28));

    assert!(matches!(
        monthly_trend(&db, dec!(3000)),
        Err(Error::Overflow(ref m)) if m == "2024-05"
    ));
    assert!(matches!(
        budget_vs_savings(&db, "2024-05", dec!(3000)),
        Err(Error::Overflow(_))
    ));
    assert!(matches!(
        category_breakdown(&db, "2024-05"),
        Err(Error::Overflow(_))
    ));
}

#[test]
fn test_savings_overflow_is_an_error() {
    let db = Database::open_in_memory().unwrap();
    stored_expense(&db, "2024-05", dec!(-7e28));

    assert!(matches!(
        monthly_trend(&db, dec!(1e28)),
        Err(Error::Overflow(_))
    ));
    assert!(matches!(
        budget_vs_savings(&db, "2024-05", dec!(1e28)),
        Err(Error::Overflow(_))
    ));
    assert_eq!(
        budget_vs_savings(&db, "2024-05", dec!(3000)).unwrap().savings,
        dec!(7e28) + dec!(3000)
    );
}
