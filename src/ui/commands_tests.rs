#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::*;
use crate::db::Database;
use crate::models::{AllocationCategory, Expense};

fn setup() -> (App, Database) {
    let db = Database::open_in_memory().unwrap();
    let mut app = App::new();
    app.current_month = "2024-05".into();
    (app, db)
}

fn run(input: &str, app: &mut App, db: &mut Database) {
    handle_command(input, app, db);
}

// ── Parsing ───────────────────────────────────────────────────

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("salary", "salary"), 0);
    assert_eq!(levenshtein("salry", "salary"), 1);
    assert_eq!(levenshtein("", "abc"), 3);
}

#[test]
fn test_parse_allocation_pairs() {
    let inputs = parse_allocation_args("housing=30 food=12.5").unwrap();
    assert_eq!(inputs.get(AllocationCategory::Housing), "30");
    assert_eq!(inputs.get(AllocationCategory::Food), "12.5");
    assert_eq!(inputs.get(AllocationCategory::Savings), "");
}

#[test]
fn test_parse_allocation_positional() {
    let inputs = parse_allocation_args("30 10 15 5 5 20 15").unwrap();
    assert_eq!(inputs.get(AllocationCategory::Housing), "30");
    assert_eq!(inputs.get(AllocationCategory::Investment), "15");
}

#[test]
fn test_parse_allocation_rejects_unknown_category() {
    assert!(parse_allocation_args("rent=30").is_err());
    assert!(parse_allocation_args("1 2 3 4 5 6 7 8").is_err());
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut db) = setup();
    run("salry 100", &mut app, &mut db);
    assert!(app.status_message.contains(":salary"));
}

#[test]
fn test_allocate_requires_salary() {
    let (mut app, mut db) = setup();
    run("allocate housing=25", &mut app, &mut db);
    assert!(app.status_message.contains("No salary set"));
    assert!(!db.has_allocation("2024-05").unwrap());
}

#[test]
fn test_salary_then_allocate() {
    let (mut app, mut db) = setup();
    run("salary 2000", &mut app, &mut db);
    assert_eq!(app.session.salary(), Some(dec!(2000)));

    run("allocate housing=25 food=10", &mut app, &mut db);
    assert_eq!(db.query_allocation("housing", "2024-05").unwrap(), dec!(500));
    assert_eq!(app.allocations.len(), 2);
    assert!(app.status_message.contains("Skipped"));
    assert_eq!(app.budget.as_ref().unwrap().savings, dec!(2000));
}

#[test]
fn test_allocate_twice_reports_duplicate() {
    let (mut app, mut db) = setup();
    run("salary 2000", &mut app, &mut db);
    run("allocate 30 10 15 5 5 20 15", &mut app, &mut db);
    assert!(app.status_message.starts_with("Budget allocation added"));

    run("allocate 50 50 50 50 50 50 50", &mut app, &mut db);
    assert!(app.status_message.contains("already exists"));
    assert_eq!(db.query_allocation("housing", "2024-05").unwrap(), dec!(600));
}

#[test]
fn test_bad_salary_keeps_unset() {
    let (mut app, mut db) = setup();
    run("salary lots", &mut app, &mut db);
    assert!(app.session.salary().is_none());
    assert!(app.status_message.starts_with("Error:"));
}

#[test]
fn test_expense_added_for_current_month() {
    let (mut app, mut db) = setup();
    run("expense 2024-05-17 food 12.5 lunch with team", &mut app, &mut db);
    assert_eq!(app.expenses.len(), 1);
    assert_eq!(app.expenses[0].description, "lunch with team");
    assert_eq!(app.breakdown, vec![("food".to_string(), dec!(12.5))]);
}

#[test]
fn test_expense_tolerates_repeated_spaces() {
    let (mut app, mut db) = setup();
    run("expense 2024-05-17  food   12.5  lunch   out", &mut app, &mut db);
    assert_eq!(app.expenses.len(), 1);
    assert_eq!(app.expenses[0].category, "food");
    assert_eq!(app.expenses[0].amount, dec!(12.5));
    assert_eq!(app.expenses[0].description, "lunch out");
}

#[test]
fn test_expense_missing_amount_shows_usage() {
    let (mut app, mut db) = setup();
    run("expense 2024-05-17   food  ", &mut app, &mut db);
    assert!(app.status_message.starts_with("Usage:"));
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_oversized_expense_rejected() {
    let (mut app, mut db) = setup();
    run("expense 2024-05-17 food 5e28", &mut app, &mut db);
    assert!(app.status_message.contains("too large"));
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_expense_outside_month_rejected() {
    let (mut app, mut db) = setup();
    run("x 2024-06-01 food 1.0", &mut app, &mut db);
    assert!(app.status_message.contains("does not match"));
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_month_switch_and_validation() {
    let (mut app, mut db) = setup();
    run("month 2024-13", &mut app, &mut db);
    assert_eq!(app.current_month, "2024-05");

    run("m 2023-12", &mut app, &mut db);
    assert_eq!(app.current_month, "2023-12");

    run("next-month", &mut app, &mut db);
    assert_eq!(app.current_month, "2024-01");
    run("prev-month", &mut app, &mut db);
    assert_eq!(app.current_month, "2023-12");
}

#[test]
fn test_new_month_rejects_allocated() {
    let (mut app, mut db) = setup();
    run("salary 1000", &mut app, &mut db);
    run("allocate housing=30", &mut app, &mut db);
    run("m 2024-01", &mut app, &mut db);

    run("new-month 2024-05", &mut app, &mut db);
    assert_eq!(app.current_month, "2024-01");
    assert!(app.status_message.contains("already exists"));

    run("new-month 2024-06", &mut app, &mut db);
    assert_eq!(app.current_month, "2024-06");
}

#[test]
fn test_delete_expense_with_confirmation() {
    let (mut app, mut db) = setup();
    run("expense 2024-05-17 food 12.5 lunch", &mut app, &mut db);
    run("expenses", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Expenses);

    run("delete-expense", &mut app, &mut db);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::DeleteExpense { ref description, .. }) if description == "lunch"
    ));

    confirm_pending(&mut app, &mut db);
    assert!(app.pending_action.is_none());
    assert!(app.expenses.is_empty());
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_delete_expense_needs_expenses_screen() {
    let (mut app, mut db) = setup();
    run("expense 2024-05-17 food 12.5", &mut app, &mut db);
    run("delete-expense", &mut app, &mut db);
    assert!(app.pending_action.is_none());
    assert_eq!(db.expense_count().unwrap(), 1);
}

#[test]
fn test_quit() {
    let (mut app, mut db) = setup();
    run("q", &mut app, &mut db);
    assert!(!app.running);
}

#[test]
fn test_refresh_failure_reported_on_status_line() {
    let (mut app, mut db) = setup();
    for date in ["2024-05-01", "2024-05-02"] {
        db.insert_expense(&Expense::new(
            "imported".into(),
            "2024-05".into(),
            date.into(),
            String::new(),
            dec!(5e28),
        ))
        .unwrap();
    }

    run("salary 3000", &mut app, &mut db);
    assert!(app.running);
    assert!(app.status_message.contains("out of range"));

    assert!(app.refresh_all(&db).is_err());
    assert_eq!(app.expenses.len(), 2);

    run("expenses", &mut app, &mut db);
    run("delete-expense", &mut app, &mut db);
    confirm_pending(&mut app, &mut db);
    assert_eq!(db.expense_count().unwrap(), 1);
    assert!(app.status_message.starts_with("Expense deleted"));
    assert_eq!(app.month_expenses, dec!(5e28));
}
