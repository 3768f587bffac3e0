#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::Error;
use rust_decimal_macros::dec;

#[test]
fn test_add_in_month() {
    let db = Database::open_in_memory().unwrap();
    let id = add(&db, "food", "2024-05", "2024-05-17", "lunch", "12.5").unwrap();

    let rows = list(&db, "2024-05").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, Some(id));
    assert_eq!(rows[0].amount, dec!(12.5));
    assert_eq!(rows[0].description, "lunch");
}

#[test]
fn test_add_month_mismatch_rejected() {
    let db = Database::open_in_memory().unwrap();
    let err = add(&db, "food", "2024-05", "2024-06-01", "x", "1.0").unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MonthMismatch { ref date, ref month })
            if date == "2024-06-01" && month == "2024-05"
    ));
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_add_bad_amount_rejected() {
    let db = Database::open_in_memory().unwrap();
    let err = add(&db, "food", "2024-05", "2024-05-02", "x", "twelve").unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::BadAmount(ref s)) if s == "twelve"
    ));
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_add_oversized_amount_rejected() {
    let db = Database::open_in_memory().unwrap();
    for _ in 0..2 {
        let err = add(&db, "food", "2024-05", "2024-05-02", "x", "5e28").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::AmountTooLarge(ref s)) if s == "5e28"
        ));
    }
    assert_eq!(db.expense_count().unwrap(), 0);
    assert_eq!(db.sum_expenses("2024-05").unwrap(), dec!(0));
}

#[test]
fn test_add_amount_at_limit_accepted() {
    let db = Database::open_in_memory().unwrap();
    add(&db, "house", "2024-05", "2024-05-02", "", "1e15").unwrap();
    add(&db, "house", "2024-05", "2024-05-03", "", "1e15").unwrap();
    assert_eq!(db.sum_expenses("2024-05").unwrap(), dec!(2e15));
}

#[test]
fn test_month_checked_before_amount() {
    let db = Database::open_in_memory().unwrap();
    let err = add(&db, "food", "2024-05", "2023-05-02", "x", "oops").unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MonthMismatch { .. })
    ));
}

#[test]
fn test_negative_amount_accepted() {
    let db = Database::open_in_memory().unwrap();
    add(&db, "refund", "2024-05", "2024-05-09", "", "-40").unwrap();
    assert_eq!(db.sum_expenses("2024-05").unwrap(), dec!(-40));
}

#[test]
fn test_free_form_category() {
    let db = Database::open_in_memory().unwrap();
    add(&db, "Pet Supplies", "2024-05", "2024-05-09", "", "18").unwrap();
    assert_eq!(list(&db, "2024-05").unwrap()[0].category, "Pet Supplies");
}

#[test]
fn test_delete_existing_and_missing() {
    let db = Database::open_in_memory().unwrap();
    let id = add(&db, "food", "2024-05", "2024-05-17", "lunch", "12.5").unwrap();
    add(&db, "food", "2024-05", "2024-05-18", "dinner", "20").unwrap();

    delete(&db, 424242).unwrap();
    assert_eq!(db.expense_count().unwrap(), 2);

    delete(&db, id).unwrap();
    let rows = list(&db, "2024-05").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "dinner");

    delete(&db, id).unwrap();
    assert_eq!(db.expense_count().unwrap(), 1);
}
