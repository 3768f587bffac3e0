use tracing::warn;

use crate::db::Database;
use crate::error::{Result, ValidationError};
use crate::models::{parse_amount, Expense};

/// Record an expense against `month`.
///
/// `date` must start with `month` (so "2024-05-17" belongs to "2024-05")
/// and `amount` must be numeric with a magnitude of at most
/// [`MAX_AMOUNT`](crate::models::MAX_AMOUNT). Negative amounts are accepted.
pub(crate) fn add(
    db: &Database,
    category: &str,
    month: &str,
    date: &str,
    description: &str,
    amount: &str,
) -> Result<i64> {
    if !Expense::date_in_month(date, month) {
        warn!(month, date, "expense date outside selected month");
        return Err(ValidationError::MonthMismatch {
            date: date.to_string(),
            month: month.to_string(),
        }
        .into());
    }

    let amount = parse_amount(amount).inspect_err(|e| {
        warn!(input = amount, error = %e, "rejected expense amount");
    })?;

    let expense = Expense::new(
        category.to_string(),
        month.to_string(),
        date.to_string(),
        description.to_string(),
        amount,
    );
    db.insert_expense(&expense)
}

/// Remove an expense. Unknown ids succeed silently.
pub(crate) fn delete(db: &Database, id: i64) -> Result<()> {
    db.delete_expense(id)
}

pub(crate) fn list(db: &Database, month: &str) -> Result<Vec<Expense>> {
    db.get_expenses(month)
}

#[cfg(test)]
mod tests;
