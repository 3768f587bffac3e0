use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;

/// Validate a "YYYY-MM" month key by parsing it as a real date.
pub(crate) fn parse_month(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.len() != 7 {
        return Err(ValidationError::BadMonth(input.to_string()));
    }
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m").to_string())
        .map_err(|_| ValidationError::BadMonth(input.to_string()))
}

/// Move a month key forward or back by `delta` months.
pub(crate) fn shift_month(month: &str, delta: i32) -> Option<String> {
    let date = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()?;
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    }?;
    Some(shifted.format("%Y-%m").to_string())
}

/// Largest magnitude accepted for a single amount or salary (10^15). Any
/// realistic number of rows summed at this size stays inside `Decimal`.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Parse user-entered numeric text. Surrounding whitespace is ignored.
pub(crate) fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parse a money amount, rejecting text that is not a number and values
/// beyond [`MAX_AMOUNT`].
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let value = parse_decimal(input).ok_or_else(|| ValidationError::BadAmount(input.to_string()))?;
    check_amount(value, input)
}

pub(crate) fn check_amount(value: Decimal, input: &str) -> Result<Decimal, ValidationError> {
    if value.abs() > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(input.trim().to_string()));
    }
    Ok(value)
}

/// Sum amounts without panicking; `None` on overflow.
pub(crate) fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
}
