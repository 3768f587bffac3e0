use rust_decimal::Decimal;

use super::{check_amount, parse_decimal};
use crate::error::{Result, ValidationError};

/// Per-process state that is never persisted. The salary starts unset and
/// is lost when the process exits.
#[derive(Debug, Clone, Default)]
pub(crate) struct Session {
    salary: Option<Decimal>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_salary(salary: Decimal) -> Self {
        Self {
            salary: Some(salary),
        }
    }

    pub(crate) fn set_salary(&mut self, raw: &str) -> Result<Decimal> {
        let salary =
            parse_decimal(raw).ok_or_else(|| ValidationError::BadSalary(raw.to_string()))?;
        let salary = check_amount(salary, raw)?;
        self.salary = Some(salary);
        Ok(salary)
    }

    pub(crate) fn salary(&self) -> Option<Decimal> {
        self.salary
    }

    pub(crate) fn require_salary(&self) -> Result<Decimal> {
        Ok(self.salary.ok_or(ValidationError::SalaryNotSet)?)
    }
}
