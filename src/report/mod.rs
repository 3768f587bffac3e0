//! Read-only views over the store, shaped for charting.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

use crate::db::{Database, Table};
use crate::error::{Error, Result};

pub(crate) const SAVINGS_LABEL: &str = "Savings";

/// Planned amounts for one month next to what is left of the salary.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetVsSavings {
    pub(crate) month: String,
    /// One entry per category ever allocated, in first-allocated order.
    pub(crate) allocations: Vec<(String, Decimal)>,
    /// Salary minus this month's expenses. May be negative.
    pub(crate) savings: Decimal,
}

impl BudgetVsSavings {
    /// Allocation bars followed by a final "Savings" bar.
    pub(crate) fn series(&self) -> Vec<(String, Decimal)> {
        let mut series = self.allocations.clone();
        series.push((SAVINGS_LABEL.to_string(), self.savings));
        series
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthTotals {
    pub(crate) month: String,
    pub(crate) expenses: Decimal,
    pub(crate) savings: Decimal,
}

/// Spending per category for `month`. Categories without expenses are
/// absent rather than zero.
pub(crate) fn category_breakdown(db: &Database, month: &str) -> Result<BTreeMap<String, Decimal>> {
    db.sum_expenses_by_category(month)
}

/// Every category that has ever been allocated (in any month) with its
/// amount for `month`, plus savings for the month.
pub(crate) fn budget_vs_savings(
    db: &Database,
    month: &str,
    salary: Decimal,
) -> Result<BudgetVsSavings> {
    let mut allocations = Vec::new();
    for category in db.distinct_categories()? {
        let amount = db.query_allocation(&category, month)?;
        allocations.push((category, amount));
    }
    let savings = remaining(salary, db.sum_expenses(month)?, month)?;
    debug!(month, categories = allocations.len(), %savings, "budget vs savings");
    Ok(BudgetVsSavings {
        month: month.to_string(),
        allocations,
        savings,
    })
}

/// Expenses and savings for every month with at least one expense.
///
/// The same `salary` is applied to every month: no historical salary is
/// stored, so older months are approximated with the current one.
pub(crate) fn monthly_trend(db: &Database, salary: Decimal) -> Result<Vec<MonthTotals>> {
    let mut trend = Vec::new();
    for month in db.distinct_months(Table::Expenses)? {
        let expenses = db.sum_expenses(&month)?;
        let savings = remaining(salary, expenses, &month)?;
        trend.push(MonthTotals {
            month,
            expenses,
            savings,
        });
    }
    Ok(trend)
}

fn remaining(salary: Decimal, expenses: Decimal, month: &str) -> Result<Decimal> {
    salary
        .checked_sub(expenses)
        .ok_or_else(|| Error::Overflow(month.to_string()))
}

#[cfg(test)]
mod tests;
