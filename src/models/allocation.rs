use rust_decimal::Decimal;

use super::AllocationCategory;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Allocation {
    pub(crate) id: Option<i64>,
    pub(crate) category: String,
    /// Format: "YYYY-MM"
    pub(crate) month: String,
    pub(crate) amount: Decimal,
}

impl Allocation {
    pub(crate) fn new(category: String, month: String, amount: Decimal) -> Self {
        Self {
            id: None,
            category,
            month,
            amount,
        }
    }

    /// Share of `salary` given by `percentage`, e.g. 25% of 2000 is 500.
    /// `None` when the product does not fit in a `Decimal`.
    pub(crate) fn from_percentage(
        category: AllocationCategory,
        month: &str,
        percentage: Decimal,
        salary: Decimal,
    ) -> Option<Self> {
        let amount = percentage
            .checked_mul(salary)?
            .checked_div(Decimal::ONE_HUNDRED)?;
        Some(Self::new(category.as_str().to_string(), month.to_string(), amount))
    }
}
