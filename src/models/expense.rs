use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expense {
    pub(crate) id: Option<i64>,
    pub(crate) category: String,
    /// Format: "YYYY-MM"
    pub(crate) month: String,
    /// Format: "YYYY-MM-DD", always inside `month`
    pub(crate) date: String,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
}

impl Expense {
    pub(crate) fn new(
        category: String,
        month: String,
        date: String,
        description: String,
        amount: Decimal,
    ) -> Self {
        Self {
            id: None,
            category,
            month,
            date,
            description,
            amount,
        }
    }

    /// The date's year-month prefix equals the month key.
    pub(crate) fn date_in_month(date: &str, month: &str) -> bool {
        date.starts_with(month)
    }
}
