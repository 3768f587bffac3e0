use thiserror::Error;

/// Input that was rejected before anything reached the database.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("Please enter a valid amount: '{0}'")]
    BadAmount(String),

    #[error("Please enter a valid percentage for {category}: '{input}'")]
    BadPercentage { category: String, input: String },

    #[error("Please enter a valid salary: '{0}'")]
    BadSalary(String),

    #[error("Amount is too large: '{0}'")]
    AmountTooLarge(String),

    #[error("Expense date {date} does not match selected month {month}")]
    MonthMismatch { date: String, month: String },

    #[error("Invalid month '{0}'. Use YYYY-MM (e.g. 2024-01)")]
    BadMonth(String),

    #[error("No salary set for this session. Use :salary <amount>")]
    SalaryNotSet,
}

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Budget allocation for {0} already exists")]
    DuplicateMonth(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Totals for {0} are out of range")]
    Overflow(String),
}

impl Error {
    /// Errors caused by user input rather than the database.
    pub(crate) fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DuplicateMonth(_))
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
