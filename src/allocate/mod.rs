use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::db::Database;
use crate::error::{Error, Result, ValidationError};
use crate::models::{checked_sum, parse_decimal, Allocation, AllocationInputs, MAX_AMOUNT};

/// What a single allocation batch produced. A category whose percentage
/// failed to parse is reported in `errors` and has no row in `inserted`.
#[derive(Debug, Default)]
pub(crate) struct AllocationOutcome {
    pub(crate) inserted: Vec<Allocation>,
    pub(crate) errors: Vec<ValidationError>,
}

impl AllocationOutcome {
    pub(crate) fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Sum of the inserted amounts, saturating at `Decimal::MAX`.
    pub(crate) fn total(&self) -> Decimal {
        checked_sum(self.inserted.iter().map(|a| a.amount)).unwrap_or(Decimal::MAX)
    }
}

/// Split `salary` across the fixed categories for `month`.
///
/// Fails with [`Error::DuplicateMonth`] if the month already has any
/// allocation row. Otherwise every category with a parseable percentage
/// gets `percentage * salary / 100`; the others are skipped and reported,
/// as are categories whose amount would exceed `MAX_AMOUNT`.
/// Percentages are not required to sum to 100.
pub(crate) fn add_allocations(
    db: &mut Database,
    month: &str,
    salary: Decimal,
    inputs: &AllocationInputs,
) -> Result<AllocationOutcome> {
    if db.has_allocation(month)? {
        warn!(month, "allocation already exists");
        return Err(Error::DuplicateMonth(month.to_string()));
    }

    let mut outcome = AllocationOutcome::default();
    for (category, raw) in inputs.iter() {
        match parse_decimal(raw) {
            Some(percentage) => {
                match Allocation::from_percentage(category, month, percentage, salary)
                    .filter(|a| a.amount.abs() <= MAX_AMOUNT)
                {
                    Some(allocation) => outcome.inserted.push(allocation),
                    None => {
                        warn!(month, %category, input = raw, "allocated amount out of range");
                        outcome
                            .errors
                            .push(ValidationError::AmountTooLarge(format!("{category}={raw}")));
                    }
                }
            }
            None => {
                warn!(month, %category, input = raw, "skipping unparseable percentage");
                outcome.errors.push(ValidationError::BadPercentage {
                    category: category.to_string(),
                    input: raw.to_string(),
                });
            }
        }
    }

    let ids = db.insert_allocation_batch(month, &outcome.inserted)?;
    for (allocation, id) in outcome.inserted.iter_mut().zip(ids) {
        allocation.id = Some(id);
    }

    info!(
        month,
        inserted = outcome.inserted.len(),
        skipped = outcome.errors.len(),
        "added allocations"
    );
    Ok(outcome)
}
