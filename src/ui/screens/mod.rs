pub(crate) mod allocations;
pub(crate) mod dashboard;
pub(crate) mod expenses;
