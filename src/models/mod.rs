mod allocation;
mod category;
mod expense;
mod month;
mod session;

pub(crate) use allocation::Allocation;
pub(crate) use category::{AllocationCategory, AllocationInputs};
pub(crate) use expense::Expense;
pub(crate) use month::{
    check_amount, checked_sum, parse_amount, parse_decimal, parse_month, shift_month, MAX_AMOUNT,
};
pub(crate) use session::Session;
