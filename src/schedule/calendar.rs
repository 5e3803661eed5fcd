//! Calendar month arithmetic for installment dates
//!
//! Adding months keeps the day of month when the target month has it and
//! clamps to the target month's last day otherwise (Jan 31 + 1 month is
//! Feb 28, or Feb 29 in a leap year). Each date is computed from the start
//! date directly, so a clamp in one month never shortens later months.

use chrono::{Months, NaiveDate};

/// Add `months` calendar months to `date`, clamping the day of month
///
/// Returns `None` if the result falls outside chrono's supported range.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}
