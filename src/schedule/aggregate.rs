//! Roll monthly records up into payment periods and loan years
//!
//! Both views only sum what the monthly schedule already holds; nothing is
//! recomputed at period level.

use super::records::{MonthlyRecord, PeriodRecord, YearRecord};
use crate::loan::Frequency;

/// Group consecutive months into full periods at `frequency`
///
/// Produces `floor(months / months_per_period)` periods. Trailing months
/// that do not fill a period are left out of this view.
pub fn aggregate(monthly: &[MonthlyRecord], frequency: Frequency) -> Vec<PeriodRecord> {
    let months_per_period = frequency.months_per_period() as usize;

    monthly
        .chunks_exact(months_per_period)
        .zip(1u32..)
        .filter_map(|(months, period)| {
            let first = months.first()?;
            let last = months.last()?;
            Some(PeriodRecord {
                period,
                date: first.date,
                principal_portion: months.iter().map(|m| m.principal_portion).sum(),
                interest_portion: months.iter().map(|m| m.interest_portion).sum(),
                balance: last.remaining_balance,
            })
        })
        .collect()
}

/// Principal and interest per loan year, keeping a partial final year
pub fn yearly_breakdown(monthly: &[MonthlyRecord]) -> Vec<YearRecord> {
    monthly
        .chunks(12)
        .zip(1u32..)
        .map(|(months, year)| {
            let principal: f64 = months.iter().map(|m| m.principal_portion).sum();
            let interest: f64 = months.iter().map(|m| m.interest_portion).sum();
            YearRecord {
                year,
                principal,
                interest,
                total: principal + interest,
            }
        })
        .collect()
}
