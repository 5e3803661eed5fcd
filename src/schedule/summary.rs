//! Totals derived from the monthly schedule

use serde::{Deserialize, Serialize};

use super::records::MonthlyRecord;
use crate::loan::Frequency;

/// Summary statistics for a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub frequency: Frequency,
    pub total_months: u32,
    pub principal: f64,

    /// Fixed monthly installment
    pub monthly_installment: f64,

    /// Monthly installment times the months in one period
    pub period_installment: f64,

    pub total_payment: f64,
    pub total_interest: f64,

    /// Share of total payment that repays principal, in percent
    pub principal_share_pct: f64,

    /// Share of total payment that is interest, in percent
    pub interest_share_pct: f64,
}

/// Reduce a monthly schedule to its totals
///
/// The period installment is a display scaling of the monthly installment,
/// not an annuity recomputed at the period frequency. The borrower still
/// pays monthly underneath.
pub fn summarize(monthly: &[MonthlyRecord], installment: f64, frequency: Frequency) -> Summary {
    let total_months = monthly.len() as u32;
    let principal = monthly.first().map(|r| r.opening_balance).unwrap_or(0.0);

    let total_payment = installment * f64::from(total_months);
    let total_interest = total_payment - principal;

    let (principal_share_pct, interest_share_pct) = if total_payment > 0.0 {
        (
            principal / total_payment * 100.0,
            total_interest / total_payment * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    Summary {
        frequency,
        total_months,
        principal,
        monthly_installment: installment,
        period_installment: installment * f64::from(frequency.months_per_period()),
        total_payment,
        total_interest,
        principal_share_pct,
        interest_share_pct,
    }
}
