//! Schedule output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregate::yearly_breakdown;
use super::summary::{summarize, Summary};
use crate::loan::Frequency;

/// One month of the amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Month index (1-indexed, contiguous)
    pub month: u32,

    /// Installment date
    pub date: NaiveDate,

    /// Balance before this month's installment
    pub opening_balance: f64,

    /// Fixed monthly installment
    pub installment: f64,

    pub principal_portion: f64,
    pub interest_portion: f64,

    /// Balance after this month's installment, never negative
    pub remaining_balance: f64,
}

/// Consecutive months rolled up at the selected frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Period index (1-indexed, contiguous)
    pub period: u32,

    /// Date of the first month in the period
    pub date: NaiveDate,

    pub principal_portion: f64,
    pub interest_portion: f64,

    /// Remaining balance after the last month in the period
    pub balance: f64,
}

/// Principal and interest paid in one loan year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// Loan year (1-indexed); the final year may be partial
    pub year: u32,
    pub principal: f64,
    pub interest: f64,
    pub total: f64,
}

/// Complete computed schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Monthly installment from the annuity formula
    pub monthly_installment: f64,

    /// Monthly installment scaled by the frequency's month count
    pub installment_amount: f64,

    pub total_interest: f64,
    pub total_payment: f64,
    pub frequency: Frequency,

    /// Monthly ground truth
    pub monthly: Vec<MonthlyRecord>,

    /// Full periods at `frequency`; tail months are not included
    pub periods: Vec<PeriodRecord>,
}

impl ScheduleResult {
    /// Number of months in the loan
    pub fn total_months(&self) -> u32 {
        self.monthly.len() as u32
    }

    /// Principal as seen by the first month
    pub fn principal(&self) -> f64 {
        self.monthly.first().map(|r| r.opening_balance).unwrap_or(0.0)
    }

    /// Months at the end of the loan that do not fill a whole period
    pub fn tail_months(&self) -> u32 {
        self.total_months() % self.frequency.months_per_period()
    }

    /// Get summary statistics
    pub fn summary(&self) -> Summary {
        summarize(&self.monthly, self.monthly_installment, self.frequency)
    }

    /// Principal and interest per loan year
    pub fn yearly_breakdown(&self) -> Vec<YearRecord> {
        yearly_breakdown(&self.monthly)
    }
}
