//! Loan parameters as entered by the caller

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Frequency;

/// Default loan amount shown by the calculator
pub const DEFAULT_PRINCIPAL: f64 = 270_000.0;

/// Default annual interest rate in percent
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 6.0;

/// Default tenure in whole years
pub const DEFAULT_TERM_YEARS: u32 = 6;

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 12).unwrap_or_default()
}

/// Immutable input to the schedule engine
///
/// Any field change means a fresh computation; nothing is carried over
/// from a previous result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanParameters {
    /// Amount borrowed, in the loan's base currency unit
    pub principal: f64,

    /// Nominal annual rate in percent (6.0 means 6%)
    pub annual_rate_percent: f64,

    /// Whole years of tenure
    pub term_years: u32,

    /// Months added on top of `term_years * 12`
    pub extra_months: u32,

    /// Date of the first installment
    pub start_date: NaiveDate,

    /// Grouping used for the periodic view
    pub frequency: Frequency,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            principal: DEFAULT_PRINCIPAL,
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            term_years: DEFAULT_TERM_YEARS,
            extra_months: 0,
            start_date: default_start_date(),
            frequency: Frequency::Monthly,
        }
    }
}

impl LoanParameters {
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        term_years: u32,
        extra_months: u32,
        start_date: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
            extra_months,
            start_date,
            frequency,
        }
    }

    /// Periodic rate applied each month
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }

    /// Tenure in months; widened so huge year counts cannot wrap
    pub fn total_months(&self) -> u64 {
        u64::from(self.term_years) * 12 + u64::from(self.extra_months)
    }

    /// Copy with a different frequency
    pub fn with_frequency(&self, frequency: Frequency) -> Self {
        Self {
            frequency,
            ..self.clone()
        }
    }

    /// Copy with a different annual rate
    pub fn with_rate(&self, annual_rate_percent: f64) -> Self {
        Self {
            annual_rate_percent,
            ..self.clone()
        }
    }
}
