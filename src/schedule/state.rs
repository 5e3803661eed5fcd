//! Running amortization state for a single loan

use chrono::NaiveDate;

use super::calendar::add_months;
use super::engine::LoanTerms;

/// State of the loan at a point in time during schedule generation
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Current month (1-indexed, 0 before the first advance)
    pub month: u32,

    /// Balance before this month's installment
    pub opening_balance: f64,

    /// Balance after this month's installment, clamped at zero
    pub closing_balance: f64,

    /// Installment date for the current month
    pub date: NaiveDate,

    start_date: NaiveDate,
}

impl AmortizationState {
    /// Initialize state at loan start
    pub fn from_terms(terms: &LoanTerms) -> Self {
        Self {
            month: 0,
            opening_balance: terms.principal,
            closing_balance: terms.principal,
            date: terms.start_date,
            start_date: terms.start_date,
        }
    }

    /// Advance to next month
    ///
    /// Returns `None` only if the installment date leaves the calendar range.
    pub fn advance_month(&mut self) -> Option<()> {
        self.month += 1;
        self.date = add_months(self.start_date, self.month - 1)?;
        self.opening_balance = self.closing_balance;
        Some(())
    }

    /// Apply one month's principal reduction
    pub fn apply_principal(&mut self, principal_portion: f64) {
        self.closing_balance = (self.opening_balance - principal_portion).max(0.0);
    }
}
