//! Amortization engine: monthly schedule, frequency rollups and totals

pub mod calendar;
mod state;
mod engine;
mod records;
mod aggregate;
mod summary;

pub use state::AmortizationState;
pub use engine::{
    compute_schedule, generate_monthly_schedule, monthly_installment, LoanTerms, ScheduleConfig,
    ScheduleEngine, CLOSURE_TOLERANCE, DEFAULT_MAX_TOTAL_MONTHS, MAX_TOTAL_MONTHS_ENV,
};
pub use records::{MonthlyRecord, PeriodRecord, ScheduleResult, YearRecord};
pub use aggregate::{aggregate, yearly_breakdown};
pub use summary::{summarize, Summary};
