//! EMI Schedule - loan amortization engine with frequency rollups
//!
//! This library provides:
//! - Equated monthly installment from the annuity formula
//! - Monthly amortization schedule (interest/principal split, running balance)
//! - Quarterly and half-yearly rollups derived from the monthly schedule
//! - Totals, yearly breakdown and CSV export of computed schedules
//! - Batch scenario runs and a calculator session with a gated full schedule
//!
//! Every computation is a pure function of [`LoanParameters`]. Invalid
//! parameters produce no schedule (`None`), not an error.

pub mod error;
pub mod loan;
pub mod schedule;
pub mod export;
pub mod scenario;
pub mod workflow;

// Re-export commonly used types
pub use error::{ExportError, LoadError, ParameterError, WorkflowError};
pub use loan::{Frequency, LoanParameters, LoanScenario};
pub use schedule::{
    aggregate, compute_schedule, generate_monthly_schedule, summarize, MonthlyRecord,
    PeriodRecord, ScheduleConfig, ScheduleEngine, ScheduleResult, Summary, YearRecord,
};
pub use scenario::{ScenarioOutcome, ScenarioRunner};
pub use workflow::{CalculatorSession, Calculation, ContactInfo, ContactSink, SessionState};
