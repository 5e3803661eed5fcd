//! Error types for parameter validation, loading, export and the calculator workflow

use thiserror::Error;

/// Why a parameter set produces no schedule
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("principal must be positive, got {principal}")]
    NonPositivePrincipal { principal: f64 },

    #[error("annual rate must be positive, got {annual_rate_percent}%")]
    NonPositiveRate { annual_rate_percent: f64 },

    #[error("loan term must be at least one month")]
    EmptyTerm,

    #[error("loan term of {total_months} months exceeds the {max} month ceiling")]
    TermTooLong { total_months: u64, max: u32 },

    #[error("installment is not finite for rate {monthly_rate} over {total_months} months")]
    NonFiniteInstallment { monthly_rate: f64, total_months: u32 },

    #[error("schedule dates run past the supported calendar range")]
    DateOutOfRange,

    #[error(
        "schedule does not amortize within tolerance: principal off by {closure_error:e} \
         (relative), final balance {final_balance}"
    )]
    IllConditioned {
        closure_error: f64,
        final_balance: f64,
    },
}

/// Failure while reading loan scenarios
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read scenarios: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario {scenario_id}: unknown frequency {value:?}")]
    UnknownFrequency { scenario_id: u32, value: String },

    #[error("scenario {scenario_id}: invalid start date {value:?}")]
    InvalidDate { scenario_id: u32, value: String },
}

/// Failure while writing a schedule
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write schedule: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode schedule row: {0}")]
    Csv(#[from] csv::Error),
}

/// Rejected calculator session transition
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("no schedule has been computed")]
    NoSchedule,

    #[error("contact details requested from state {state:?}")]
    UnexpectedState { state: crate::workflow::SessionState },

    #[error("contact details missing required field: {field}")]
    IncompleteContact { field: &'static str },

    #[error("contact submission failed: {0}")]
    Submission(#[source] anyhow::Error),
}
