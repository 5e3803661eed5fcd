//! Loan parameters, payment frequency and scenario loading

mod frequency;
mod params;
pub mod loader;

pub use frequency::Frequency;
pub use params::{
    LoanParameters, DEFAULT_ANNUAL_RATE_PERCENT, DEFAULT_PRINCIPAL, DEFAULT_TERM_YEARS,
};
pub use loader::{load_scenarios, load_scenarios_from_reader, LoanScenario};
