//! Scenario runner for batch schedule computation
//!
//! Every scenario is computed independently from its own parameters, so
//! batches fan out across threads with no shared state.

use rayon::prelude::*;
use serde::Serialize;

use crate::loan::{Frequency, LoanParameters, LoanScenario};
use crate::schedule::{ScheduleConfig, ScheduleEngine, ScheduleResult};

/// Result of one batch scenario; `None` when its parameters were invalid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub scenario_id: u32,
    pub frequency: Frequency,
    pub result: Option<ScheduleResult>,
}

/// Batch runner sharing one engine configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let outcomes = runner.run_batch(&load_scenarios("loans.csv")?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ScheduleEngine,
}

impl ScenarioRunner {
    /// Create runner with the default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a specific config
    pub fn with_config(config: ScheduleConfig) -> Self {
        Self {
            engine: ScheduleEngine::new(config),
        }
    }

    /// Compute a single schedule
    pub fn run(&self, params: &LoanParameters) -> Option<ScheduleResult> {
        self.engine.compute(params)
    }

    /// Compute all scenarios in parallel, preserving input order
    pub fn run_batch(&self, scenarios: &[LoanScenario]) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                scenario_id: scenario.scenario_id,
                frequency: scenario.params.frequency,
                result: self.engine.compute(&scenario.params),
            })
            .collect();

        let computed = outcomes.iter().filter(|o| o.result.is_some()).count();
        log::info!(
            "batch finished: {} of {} scenarios produced a schedule",
            computed,
            outcomes.len()
        );
        outcomes
    }

    /// Run one parameter set across several annual rates
    pub fn run_rates(
        &self,
        params: &LoanParameters,
        annual_rates_percent: &[f64],
    ) -> Vec<Option<ScheduleResult>> {
        annual_rates_percent
            .par_iter()
            .map(|&rate| self.engine.compute(&params.with_rate(rate)))
            .collect()
    }

    pub fn engine(&self) -> &ScheduleEngine {
        &self.engine
    }
}
