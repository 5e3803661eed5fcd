//! Load loan scenarios from CSV

use super::{Frequency, LoanParameters};
use crate::error::LoadError;
use chrono::NaiveDate;
use csv::Reader;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A parameter set tagged with the caller's identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    pub scenario_id: u32,
    pub params: LoanParameters,
}

/// Raw CSV row matching the scenario file columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: u32,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "AnnualRatePercent")]
    annual_rate_percent: f64,
    #[serde(rename = "TermYears")]
    term_years: u32,
    #[serde(rename = "ExtraMonths", default)]
    extra_months: u32,
    #[serde(rename = "StartDate")]
    start_date: String,
    #[serde(rename = "Frequency")]
    frequency: String,
}

impl CsvRow {
    fn into_scenario(self) -> Result<LoanScenario, LoadError> {
        let frequency: Frequency =
            self.frequency
                .parse()
                .map_err(|_| LoadError::UnknownFrequency {
                    scenario_id: self.scenario_id,
                    value: self.frequency.clone(),
                })?;

        let start_date = NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d").map_err(
            |_| LoadError::InvalidDate {
                scenario_id: self.scenario_id,
                value: self.start_date.clone(),
            },
        )?;

        Ok(LoanScenario {
            scenario_id: self.scenario_id,
            params: LoanParameters {
                principal: self.principal,
                annual_rate_percent: self.annual_rate_percent,
                term_years: self.term_years,
                extra_months: self.extra_months,
                start_date,
                frequency,
            },
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<LoanScenario>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer, request body)
pub fn load_scenarios_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<LoanScenario>, LoadError> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(
    mut reader: Reader<R>,
) -> Result<Vec<LoanScenario>, LoadError> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    log::debug!("loaded {} loan scenarios", scenarios.len());
    Ok(scenarios)
}
