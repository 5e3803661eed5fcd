//! CSV rendering of a computed schedule
//!
//! Every figure written here is the engine's own per-record value. Rounding
//! to two decimals happens only in this module.

use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::scenario::ScenarioOutcome;
use crate::schedule::ScheduleResult;

/// Day-first date format used in exported schedules
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Serialize)]
struct MonthlyRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Installment")]
    installment: String,
    #[serde(rename = "Principal")]
    principal: String,
    #[serde(rename = "Interest")]
    interest: String,
    #[serde(rename = "Balance")]
    balance: String,
}

#[derive(Serialize)]
struct PeriodRow {
    #[serde(rename = "Period")]
    period: u32,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Principal")]
    principal: String,
    #[serde(rename = "Interest")]
    interest: String,
    #[serde(rename = "Balance")]
    balance: String,
}

#[derive(Serialize)]
struct ScenarioRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: u32,
    #[serde(rename = "Frequency")]
    frequency: String,
    #[serde(rename = "Months")]
    months: Option<u32>,
    #[serde(rename = "Installment")]
    installment: Option<String>,
    #[serde(rename = "TotalPayment")]
    total_payment: Option<String>,
    #[serde(rename = "TotalInterest")]
    total_interest: Option<String>,
    #[serde(rename = "Periods")]
    periods: Option<usize>,
    #[serde(rename = "Status")]
    status: String,
}

/// Money to two decimals
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Write the full monthly schedule
pub fn write_monthly_schedule<W: Write>(
    result: &ScheduleResult,
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in &result.monthly {
        wtr.serialize(MonthlyRow {
            month: record.month,
            date: format_date(record.date),
            installment: format_money(record.installment),
            principal: format_money(record.principal_portion),
            interest: format_money(record.interest_portion),
            balance: format_money(record.remaining_balance),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the periodic view at the result's frequency
pub fn write_period_schedule<W: Write>(
    result: &ScheduleResult,
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in &result.periods {
        wtr.serialize(PeriodRow {
            period: record.period,
            date: format_date(record.date),
            principal: format_money(record.principal_portion),
            interest: format_money(record.interest_portion),
            balance: format_money(record.balance),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write one summary line per batch scenario
pub fn write_scenario_summaries<W: Write>(
    outcomes: &[ScenarioOutcome],
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for outcome in outcomes {
        let row = match &outcome.result {
            Some(result) => ScenarioRow {
                scenario_id: outcome.scenario_id,
                frequency: result.frequency.to_string(),
                months: Some(result.total_months()),
                installment: Some(format_money(result.installment_amount)),
                total_payment: Some(format_money(result.total_payment)),
                total_interest: Some(format_money(result.total_interest)),
                periods: Some(result.periods.len()),
                status: "ok".to_string(),
            },
            None => ScenarioRow {
                scenario_id: outcome.scenario_id,
                frequency: outcome.frequency.to_string(),
                months: None,
                installment: None,
                total_payment: None,
                total_interest: None,
                periods: None,
                status: "no result".to_string(),
            },
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the monthly schedule to a file
pub fn write_monthly_schedule_to_path<P: AsRef<Path>>(
    result: &ScheduleResult,
    path: P,
) -> Result<(), ExportError> {
    write_monthly_schedule(result, File::create(path)?)
}

/// Write the periodic view to a file
pub fn write_period_schedule_to_path<P: AsRef<Path>>(
    result: &ScheduleResult,
    path: P,
) -> Result<(), ExportError> {
    write_period_schedule(result, File::create(path)?)
}
