//! EMI Schedule CLI
//!
//! Command-line interface for computing a single loan schedule

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use emi_schedule::export::{self, format_date};
use emi_schedule::loan::{DEFAULT_ANNUAL_RATE_PERCENT, DEFAULT_PRINCIPAL, DEFAULT_TERM_YEARS};
use emi_schedule::{Frequency, LoanParameters, ScheduleConfig, ScheduleEngine};
use std::path::PathBuf;

/// Compute an equated-installment loan schedule
#[derive(Parser, Debug)]
#[command(name = "emi_schedule", version, about)]
struct Cli {
    /// Loan amount
    #[arg(long, default_value_t = DEFAULT_PRINCIPAL)]
    principal: f64,

    /// Annual interest rate in percent
    #[arg(long, default_value_t = DEFAULT_ANNUAL_RATE_PERCENT)]
    rate: f64,

    /// Tenure in whole years
    #[arg(long, default_value_t = DEFAULT_TERM_YEARS)]
    years: u32,

    /// Months added to the tenure
    #[arg(long, default_value_t = 0)]
    extra_months: u32,

    /// First installment date (YYYY-MM-DD)
    #[arg(long, default_value = "2026-02-12")]
    start_date: NaiveDate,

    /// monthly, quarterly or half-yearly
    #[arg(long, default_value = "monthly")]
    frequency: Frequency,

    /// Longest accepted loan in months (overrides EMI_MAX_TOTAL_MONTHS)
    #[arg(long)]
    max_months: Option<u32>,

    /// Number of schedule rows to print
    #[arg(long, default_value_t = 24)]
    rows: usize,

    /// Write the full monthly schedule to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the periodic view to this CSV file
    #[arg(long)]
    periods_csv: Option<PathBuf>,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn parameters(&self) -> LoanParameters {
        LoanParameters::new(
            self.principal,
            self.rate,
            self.years,
            self.extra_months,
            self.start_date,
            self.frequency,
        )
    }

    fn config(&self) -> ScheduleConfig {
        let mut config = ScheduleConfig::from_env();
        if let Some(max) = self.max_months {
            config.max_total_months = max;
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = cli.parameters();
    let engine = ScheduleEngine::new(cli.config());

    let result = match engine.try_compute(&params) {
        Ok(result) => result,
        Err(e) => bail!("no schedule for these parameters: {}", e),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let summary = result.summary();
    let frequency = result.frequency;

    println!(
        "Loan: {:.2} at {}% over {} months",
        params.principal, params.annual_rate_percent, summary.total_months
    );
    println!("  First installment: {}", format_date(params.start_date));
    println!(
        "  {}: {:.2} {}",
        frequency.installment_label(),
        result.installment_amount,
        frequency.period_noun()
    );
    println!("  Total Interest: {:.2}", summary.total_interest);
    println!("  Total Payment: {:.2}", summary.total_payment);
    println!(
        "  Principal / Interest: {:.1}% / {:.1}%",
        summary.principal_share_pct, summary.interest_share_pct
    );
    println!();

    println!("Yearly breakdown:");
    println!("{:>5} {:>14} {:>14} {:>14}", "Year", "Principal", "Interest", "Total");
    for year in result.yearly_breakdown() {
        println!(
            "{:>5} {:>14.2} {:>14.2} {:>14.2}",
            year.year, year.principal, year.interest, year.total
        );
    }
    println!();

    println!("Schedule ({} {} periods):", result.periods.len(), frequency);
    println!(
        "{:>6} {:>11} {:>14} {:>14} {:>14}",
        "Period", "Date", "Principal", "Interest", "Balance"
    );
    println!("{}", "-".repeat(63));
    for row in result.periods.iter().take(cli.rows) {
        println!(
            "{:>6} {:>11} {:>14.2} {:>14.2} {:>14.2}",
            row.period,
            format_date(row.date),
            row.principal_portion,
            row.interest_portion,
            row.balance,
        );
    }
    if result.periods.len() > cli.rows {
        println!("... ({} more periods)", result.periods.len() - cli.rows);
    }
    if result.tail_months() > 0 {
        println!(
            "{} trailing months do not fill a {} period; see the monthly export",
            result.tail_months(),
            frequency
        );
    }

    if let Some(path) = &cli.csv {
        export::write_monthly_schedule_to_path(&result, path)
            .with_context(|| format!("writing monthly schedule to {}", path.display()))?;
        println!("\nMonthly schedule written to: {}", path.display());
    }

    if let Some(path) = &cli.periods_csv {
        export::write_period_schedule_to_path(&result, path)
            .with_context(|| format!("writing period schedule to {}", path.display()))?;
        println!("Period schedule written to: {}", path.display());
    }

    Ok(())
}
