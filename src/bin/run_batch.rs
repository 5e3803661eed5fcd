//! Run schedules for every scenario in a CSV file
//!
//! Outputs one summary row per scenario

use anyhow::{Context, Result};
use clap::Parser;
use emi_schedule::export::write_scenario_summaries;
use emi_schedule::loan::load_scenarios;
use emi_schedule::{ScenarioRunner, ScheduleConfig};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

/// Compute loan schedules for a batch of scenarios
#[derive(Parser, Debug)]
#[command(name = "run_batch", version)]
struct Args {
    /// Scenario CSV; columns as read by `load_scenarios`
    #[arg(long, default_value = "loan_scenarios.csv")]
    input: PathBuf,

    /// Summary CSV to write
    #[arg(long, default_value = "batch_schedule_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input.display());

    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("loading scenarios from {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::with_config(ScheduleConfig::from_env());

    println!("Computing schedules...");
    let run_start = Instant::now();
    let outcomes = runner.run_batch(&scenarios);
    println!("Schedules complete in {:?}", run_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_scenario_summaries(&outcomes, file)?;
    println!("Output written to {}", args.output.display());

    let computed: Vec<_> = outcomes.iter().filter_map(|o| o.result.as_ref()).collect();
    let total_principal: f64 = computed.iter().map(|r| r.principal()).sum();
    let total_interest: f64 = computed.iter().map(|r| r.total_interest).sum();

    println!("\nBatch Summary:");
    println!("  Scenarios:        {}", outcomes.len());
    println!("  With schedule:    {}", computed.len());
    println!("  Without schedule: {}", outcomes.len() - computed.len());
    println!("  Total principal:  {:.2}", total_principal);
    println!("  Total interest:   {:.2}", total_interest);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
