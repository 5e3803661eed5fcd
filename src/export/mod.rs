//! Read-only renderings of computed schedules

pub mod csv_out;

pub use csv_out::{
    format_date, format_money, write_monthly_schedule, write_monthly_schedule_to_path,
    write_period_schedule, write_period_schedule_to_path, write_scenario_summaries,
};
