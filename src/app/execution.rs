//! Demo execution

use anyhow::{Context, Result};
use log::info;

use crate::cli::Args;
use crate::config::ConfigManager;
use crate::demo::{self, DemoReport};
use crate::notifications::{self, NotificationCenter};

/// Run the coffee shop demo against `center` and print the report.
///
/// The center is left running; tearing it down belongs to its owner.
pub fn run_demo_command(args: &Args, config: &ConfigManager, center: &NotificationCenter) -> Result<DemoReport> {
    let demo_config = super::resolve_demo_config(args, config)?;
    info!("{}", notifications::get_system_info());

    let report = demo::run_demo(center, &demo_config);

    if args.report_json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize demo report")?;
        println!("{}", json);
    } else {
        println!(
            "{} order(s) posted, {} cup(s) drunk by {} customer(s), {} registration(s) left",
            report.orders_posted,
            report.total_cups(),
            report.cups_per_customer.len(),
            report.registrations_left
        );
    }

    Ok(report)
}
