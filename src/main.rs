use anyhow::Result;
use log::{error, warn};
use std::process;

use typed_notify::notifications::NotificationCenter;
use typed_notify::{app, cli, logging};

fn main() {
    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args();
    cli::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config)?;

    if !NotificationCenter::init_shared(config_manager.get_center_config()?) {
        warn!("Shared notification center already initialised; [center] settings ignored");
    }
    let center = NotificationCenter::shared();

    let result = app::run_demo_command(&args, &config_manager, center);

    // Process is exiting; the shared center goes with it
    center.shutdown();
    result.map(|_| ())
}
