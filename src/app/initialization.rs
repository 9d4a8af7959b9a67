//! Application initialization and configuration

use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use std::str::FromStr;

use crate::cli::Args;
use crate::config::ConfigManager;
use crate::demo::{parse_payload_entry, DemoConfig};
use crate::logging::{self, LogConfig, LogDestination, LogFormat};

pub fn load_configuration(args: &Args) -> Result<ConfigManager> {
    let mut manager = match &args.config_file {
        Some(config_file) => ConfigManager::load_from_file(config_file.clone())?,
        None => ConfigManager::load()?,
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

/// Resolve logging settings: CLI flags, then config file, then defaults
pub fn configure_logging(args: &Args, config: &ConfigManager) -> Result<LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        config
            .get_log_level("base", "console-level")
            .context("Invalid console-level in configuration")?
            .unwrap_or(LevelFilter::Info)
    };

    let format = match args.log_format.as_deref().or_else(|| config.get_value("base", "log-format").map(String::as_str)) {
        Some(format_str) => LogFormat::from_str(format_str).map_err(|e| anyhow::anyhow!(e))?,
        None => LogFormat::Text,
    };

    let log_file_path = args.log_file.clone().or_else(|| config.get_path("base", "log-file"));

    let file_level = match &args.log_file_level {
        Some(level_str) => Some(logging::parse_log_level(level_str)?),
        None => config
            .get_log_level("base", "file-level")
            .context("Invalid file-level in configuration")?,
    };

    let (destination, file_level) = match log_file_path {
        Some(path) => {
            let level = file_level.unwrap_or(console_level);
            debug!("File logging enabled: {} (level: {:?})", path.display(), level);
            (LogDestination::Both(path), Some(level))
        }
        None => (LogDestination::Console, None),
    };

    Ok(LogConfig {
        console_level,
        file_level,
        format,
        destination,
    })
}

/// Resolve demo settings: CLI arguments override the config file
pub fn resolve_demo_config(args: &Args, config: &ConfigManager) -> Result<DemoConfig> {
    let mut demo = config.get_demo_config()?;

    if let Some(customers) = args.customers {
        demo.customers = customers;
    }
    if let Some(orders) = args.orders {
        demo.orders = orders;
    }
    if args.stay_subscribed {
        demo.stay_subscribed = true;
    }
    for entry in &args.payload {
        let (key, value) = parse_payload_entry(entry)
            .ok_or_else(|| anyhow::anyhow!("Invalid payload '{}'. Expected KEY=VALUE", entry))?;
        demo.user_info.insert(key, value);
    }

    debug!("Demo configuration: {:?}", demo);
    Ok(demo)
}
