use clap::{ArgAction, Parser};
use anyhow::Result;
use std::path::PathBuf;
use log::debug;

/// Typed notification demo: a barista makes coffee, customers drink it
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "typed-notify")]
#[command(about = "Typed notifications over a shared notification center: a Barista posts makeCoffee, Customers drink")]
#[command(version)]
pub struct Args {
    /// Number of customers observing the barista
    #[arg(short = 'c', long, value_name = "N")]
    pub customers: Option<usize>,

    /// Number of makeCoffee notifications to post
    #[arg(short = 'o', long, value_name = "N")]
    pub orders: Option<usize>,

    /// Leave customers subscribed at the end of the run
    #[arg(long)]
    pub stay_subscribed: bool,

    /// Payload entry attached to every order (repeatable)
    #[arg(short = 'p', long = "payload", value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub payload: Vec<String>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub report_json: bool,

    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    debug!("Validating CLI arguments: {:?}", args);

    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    if let Some(format) = &args.log_format {
        format
            .parse::<crate::logging::LogFormat>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    if let Some(level) = &args.log_file_level {
        crate::logging::parse_log_level(level)?;
        if args.log_file.is_none() {
            return Err(anyhow::anyhow!("--log-file-level requires --log-file to be specified"));
        }
    }

    for entry in &args.payload {
        if crate::demo::parse_payload_entry(entry).is_none() {
            return Err(anyhow::anyhow!("Invalid payload '{}'. Expected KEY=VALUE", entry));
        }
    }

    Ok(())
}
