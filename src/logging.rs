// Logging for typed-notify
//
// Records from the `log` facade are written as text or JSON lines to the
// console (stderr), a file, or both. Console and file levels are independent.
//
// ```
// let config = LogConfig {
//     console_level: LevelFilter::Info,
//     file_level: Some(LevelFilter::Trace),
//     format: LogFormat::Json,
//     destination: LogDestination::Both(PathBuf::from("notify.log")),
// };
// init_logger(config)?;
// ```

use log::{Level, LevelFilter, Record};
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use parking_lot::Mutex;
use anyhow::{Context, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}. Valid options: text, json", s)),
        }
    }
}

/// Log destination options
#[derive(Debug, Clone, PartialEq)]
pub enum LogDestination {
    Console,
    File(PathBuf),
    Both(PathBuf),
}

impl LogDestination {
    fn file_path(&self) -> Option<&Path> {
        match self {
            LogDestination::Console => None,
            LogDestination::File(path) | LogDestination::Both(path) => Some(path),
        }
    }

    fn includes_console(&self) -> bool {
        !matches!(self, LogDestination::File(_))
    }
}

/// One JSON log line
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub console_level: LevelFilter,
    pub file_level: Option<LevelFilter>,
    pub format: LogFormat,
    pub destination: LogDestination,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::Info,
            file_level: None,
            format: LogFormat::Text,
            destination: LogDestination::Console,
        }
    }
}

impl LogConfig {
    /// Most verbose level any destination accepts
    pub fn max_level(&self) -> LevelFilter {
        match self.file_level {
            Some(file_level) if file_level > self.console_level => file_level,
            _ => self.console_level,
        }
    }
}

/// `log::Log` implementation writing to the configured destinations
pub struct NotifyLogger {
    config: LogConfig,
    file: Option<Mutex<File>>,
}

impl NotifyLogger {
    /// Build a logger, opening the log file up front if one is configured
    pub fn new(config: LogConfig) -> Result<Self> {
        let file = match config.destination.file_path() {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open log file: {}", path.display()))?;
                Some(Mutex::new(file))
            }
            None => None,
        };
        Ok(Self { config, file })
    }

    fn format_timestamp() -> String {
        let now: DateTime<Local> = Local::now();
        now.format(TIMESTAMP_FORMAT).to_string()
    }

    fn format_text(&self, level: Level, target: &str, message: &str) -> String {
        format!(
            "{} [{}] {}: {}",
            Self::format_timestamp(),
            level.as_str(),
            target,
            message
        )
    }

    fn format_json(&self, level: Level, target: &str, message: &str) -> Result<String> {
        let entry = JsonLogEntry {
            timestamp: Self::format_timestamp(),
            level: level.as_str().to_string(),
            target: target.to_string(),
            message: message.to_string(),
        };
        serde_json::to_string(&entry).context("Failed to serialize log entry to JSON")
    }

    fn format_record(&self, record: &Record) -> String {
        let message = record.args().to_string();
        let level = record.level();
        let target = record.target();

        match self.config.format {
            LogFormat::Text => self.format_text(level, target, &message),
            LogFormat::Json => self
                .format_json(level, target, &message)
                .unwrap_or_else(|_| self.format_text(level, target, &message)),
        }
    }

    fn console_accepts(&self, level: Level) -> bool {
        self.config.destination.includes_console() && level <= self.config.console_level
    }

    fn file_accepts(&self, level: Level) -> bool {
        self.file.is_some() && self.config.file_level.is_some_and(|file_level| level <= file_level)
    }

    fn write_to_file(&self, line: &str) -> io::Result<()> {
        match &self.file {
            Some(file) => writeln!(file.lock(), "{}", line),
            None => Ok(()),
        }
    }
}

impl log::Log for NotifyLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.console_accepts(metadata.level()) || self.file_accepts(metadata.level())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_record(record);
        let level = record.level();

        if self.console_accepts(level) {
            let _ = writeln!(io::stderr(), "{}", line);
        }
        if self.file_accepts(level) {
            if let Err(e) = self.write_to_file(&line) {
                eprintln!("File logging error: {}", e);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Install the global logger
pub fn init_logger(config: LogConfig) -> Result<()> {
    let max_level = config.max_level();
    let logger = NotifyLogger::new(config)?;

    log::set_boxed_logger(Box::new(logger)).context("Failed to set global logger")?;
    log::set_max_level(max_level);

    Ok(())
}

/// Convert string to LevelFilter
pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    level_str.parse::<LevelFilter>().map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: {}. Valid levels: error, warn, info, debug, trace, off",
            level_str
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use tempfile::TempDir;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error").unwrap(), LevelFilter::Error);
        assert_eq!(parse_log_level("TRACE").unwrap(), LevelFilter::Trace);
        assert_eq!(parse_log_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_max_level_takes_most_verbose() {
        let config = LogConfig {
            console_level: LevelFilter::Warn,
            file_level: Some(LevelFilter::Debug),
            ..LogConfig::default()
        };
        assert_eq!(config.max_level(), LevelFilter::Debug);
        assert_eq!(LogConfig::default().max_level(), LevelFilter::Info);
    }

    #[test]
    fn test_text_formatting() {
        let logger = NotifyLogger::new(LogConfig::default()).unwrap();
        let line = logger.format_text(Level::Info, "typed_notify::demo", "Mmm... Coffee");

        assert!(line.contains("[INFO] typed_notify::demo: Mmm... Coffee"));
        assert_eq!(line.chars().nth(4), Some('-'));
        assert_eq!(line.chars().nth(10), Some(' '));
        assert_eq!(line.chars().nth(13), Some(':'));
    }

    #[test]
    fn test_json_formatting() {
        let logger = NotifyLogger::new(LogConfig::default()).unwrap();
        let line = logger.format_json(Level::Debug, "center", "Posted").unwrap();

        let entry: JsonLogEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(entry.level, "DEBUG");
        assert_eq!(entry.target, "center");
        assert_eq!(entry.message, "Posted");
        assert_eq!(entry.timestamp.len(), 19);
    }

    #[test]
    fn test_file_destination_levels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notify.log");
        let logger = NotifyLogger::new(LogConfig {
            console_level: LevelFilter::Off,
            file_level: Some(LevelFilter::Debug),
            format: LogFormat::Text,
            destination: LogDestination::File(path.clone()),
        })
        .unwrap();

        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("test")
                .args(format_args!("kept"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Trace)
                .target("test")
                .args(format_args!("filtered"))
                .build(),
        );
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[DEBUG] test: kept"));
        assert!(!contents.contains("filtered"));
    }
}
