use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use toml::Value;
use log::{debug, info};

use crate::demo::{parse_payload_entry, DemoConfig};
use crate::notifications::CenterConfig;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TYPED_NOTIFY_CONFIG";

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

/// Configuration manager
pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    /// Create a ConfigManager from an already parsed configuration
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load the first configuration file found on the discovery path
    pub fn load() -> Result<Self> {
        debug!("Starting configuration discovery");

        for path in discover_config_files() {
            debug!("Checking for config at: {}", path.display());
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        info!("No configuration file found, using defaults");
        Ok(Self::from_config(Configuration::new()))
    }

    /// Load configuration from explicit file path
    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    pub fn config_file_path(&self) -> Option<&PathBuf> {
        self.config_file_path.as_ref()
    }

    /// Get value with section fallback: selected section, then `section`, then `base`
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        if let Some(selected) = &self.selected_section {
            if let Some(value) = self.config.get(selected).and_then(|s| s.get(key)) {
                return Some(value);
            }
        }

        if let Some(value) = self.config.get(section).and_then(|s| s.get(key)) {
            return Some(value);
        }

        self.config.get("base").and_then(|s| s.get(key))
    }

    /// Select configuration section for --config-name
    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get_value(section, key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(anyhow::anyhow!("Invalid boolean value for {}.{}: {}", section, key, value)),
            },
            None => Ok(None),
        }
    }

    pub fn get_usize(&self, section: &str, key: &str) -> Result<Option<usize>> {
        match self.get_value(section, key) {
            Some(value) => value
                .parse::<usize>()
                .map(Some)
                .with_context(|| format!("Invalid number for {}.{}: {}", section, key, value)),
            None => Ok(None),
        }
    }

    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => Ok(Some(crate::logging::parse_log_level(value)?)),
            None => Ok(None),
        }
    }

    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    /// Notification center settings from the `[center]` section
    pub fn get_center_config(&self) -> Result<CenterConfig> {
        Ok(CenterConfig {
            trace_delivery: self.get_bool("center", "trace-delivery")?.unwrap_or(false),
        })
    }

    /// Demo settings from the `[demo]` section
    pub fn get_demo_config(&self) -> Result<DemoConfig> {
        let mut config = DemoConfig::default();

        if let Some(customers) = self.get_usize("demo", "customers")? {
            config.customers = customers;
        }
        if let Some(orders) = self.get_usize("demo", "orders")? {
            config.orders = orders;
        }
        if let Some(stay) = self.get_bool("demo", "stay-subscribed")? {
            config.stay_subscribed = stay;
        }
        // `[<selected>.payload]` entries override `[demo.payload]` ones by name
        let mut payload_sections = vec!["demo.payload".to_string()];
        if let Some(selected) = &self.selected_section {
            payload_sections.push(format!("{}.payload", selected));
        }
        for section in &payload_sections {
            if let Some(payload) = self.config.get(section) {
                for (key, value) in payload {
                    let entry = format!("{}={}", key, value);
                    let (name, value) = parse_payload_entry(&entry)
                        .ok_or_else(|| anyhow::anyhow!("Invalid payload entry in [{}]: {}", section, entry))?;
                    config.user_info.insert(name, value);
                }
            }
        }

        Ok(config)
    }
}

/// Configuration file candidates in order of precedence
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("typed-notify").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".typed-notify.toml"));
    }

    paths.push(PathBuf::from("./.typed-notify.toml"));

    debug!("Config discovery paths: {:?}", paths);
    paths
}

/// Parse TOML content to string-based configuration
pub fn parse_toml_config(content: &str) -> Result<Configuration> {
    let toml_value: Value = content.parse().context("Failed to parse TOML content")?;

    let mut config = Configuration::new();
    if let Value::Table(table) = toml_value {
        flatten_toml_table(&table, String::new(), &mut config);
    }

    debug!("Parsed configuration: {:?}", config);
    Ok(config)
}

/// Flatten nested tables into `section.subsection` names.
///
/// Scalars sit in their enclosing table's section; top-level scalars land in `base`.
fn flatten_toml_table(table: &toml::Table, prefix: String, config: &mut Configuration) {
    for (key, value) in table {
        match value {
            Value::Table(subtable) => {
                let section_name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_toml_table(subtable, section_name, config);
            }
            _ => {
                let section_name = if prefix.is_empty() { "base".to_string() } else { prefix.clone() };
                config
                    .entry(section_name)
                    .or_default()
                    .insert(key.clone(), toml_value_to_string(value));
            }
        }
    }
}

/// Convert TOML Value to string representation
fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::PayloadValue;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_toml_value_to_string_conversion() {
        assert_eq!(toml_value_to_string(&Value::String("espresso".to_string())), "espresso");
        assert_eq!(toml_value_to_string(&Value::Integer(42)), "42");
        assert_eq!(toml_value_to_string(&Value::Float(2.5)), "2.5");
        assert_eq!(toml_value_to_string(&Value::Boolean(true)), "true");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_content = r#"
log-format = "json"

[base]
console-level = "debug"

[demo]
customers = 3

[demo.payload]
size = "large"
shots = 2
"#;

        let config = parse_toml_config(toml_content).unwrap();

        assert_eq!(config["base"]["log-format"], "json");
        assert_eq!(config["base"]["console-level"], "debug");
        assert_eq!(config["demo"]["customers"], "3");
        assert_eq!(config["demo.payload"]["size"], "large");
        assert_eq!(config["demo.payload"]["shots"], "2");
    }

    #[test]
    fn test_section_fallback_and_selection() {
        let mut config = Configuration::new();
        config.insert("base".to_string(), HashMap::from([("orders".to_string(), "1".to_string())]));
        config.insert("rush".to_string(), HashMap::from([("orders".to_string(), "9".to_string())]));

        let mut manager = ConfigManager::from_config(config);
        assert_eq!(manager.get_value("demo", "orders").unwrap(), "1");

        manager.select_section("rush".to_string());
        assert_eq!(manager.get_value("demo", "orders").unwrap(), "9");
    }

    #[test]
    fn test_type_conversion() {
        let mut config = Configuration::new();
        config.insert(
            "base".to_string(),
            HashMap::from([
                ("flag".to_string(), "TRUE".to_string()),
                ("bad-flag".to_string(), "maybe".to_string()),
                ("count".to_string(), "4".to_string()),
                ("bad-count".to_string(), "-1".to_string()),
                ("level".to_string(), "warn".to_string()),
                ("log-file".to_string(), "/tmp/notify.log".to_string()),
            ]),
        );
        let manager = ConfigManager::from_config(config);

        assert_eq!(manager.get_bool("base", "flag").unwrap(), Some(true));
        assert!(manager.get_bool("base", "bad-flag").is_err());
        assert_eq!(manager.get_usize("base", "count").unwrap(), Some(4));
        assert!(manager.get_usize("base", "bad-count").is_err());
        assert_eq!(manager.get_usize("base", "missing").unwrap(), None);
        assert_eq!(manager.get_log_level("base", "level").unwrap(), Some(log::LevelFilter::Warn));
        assert_eq!(manager.get_path("base", "log-file"), Some(PathBuf::from("/tmp/notify.log")));
    }

    #[test]
    fn test_demo_and_center_config_from_file() {
        let toml_content = r#"
[center]
trace-delivery = true

[demo]
customers = 2
orders = 5
stay-subscribed = true

[demo.payload]
size = "small"
"#;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, toml_content).unwrap();

        let manager = ConfigManager::load_from_file(temp_file.path().to_path_buf()).unwrap();
        assert_eq!(manager.config_file_path().unwrap(), temp_file.path());

        assert!(manager.get_center_config().unwrap().trace_delivery);

        let demo = manager.get_demo_config().unwrap();
        assert_eq!(demo.customers, 2);
        assert_eq!(demo.orders, 5);
        assert!(demo.stay_subscribed);
        assert_eq!(demo.user_info.get("size"), Some(&PayloadValue::Text("small".to_string())));
    }

    #[test]
    fn test_selected_section_payload_overrides_demo_payload() {
        let toml_content = r#"
[demo]
orders = 1

[demo.payload]
size = "small"
milk = "whole"

[rush]
orders = 4

[rush.payload]
size = "large"
shots = 3
"#;

        let mut manager = ConfigManager::from_config(parse_toml_config(toml_content).unwrap());

        let plain = manager.get_demo_config().unwrap();
        assert_eq!(plain.orders, 1);
        assert_eq!(plain.user_info.get("size"), Some(&PayloadValue::Text("small".to_string())));
        assert!(plain.user_info.get("shots").is_none());

        manager.select_section("rush".to_string());
        let rush = manager.get_demo_config().unwrap();
        assert_eq!(rush.orders, 4);
        assert_eq!(rush.user_info.get("size"), Some(&PayloadValue::Text("large".to_string())));
        assert_eq!(rush.user_info.get("shots"), Some(&PayloadValue::Integer(3)));
        assert_eq!(rush.user_info.get("milk"), Some(&PayloadValue::Text("whole".to_string())));
    }

    #[test]
    fn test_empty_config_gives_defaults() {
        let manager = ConfigManager::from_config(Configuration::new());
        assert_eq!(manager.get_demo_config().unwrap(), DemoConfig::default());
        assert!(!manager.get_center_config().unwrap().trace_delivery);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, "[demo\ncustomers = ").unwrap();

        assert!(ConfigManager::load_from_file(temp_file.path().to_path_buf()).is_err());
    }
}
