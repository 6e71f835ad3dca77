//! Configuration management for the demo.
//!
//! Loads settings from a TOML file, writing a default file when none exists.

use priority_events::EmitterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Default for orders
fn default_orders() -> u32 {
    12
}

/// Default for extra_auditors
fn default_extra_auditors() -> usize {
    9
}

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Emitter settings passed straight to the library
    #[serde(default)]
    pub emitter: EmitterConfig,
    /// Logging configuration settings
    pub logging: LoggingSettings,
    /// Scenario settings
    #[serde(default)]
    pub demo: DemoSettings,
}

/// Logging configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter used when `RUST_LOG` is unset
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

/// Order pipeline scenario settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoSettings {
    /// Number of orders emitted
    #[serde(default = "default_orders")]
    pub orders: u32,
    /// Audit listeners added on top of the pipeline, used to exercise the listener ceiling
    #[serde(default = "default_extra_auditors")]
    pub extra_auditors: usize,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            orders: default_orders(),
            extra_auditors: default_extra_auditors(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            emitter: EmitterConfig::default(),
            logging: LoggingSettings {
                level: "info".to_string(),
                json_format: false,
            },
            demo: DemoSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, creates a default configuration file at the
    /// specified path and returns the default configuration.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, toml_content)?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        if self.demo.orders == 0 {
            return Err("demo.orders must be greater than 0".to_string());
        }

        Ok(())
    }
}
