//! Configuration management for auctionsphere
//!
//! This module handles loading, validation, and management of
//! auctionsphere configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigErrorSeverity, ConfigResult};

// ==================== Configuration Types ====================

/// Persistent key-value storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the key-value store
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/storage.json")
}

/// Navigation targets, as page file names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    #[serde(default = "default_home_page")]
    pub home: String,
    #[serde(default = "default_login_page")]
    pub login: String,
    #[serde(default = "default_admin_page")]
    pub admin_dashboard: String,
    #[serde(default = "default_seller_page")]
    pub seller_dashboard: String,
    /// Buyers (and any unrecognised role) land here
    #[serde(default = "default_browse_page")]
    pub browse: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            home: default_home_page(),
            login: default_login_page(),
            admin_dashboard: default_admin_page(),
            seller_dashboard: default_seller_page(),
            browse: default_browse_page(),
        }
    }
}

fn default_home_page() -> String {
    "index.html".to_string()
}

fn default_login_page() -> String {
    "login.html".to_string()
}

fn default_admin_page() -> String {
    "admin.html".to_string()
}

fn default_seller_page() -> String {
    "seller.html".to_string()
}

fn default_browse_page() -> String {
    "auction.html".to_string()
}

/// Alert banner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Seconds before an alert removes itself
    #[serde(default = "default_dismiss_after")]
    pub dismiss_after_secs: u64,
    /// Class name of the container alerts are inserted into
    #[serde(default = "default_container_class")]
    pub container_class: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            dismiss_after_secs: default_dismiss_after(),
            container_class: default_container_class(),
        }
    }
}

fn default_dismiss_after() -> u64 {
    5
}

fn default_container_class() -> String {
    "container".to_string()
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol prefixed to every amount
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_symbol() -> String {
    "₹".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Navigation targets
    #[serde(default)]
    pub pages: PagesConfig,
    /// Alert settings
    #[serde(default)]
    pub alerts: AlertConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        let pages = [
            ("pages.home", &self.pages.home),
            ("pages.login", &self.pages.login),
            ("pages.admin_dashboard", &self.pages.admin_dashboard),
            ("pages.seller_dashboard", &self.pages.seller_dashboard),
            ("pages.browse", &self.pages.browse),
        ];
        for (field, value) in pages {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "Page name must not be empty".to_string(),
                });
            }
        }

        if self.alerts.dismiss_after_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "alerts.dismiss_after_secs".to_string(),
                reason: "Dismiss delay must be greater than 0".to_string(),
            });
        }

        if self.alerts.container_class.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "alerts.container_class".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the storage file
    pub fn storage_path(&self) -> PathBuf {
        self.storage.path.clone()
    }
}

// ==================== Tests ====================
