//! # Configuration State
//!
//! Store settings and the calculator catalog, loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Command-line flags        --config PATH, --db PATH                 │
//! │  2. Environment variables     GORENT_CONFIG, GORENT_DB_PATH,           │
//! │                               GORENT_STORE_NAME                        │
//! │  3. TOML file                 ~/.config/gorent/config.toml (Linux)     │
//! │  4. Defaults                  launch catalog, IDR, "GO-RENT"           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Format
//! ```toml
//! store_name = "GO-RENT Bali"
//! database_path = "/var/lib/gorent/gorent.db"
//!
//! [[vehicles]]
//! id = "avanza"
//! name = "Toyota Avanza"
//! type = "car"
//! price_per_day = 350000
//! stock = 5
//!
//! [[discounts]]
//! min_days = 7
//! percentage = 15
//! name = "Gold Discount"
//! ```
//!
//! Every section is optional; anything left out keeps its default. The
//! configuration is read-only after loading.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use gorent_core::{CalculatorConfig, CoreError, Money};

/// Environment variable pointing at the config file.
pub const ENV_CONFIG: &str = "GORENT_CONFIG";
/// Environment variable overriding the database path.
pub const ENV_DB_PATH: &str = "GORENT_DB_PATH";
/// Environment variable overriding the store name.
pub const ENV_STORE_NAME: &str = "GORENT_STORE_NAME";

const DATABASE_FILE: &str = "gorent.db";
const CONFIG_FILE: &str = "config.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Cannot render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("{0}")]
    Invalid(String),

    /// No home directory to derive default paths from.
    #[error("Could not determine the application directories; pass --db")]
    NoProjectDirs,
}

impl From<CoreError> for ConfigError {
    fn from(err: CoreError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigState {
    /// Printed at the top of receipts.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// SQLite file. Default: `<data dir>/gorent.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Vehicles, discount tiers, validation rules and currency.
    #[serde(flatten)]
    pub calculator: CalculatorConfig,
}

fn default_store_name() -> String {
    "GO-RENT".to_string()
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: default_store_name(),
            database_path: None,
            calculator: CalculatorConfig::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file and environment.
    ///
    /// ## Steps
    /// 1. Pick the file: `path`, else `$GORENT_CONFIG`, else the default location
    /// 2. Parse it if it exists (an explicitly named file must exist)
    /// 3. Apply environment overrides
    /// 4. Validate
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = path.or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from));

        let mut config = match &explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies overrides from a variable lookup (normally the environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup(ENV_STORE_NAME).filter(|n| !n.trim().is_empty()) {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }
    }

    /// Checks the store settings and the catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }
        self.calculator.validate()?;
        Ok(())
    }

    /// Database file to open: the configured one or the platform default.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
                .ok_or(ConfigError::NoProjectDirs),
        }
    }

    /// Default config file location.
    ///
    /// - **Linux**: `~/.config/gorent/config.toml`
    /// - **macOS**: `~/Library/Application Support/com.go-rent.gorent/config.toml`
    /// - **Windows**: `%APPDATA%\go-rent\gorent\config\config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Formats an amount in the configured currency, e.g. `Rp 2.082.500`.
    pub fn format_currency(&self, amount: Money) -> String {
        self.calculator.currency.format(amount)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "go-rent", "gorent")
}
