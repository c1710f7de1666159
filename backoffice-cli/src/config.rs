//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! 1. Built-in defaults
//! 2. `backoffice.toml` (an explicit `--config` path, or the current directory)
//! 3. `BACKOFFICE_` environment variables, `__` separating nested keys
//!    (`BACKOFFICE_COMPANY__NAME=ACME`)

use backoffice_docs::{Company, LayoutSettings, Locale};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File looked up in the current directory when no path is given
pub const CONFIG_FILE_NAME: &str = "backoffice.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "BACKOFFICE_";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested file does not exist
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Merging or deserializing the sources failed
    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[source]
        source: Box<figment::Error>,
    },

    /// A value parsed but is not usable
    #[error("Invalid configuration value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything the binary reads from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the file store
    pub data_dir: PathBuf,
    pub locale: Locale,
    /// Issuer used when a document input leaves its company empty
    pub company: Company,
    pub layout: LayoutSettings,
    /// Default activity-log actor
    pub actor: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".backoffice"),
            locale: Locale::default(),
            company: Company::default(),
            layout: LayoutSettings::default(),
            actor: None,
        }
    }
}

impl AppConfig {
    /// Load from every source
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let config: AppConfig = Self::figment(explicit)?.extract()?;
        config.validate()?;
        debug!(data_dir = %config.data_dir.display(), locale = %config.locale, "configuration loaded");
        Ok(config)
    }

    /// The merged sources, before extraction
    pub fn figment(explicit: Option<&Path>) -> ConfigResult<Figment> {
        let file = match explicit {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILE_NAME),
        };

        Ok(Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "data_dir".into(),
                message: "cannot be empty".into(),
            });
        }
        self.layout
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: "layout".into(),
                message: e.to_string(),
            })
    }
}
