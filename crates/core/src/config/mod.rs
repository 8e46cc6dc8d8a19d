//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PORTAL_*)
//! 2. TOML config file (if PORTAL_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PORTAL_*)
/// 2. TOML config file (if PORTAL_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Directory holding the cache bucket database files.
    ///
    /// Set via PORTAL_DATA_DIR environment variable.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Logical name of the cache bucket.
    ///
    /// Set via PORTAL_BUCKET environment variable.
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// User-Agent string for outbound requests.
    ///
    /// Set via PORTAL_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./portal-data")
}

fn default_bucket() -> String {
    "portal-cache".into()
}

fn default_user_agent() -> String {
    "portal-gateway/0.1".into()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), bucket: default_bucket(), user_agent: default_user_agent() }
    }
}

impl PortalConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `PORTAL_`
    /// 2. TOML file from `PORTAL_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PORTAL_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("PORTAL_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
