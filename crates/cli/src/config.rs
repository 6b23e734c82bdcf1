//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VANILLA_GROVE_DATA_DIR` - Directory cart state is persisted under
//!   (default: `.vanilla-grove`)
//! - `VANILLA_GROVE_CURRENCY` - Default display currency, `LKR` or `USD`
//!   (default: `LKR`)

use std::path::PathBuf;

use thiserror::Error;
use vanilla_grove_core::Currency;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory the file-backed cart storage writes into
    pub data_dir: PathBuf,
    /// Currency used when a command does not pass one explicitly
    pub currency: Currency,
}

impl CliConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when `VANILLA_GROVE_CURRENCY` is set to an
    /// unsupported code.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = std::env::var_os("VANILLA_GROVE_DATA_DIR")
            .map_or_else(|| PathBuf::from(".vanilla-grove"), PathBuf::from);

        let currency = match std::env::var("VANILLA_GROVE_CURRENCY") {
            Ok(raw) => raw
                .parse()
                .map_err(|e: vanilla_grove_core::CurrencyError| {
                    ConfigError::InvalidEnvVar("VANILLA_GROVE_CURRENCY", e.to_string())
                })?,
            Err(_) => Currency::default(),
        };

        Ok(Self { data_dir, currency })
    }
}
