//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the
//! `PRICING_CATALOG` prefix and nested keys use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use pricing_catalog::adapters::postgres::PostgresCatalog;
//! use pricing_catalog::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! let store = PostgresCatalog::connect(&config.database).expect("Failed to build pool");
//! ```

mod database;
mod error;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present (for development)
    /// 2. Reads environment variables with the `PRICING_CATALOG` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PRICING_CATALOG__DATABASE__URL=...` -> `database.url = ...`
    /// - `PRICING_CATALOG__DATABASE__MAX_CONNECTIONS=30`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PRICING_CATALOG")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        Ok(())
    }
}
