//! Configuration management for the image asset store
//!
//! The asset root and public prefix are read once at startup and injected
//! into every component at construction; nothing is global or mutable
//! afterwards.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Image store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ImageStoreConfig {
    /// Directory all product image folders live under
    pub asset_root: String,

    /// URL prefix the backend serves the asset root at
    pub public_prefix: String,
}

impl ImageStoreConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config"))
            .add_source(Environment::with_prefix("CATALOG"))
            .build()?;

        let config: ImageStoreConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Construct directly, for embedding and tests
    pub fn new(asset_root: &str, public_prefix: &str) -> Self {
        Self {
            asset_root: asset_root.to_string(),
            public_prefix: public_prefix.to_string(),
        }
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.asset_root.trim().is_empty() {
            return Err(ConfigError::Message("asset_root cannot be empty".into()));
        }

        if !self.public_prefix.starts_with('/') || self.public_prefix.trim_matches('/').is_empty() {
            return Err(ConfigError::Message(
                "public_prefix must start with '/' and name at least one segment".into(),
            ));
        }

        Ok(())
    }

    /// Get the asset root as PathBuf
    pub fn asset_root_path(&self) -> PathBuf {
        PathBuf::from(&self.asset_root)
    }
}
