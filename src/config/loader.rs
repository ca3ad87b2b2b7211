//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, FinancialPolicy, ServerSettings};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml   # Rates, multipliers and rounding (required)
/// └── server.yaml   # Bind address (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use labor_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Social charges: {}", loader.policy().social_charge_rate);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `policy.yaml` is missing or if any present file
    /// contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<FinancialPolicy>(&path.join("policy.yaml"))?;

        let server_path = path.join("server.yaml");
        let server = if server_path.exists() {
            Self::load_yaml::<ServerSettings>(&server_path)?
        } else {
            ServerSettings::default()
        };

        Ok(Self {
            config: EngineConfig::new(policy, server),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the financial policy.
    pub fn policy(&self) -> &FinancialPolicy {
        self.config.policy()
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerSettings {
        self.config.server()
    }
}
