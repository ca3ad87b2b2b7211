//! Configuration loading and management for the labor engine.
//!
//! This module loads the financial policy (social charge rate, overtime
//! multiplier, rounding granularity and the other numeric constants) and the
//! server settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use labor_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Overtime multiplier: {}", config.policy().overtime_multiplier);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, FinancialPolicy, ServerSettings};
