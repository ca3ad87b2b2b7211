//! Configuration types for payroll and liquidation policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric policy applied by the payroll, finance and liquidation calculations.
///
/// Every field has a default, so a policy file only needs to list the values
/// it overrides.
///
/// # Example
///
/// ```
/// use labor_engine::config::FinancialPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = FinancialPolicy::default();
/// assert_eq!(policy.social_charge_rate, Decimal::new(917, 4));
/// assert_eq!(policy.rounding_granularity, Decimal::from(100));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialPolicy {
    /// Fraction of gross salary withheld as social charges.
    pub social_charge_rate: Decimal,
    /// Multiplier applied to the hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
    /// Gross salary and social charges are rounded to a multiple of this amount.
    pub rounding_granularity: Decimal,
    /// Average month length used to turn a day count into months worked.
    pub days_per_month: Decimal,
    /// Days per month used to derive a daily salary from a monthly one.
    pub salary_days_per_month: Decimal,
    /// Paid hours per working day.
    pub standard_daily_hours: Decimal,
    /// Months over which the year-end bonus accrues.
    pub aguinaldo_months: Decimal,
    /// Employer contribution rate shown in period summaries.
    pub employer_charge_rate: Decimal,
    /// Provisions rate shown in period summaries.
    pub provisions_rate: Decimal,
    /// Refuse to open a payroll period that overlaps an existing one.
    pub reject_overlapping_periods: bool,
}

impl Default for FinancialPolicy {
    fn default() -> Self {
        Self {
            social_charge_rate: Decimal::new(917, 4),
            overtime_multiplier: Decimal::new(15, 1),
            rounding_granularity: Decimal::from(100),
            days_per_month: Decimal::new(3044, 2),
            salary_days_per_month: Decimal::from(30),
            standard_daily_hours: Decimal::from(8),
            aguinaldo_months: Decimal::from(12),
            employer_charge_rate: Decimal::new(2667, 4),
            provisions_rate: Decimal::new(18, 2),
            reject_overlapping_periods: true,
        }
    }
}

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address the server binds to.
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// The complete engine configuration loaded from a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    policy: FinancialPolicy,
    server: ServerSettings,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(policy: FinancialPolicy, server: ServerSettings) -> Self {
        Self { policy, server }
    }

    /// Returns the financial policy.
    pub fn policy(&self) -> &FinancialPolicy {
        &self.policy
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerSettings {
        &self.server
    }
}
