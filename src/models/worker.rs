//! Worker model and related types.
//!
//! Only the attributes the payroll and liquidation calculations read are
//! modelled here; everything else about a user belongs to the user-management
//! collaborator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Role, UserId};

/// Employment status of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    /// Currently employed.
    Active,
    /// Disabled without a settlement.
    Inactive,
    /// Separated with a recorded liquidation.
    Liquidated,
}

/// A person whose hours are paid through payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier (same id space as callers).
    pub id: UserId,
    /// Display name.
    pub full_name: String,
    /// The worker's role in the application.
    pub role: Role,
    /// Hourly pay rate; payroll treats a missing rate as zero.
    pub hourly_rate: Option<Decimal>,
    /// Monthly salary, used for liquidation estimates.
    pub monthly_salary: Option<Decimal>,
    /// Start of the current employment span.
    pub start_date: Option<NaiveDate>,
    /// Whether social charges are withheld from this worker's pay.
    #[serde(default = "default_apply_deductions")]
    pub apply_deductions: bool,
    /// Employment status.
    pub status: WorkerStatus,
    /// Login flag mirrored from the status.
    pub is_active: bool,
}

fn default_apply_deductions() -> bool {
    true
}

impl Worker {
    /// Creates an active worker with no rates set.
    pub fn new(id: UserId, full_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            role,
            hourly_rate: None,
            monthly_salary: None,
            start_date: None,
            apply_deductions: true,
            status: WorkerStatus::Active,
            is_active: true,
        }
    }

    /// Returns the hourly rate used for payroll, zero when unset.
    pub fn payroll_rate(&self) -> Decimal {
        self.hourly_rate.unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the worker has been liquidated.
    pub fn is_liquidated(&self) -> bool {
        self.status == WorkerStatus::Liquidated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payroll_rate_defaults_to_zero() {
        let worker = Worker::new(1, "Ana Mora", Role::Worker);
        assert_eq!(worker.payroll_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_worker_defaults_deductions_on() {
        let json = r#"{
            "id": 3,
            "full_name": "Luis Vega",
            "role": "worker",
            "hourly_rate": "5000",
            "monthly_salary": null,
            "start_date": "2025-01-01",
            "status": "active",
            "is_active": true
        }"#;

        let worker: Worker = serde_json::from_str(json).unwrap();
        assert!(worker.apply_deductions);
        assert_eq!(worker.hourly_rate, Some(Decimal::from(5000)));
        assert_eq!(worker.start_date, NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&WorkerStatus::Liquidated).unwrap(),
            "\"liquidated\""
        );
    }
}
