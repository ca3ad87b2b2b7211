//! Payroll period and payroll entry models.
//!
//! This module contains the [`PayrollPeriod`] and [`PayrollEntry`] types
//! produced by payroll generation, along with the per-period summary shown
//! in the approval view.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EntryId, PeriodId, ProjectId, UserId};

/// Lifecycle status of a payroll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Generated and still open for review.
    Draft,
    /// Signed off; never goes back to draft.
    Final,
}

/// A date range over which payroll was generated.
///
/// # Example
///
/// ```
/// use labor_engine::models::{PayrollPeriod, PeriodStatus};
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod {
///     id: 1,
///     start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
///     status: PeriodStatus::Draft,
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Unique identifier.
    pub id: PeriodId,
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
    /// Draft or final.
    pub status: PeriodStatus,
}

impl PayrollPeriod {
    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks if this period shares at least one day with `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    /// Returns true once the period has been finalized.
    pub fn is_final(&self) -> bool {
        self.status == PeriodStatus::Final
    }
}

/// One confirmed day that contributed to a payroll entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollDetail {
    /// The date worked.
    pub date: NaiveDate,
    /// Regular hours.
    pub hours: Decimal,
    /// Overtime hours.
    pub overtime: Decimal,
    /// The project the hours were booked against.
    pub project_id: ProjectId,
}

/// A worker's pay for one payroll period.
///
/// `net_salary + social_charges == gross_salary` always holds, and
/// `social_charges` is zero whenever `apply_deductions` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// Unique identifier.
    pub id: EntryId,
    /// The owning period.
    pub period_id: PeriodId,
    /// The paid worker.
    pub worker_id: UserId,
    /// Regular hours in the period.
    pub total_hours: Decimal,
    /// Overtime hours in the period.
    pub overtime_hours: Decimal,
    /// Pay before deductions, rounded to the policy granularity.
    pub gross_salary: Decimal,
    /// Withheld social charges.
    pub social_charges: Decimal,
    /// Pay after deductions.
    pub net_salary: Decimal,
    /// Deduction policy in force when the entry was computed.
    pub apply_deductions: bool,
    /// Per-day breakdown, ordered by date.
    pub details: Vec<PayrollDetail>,
}

/// Column totals for a payroll period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Sum of regular hours.
    pub hours: Decimal,
    /// Sum of overtime hours.
    pub overtime: Decimal,
    /// Sum of gross salaries.
    pub gross: Decimal,
    /// Sum of social charges.
    pub social_charges: Decimal,
    /// Sum of net salaries.
    pub net: Decimal,
    /// Employer contributions on top of gross.
    pub employer_charges: Decimal,
    /// Provisions on top of gross.
    pub provisions: Decimal,
    /// Gross plus employer contributions plus provisions.
    pub company_cost: Decimal,
}

/// A period together with the entries visible to the caller and their totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The period.
    pub period: PayrollPeriod,
    /// Entries, ordered by worker id.
    pub entries: Vec<PayrollEntry>,
    /// Totals across `entries`.
    pub totals: PeriodTotals,
}
