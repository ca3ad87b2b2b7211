//! Salary payments made to workers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PaymentId, UserId};

/// Money paid to a worker. The latest one marks how far wages are settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPayment {
    /// Unique identifier.
    pub id: PaymentId,
    /// The paid worker.
    pub worker_id: UserId,
    /// Payment date; wages are settled up to and including it.
    pub date: NaiveDate,
    /// Amount paid.
    pub amount: Decimal,
    /// Regular hours covered.
    pub hours_paid: Decimal,
    /// Overtime hours covered.
    pub overtime_hours: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
    /// The admin who recorded it.
    pub created_by: UserId,
}

/// Input for recording a worker payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayrollPayment {
    /// Payment date.
    pub date: NaiveDate,
    /// Amount paid.
    pub amount: Decimal,
    /// Regular hours covered.
    pub hours_paid: Decimal,
    /// Overtime hours covered.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}
