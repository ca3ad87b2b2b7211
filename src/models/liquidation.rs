//! Liquidation (separation settlement) models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LiquidationId, UserId};

/// A computed, not yet persisted, settlement for a worker.
///
/// All amounts are rounded to two decimal places, and `total` is the sum of
/// the three rounded components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationPreview {
    /// The worker being settled.
    pub worker_id: UserId,
    /// The worker's name, for letters.
    pub name: String,
    /// Start of the employment span used.
    pub start_date: Option<NaiveDate>,
    /// Monthly salary used.
    pub monthly_salary: Option<Decimal>,
    /// The settlement date.
    pub calculation_date: NaiveDate,
    /// Months worked (days / average month length).
    pub months_worked: Decimal,
    /// Accrued vacation days.
    pub vacation_days: Decimal,
    /// Vacation pay.
    pub vacation_amount: Decimal,
    /// Accrued year-end bonus.
    pub aguinaldo_amount: Decimal,
    /// Unpaid salary since the last payment.
    pub salary_due: Decimal,
    /// Sum of the three amounts.
    pub total: Decimal,
}

impl LiquidationPreview {
    /// Extracts the amounts to persist.
    pub fn amounts(&self) -> LiquidationAmounts {
        LiquidationAmounts {
            vacation_days: self.vacation_days,
            vacation_amount: self.vacation_amount,
            aguinaldo_amount: self.aguinaldo_amount,
            salary_due: self.salary_due,
            total: self.total,
        }
    }
}

/// The amounts recorded when a liquidation is committed.
///
/// These are usually taken from a preview, possibly edited by the admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationAmounts {
    /// Vacation days paid out.
    #[serde(default)]
    pub vacation_days: Decimal,
    /// Vacation pay.
    #[serde(default)]
    pub vacation_amount: Decimal,
    /// Year-end bonus.
    #[serde(default)]
    pub aguinaldo_amount: Decimal,
    /// Unpaid salary.
    #[serde(default)]
    pub salary_due: Decimal,
    /// Total paid.
    #[serde(default)]
    pub total: Decimal,
}

/// A persisted settlement. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liquidation {
    /// Unique identifier.
    pub id: LiquidationId,
    /// The settled worker.
    pub worker_id: UserId,
    /// Settlement date.
    pub date: NaiveDate,
    /// Vacation days paid out.
    pub vacation_days: Decimal,
    /// Vacation pay.
    pub vacation_amount: Decimal,
    /// Year-end bonus.
    pub aguinaldo_amount: Decimal,
    /// Unpaid salary.
    pub salary_due: Decimal,
    /// Total paid.
    pub total_amount: Decimal,
    /// The admin who recorded it.
    pub created_by: UserId,
}
