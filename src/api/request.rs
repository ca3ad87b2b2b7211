//! Request types for the labor engine API.
//!
//! Dates travel as `YYYY-MM-DD` strings and are parsed here, so a malformed
//! date is reported as a validation error naming the field instead of a
//! generic body rejection.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    DEFAULT_HOURS_WORKED, DashboardFilter, InvoiceStatus, LineId, LiquidationAmounts,
    NewPayrollPayment, PaymentType, ProjectId, ScheduleConfirmation, UserId,
};
use crate::services::{NewInvoice, PaymentPosting};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_ACTIVITY_LIMIT: usize = 50;
const MAX_ACTIVITY_LIMIT: usize = 500;

/// Parses a `YYYY-MM-DD` date, naming `field` on failure.
///
/// # Example
///
/// ```
/// use labor_engine::api::parse_date;
///
/// assert!(parse_date("date", "2026-05-04").is_ok());
/// assert!(parse_date("date", "04/05/2026").is_err());
/// ```
pub fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        EngineError::validation(field, format!("expected YYYY-MM-DD, got '{}'", value))
    })
}

fn required_date(field: &str, value: Option<&str>) -> EngineResult<NaiveDate> {
    match value {
        Some(value) => parse_date(field, value),
        None => Err(EngineError::validation(field, "is required")),
    }
}

fn optional_date(field: &str, value: Option<&str>) -> EngineResult<Option<NaiveDate>> {
    value.map(|value| parse_date(field, value)).transpose()
}

/// Body of `POST /schedules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignScheduleRequest {
    /// The project to staff.
    pub project_id: ProjectId,
    /// The worker assigned.
    pub worker_id: UserId,
    /// The working day.
    pub date: String,
}

impl AssignScheduleRequest {
    /// Parses the working day.
    pub fn date(&self) -> EngineResult<NaiveDate> {
        parse_date("date", &self.date)
    }
}

/// Body of `POST /schedules/:id/confirm`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmScheduleRequest {
    /// Regular hours; defaults to a standard day.
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// Overtime hours; defaults to none.
    #[serde(default)]
    pub overtime: Option<Decimal>,
}

impl ConfirmScheduleRequest {
    /// Returns the hours to record as `(hours, overtime)`.
    pub fn hours(&self) -> (Decimal, Decimal) {
        (
            self.hours.unwrap_or(DEFAULT_HOURS_WORKED),
            self.overtime.unwrap_or(Decimal::ZERO),
        )
    }
}

/// Body of `POST /schedules/confirm-batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmBatchRequest {
    /// The entries to confirm.
    pub items: Vec<ScheduleConfirmation>,
}

/// Response of `POST /schedules/confirm-batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Entries actually confirmed.
    pub updated: usize,
}

/// Query of `GET /schedules/approval`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalQuery {
    /// The day to review.
    pub date: Option<String>,
    /// Restricts the queue to one project.
    pub project_id: Option<ProjectId>,
}

impl ApprovalQuery {
    /// Parses the day to review.
    pub fn date(&self) -> EngineResult<NaiveDate> {
        required_date("date", self.date.as_deref())
    }
}

/// Query of `GET /schedules/calendar`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarQuery {
    /// First day shown.
    pub start: Option<String>,
    /// Last day shown.
    pub end: Option<String>,
}

impl CalendarQuery {
    /// Parses the range as `(start, end)`.
    pub fn range(&self) -> EngineResult<(NaiveDate, NaiveDate)> {
        Ok((
            required_date("start", self.start.as_deref())?,
            required_date("end", self.end.as_deref())?,
        ))
    }
}

/// Body of `POST /payroll/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// First day of the period.
    pub start_date: String,
    /// Last day of the period.
    pub end_date: String,
}

impl GeneratePayrollRequest {
    /// Parses the period as `(start, end)`.
    pub fn range(&self) -> EngineResult<(NaiveDate, NaiveDate)> {
        Ok((
            parse_date("start_date", &self.start_date)?,
            parse_date("end_date", &self.end_date)?,
        ))
    }
}

/// Body of `POST /payroll/entries/:id/deductions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionsRequest {
    /// Whether social charges are withheld.
    pub apply: bool,
}

/// Body of `POST /budgets/:id/invoices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    /// The budget line billed.
    pub budget_line_id: LineId,
    /// Invoice number as printed.
    pub invoice_number: String,
    /// Issue date.
    pub issue_date: String,
    /// Due date.
    pub due_date: String,
    /// Invoiced amount.
    pub amount: Decimal,
}

impl TryFrom<CreateInvoiceRequest> for NewInvoice {
    type Error = EngineError;

    fn try_from(req: CreateInvoiceRequest) -> EngineResult<Self> {
        Ok(NewInvoice {
            issue_date: parse_date("issue_date", &req.issue_date)?,
            due_date: parse_date("due_date", &req.due_date)?,
            budget_line_id: req.budget_line_id,
            invoice_number: req.invoice_number,
            amount: req.amount,
        })
    }
}

/// Body of `POST /invoices/:id/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayInvoiceRequest {
    /// Date the money arrived.
    pub payment_date: String,
    /// Bank deposit reference.
    #[serde(default)]
    pub deposit_number: Option<String>,
    /// Amount received.
    pub amount: Decimal,
    /// Whether the payment settles the invoice.
    pub payment_type: PaymentType,
    /// Free-form note stored on the invoice.
    #[serde(default)]
    pub note: Option<String>,
}

impl TryFrom<PayInvoiceRequest> for PaymentPosting {
    type Error = EngineError;

    fn try_from(req: PayInvoiceRequest) -> EngineResult<Self> {
        Ok(PaymentPosting {
            payment_date: parse_date("payment_date", &req.payment_date)?,
            deposit_number: req.deposit_number,
            amount: req.amount,
            payment_type: req.payment_type,
            note: req.note,
        })
    }
}

/// Query of `GET /activity`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityQuery {
    /// Maximum number of records; defaults to 50, capped at 500.
    pub limit: Option<usize>,
}

impl ActivityQuery {
    /// The effective record limit.
    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .min(MAX_ACTIVITY_LIMIT)
    }
}

/// Query of `GET /finance/dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// Earliest issue date.
    pub from: Option<String>,
    /// Latest issue date.
    pub to: Option<String>,
    /// Invoice status.
    pub status: Option<InvoiceStatus>,
}

impl TryFrom<DashboardQuery> for DashboardFilter {
    type Error = EngineError;

    fn try_from(query: DashboardQuery) -> EngineResult<Self> {
        Ok(DashboardFilter {
            from: optional_date("from", query.from.as_deref())?,
            to: optional_date("to", query.to.as_deref())?,
            status: query.status,
        })
    }
}

/// Body of `POST /workers/:id/payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerPaymentRequest {
    /// Payment date.
    pub date: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Regular hours covered.
    pub hours_paid: Decimal,
    /// Overtime hours covered.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<WorkerPaymentRequest> for NewPayrollPayment {
    type Error = EngineError;

    fn try_from(req: WorkerPaymentRequest) -> EngineResult<Self> {
        Ok(NewPayrollPayment {
            date: parse_date("date", &req.date)?,
            amount: req.amount,
            hours_paid: req.hours_paid,
            overtime_hours: req.overtime_hours,
            notes: req.notes,
        })
    }
}

/// Query of `GET /workers/:id/liquidation/preview`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewQuery {
    /// Separation date; defaults to today.
    pub date: Option<String>,
    /// Overrides the worker's recorded start date.
    pub start_date: Option<String>,
}

impl PreviewQuery {
    /// Parses `(date, custom_start)`, falling back to `today` for the date.
    pub fn dates(&self, today: NaiveDate) -> EngineResult<(NaiveDate, Option<NaiveDate>)> {
        Ok((
            optional_date("date", self.date.as_deref())?.unwrap_or(today),
            optional_date("start_date", self.start_date.as_deref())?,
        ))
    }
}

/// Body of `POST /workers/:id/liquidations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitLiquidationRequest {
    /// Separation date.
    pub date: String,
    /// Amounts to record, usually copied from a preview.
    #[serde(default)]
    pub amounts: LiquidationAmounts,
}

impl CommitLiquidationRequest {
    /// Parses the separation date.
    pub fn date(&self) -> EngineResult<NaiveDate> {
        parse_date("date", &self.date)
    }
}
