//! Core data models for the labor engine.
//!
//! This module contains all the domain records the engine reads, computes
//! and hands back to its collaborators.

mod activity;
mod finance;
mod liquidation;
mod payment;
mod payroll;
mod role;
mod schedule;
mod worker;

/// Identifier of a user (admin, supervisor, worker or client).
pub type UserId = u64;
/// Identifier of a project.
pub type ProjectId = u64;
/// Identifier of a schedule entry or payroll entry.
pub type EntryId = u64;
/// Identifier of a payroll period.
pub type PeriodId = u64;
/// Identifier of a project budget.
pub type BudgetId = u64;
/// Identifier of a budget line.
pub type LineId = u64;
/// Identifier of an invoice.
pub type InvoiceId = u64;
/// Identifier of a worker payment.
pub type PaymentId = u64;
/// Identifier of a liquidation.
pub type LiquidationId = u64;

pub use activity::{ActivityAction, ActivityRecord};
pub use finance::{
    BudgetLine, BudgetStatus, DashboardFilter, FinanceDashboard, Invoice, InvoiceStatus,
    InvoiceView, Payment, PaymentType, ProjectBudget,
};
pub use liquidation::{Liquidation, LiquidationAmounts, LiquidationPreview};
pub use payment::{NewPayrollPayment, PayrollPayment};
pub use payroll::{
    PayrollDetail, PayrollEntry, PayrollPeriod, PeriodStatus, PeriodSummary, PeriodTotals,
};
pub use role::{Caller, Role};
pub use schedule::{DEFAULT_HOURS_WORKED, ScheduleConfirmation, ScheduleEntry};
pub use worker::{Worker, WorkerStatus};
