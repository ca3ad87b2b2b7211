//! Budget, invoice and invoice payment models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BudgetId, InvoiceId, LineId, ProjectId};

/// Status of an invoice.
///
/// `Pending` is the only status that changes on its own (to `Overdue`, when
/// read past its due date). `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Issued, not yet due.
    Pending,
    /// Past its due date without payment.
    Overdue,
    /// Some money received.
    Partial,
    /// Settled.
    Paid,
}

impl InvoiceStatus {
    /// Returns true if the invoice still expects money.
    pub fn is_open(&self) -> bool {
        !matches!(self, InvoiceStatus::Paid)
    }
}

/// How a payment settles an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// The payment settles the invoice.
    Full,
    /// More money is expected.
    Partial,
}

/// Contract budget attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBudget {
    /// Unique identifier.
    pub id: BudgetId,
    /// The project this budget funds (one budget per project).
    pub project_id: ProjectId,
    /// Public tender reference.
    pub licitation_number: Option<String>,
    /// Contract length, free text (e.g. "12 months").
    pub contract_duration: Option<String>,
    /// Whether the contract allows an extension.
    pub is_prorrogable: bool,
    /// Extension length, free text.
    pub prorogue_time: Option<String>,
    /// Extension amount.
    pub prorogue_amount: Decimal,
    /// Whether the extension has been switched on.
    pub active_prorogue: bool,
    /// Contract start.
    pub start_date: Option<NaiveDate>,
    /// Contract end.
    pub end_date: Option<NaiveDate>,
}

impl ProjectBudget {
    /// Creates a budget with no extension and no metadata.
    pub fn new(id: BudgetId, project_id: ProjectId) -> Self {
        Self {
            id,
            project_id,
            licitation_number: None,
            contract_duration: None,
            is_prorrogable: false,
            prorogue_time: None,
            prorogue_amount: Decimal::ZERO,
            active_prorogue: false,
            start_date: None,
            end_date: None,
        }
    }

    /// The extension amount that counts toward the adjudicated total.
    pub fn effective_prorogue(&self) -> Decimal {
        if self.is_prorrogable && self.active_prorogue {
            self.prorogue_amount
        } else {
            Decimal::ZERO
        }
    }
}

/// A taxed line of a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Unique identifier.
    pub id: LineId,
    /// The owning budget.
    pub budget_id: BudgetId,
    /// Line description.
    pub name: String,
    /// Amount before tax.
    pub subtotal: Decimal,
    /// Tax percentage (13 means 13%).
    pub tax_percentage: Decimal,
}

impl BudgetLine {
    /// Returns the subtotal with tax applied.
    pub fn total(&self) -> Decimal {
        self.subtotal * (Decimal::ONE + self.tax_percentage / Decimal::ONE_HUNDRED)
    }
}

/// An invoice issued against a budget line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// The budget invoiced.
    pub budget_id: BudgetId,
    /// The budget line invoiced.
    pub budget_line_id: LineId,
    /// Human-facing invoice number.
    pub invoice_number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Invoiced amount.
    pub amount: Decimal,
    /// Current status.
    pub status: InvoiceStatus,
    /// Free-text note entered with a payment.
    pub note: Option<String>,
}

/// Money received against an invoice. At most one per invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// The settled invoice.
    pub invoice_id: InvoiceId,
    /// Date the money arrived.
    pub payment_date: NaiveDate,
    /// Bank deposit or transfer reference.
    pub deposit_number: Option<String>,
    /// Amount received.
    pub amount: Decimal,
}

/// An invoice together with its payment, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceView {
    /// The invoice.
    #[serde(flatten)]
    pub invoice: Invoice,
    /// Its payment.
    pub payment: Option<Payment>,
}

/// Budget totals for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// The budget.
    pub budget: ProjectBudget,
    /// Lines with tax plus the active extension.
    pub adjudicated: Decimal,
    /// Sum of every invoice issued, whatever its status.
    pub invoiced: Decimal,
    /// `adjudicated - invoiced`.
    pub balance: Decimal,
    /// Budget lines.
    pub lines: Vec<BudgetLine>,
    /// Invoices, newest issue date first.
    pub invoices: Vec<InvoiceView>,
}

/// Filter for the finance dashboard. Empty means "what needs attention".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilter {
    /// Earliest issue date to include.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Latest issue date to include.
    #[serde(default)]
    pub to: Option<NaiveDate>,
    /// Only invoices in this status.
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
}

impl DashboardFilter {
    /// Returns true if no criteria were given.
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.status.is_none()
    }

    /// Checks an invoice against the criteria.
    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.from.is_none_or(|from| invoice.issue_date >= from)
            && self.to.is_none_or(|to| invoice.issue_date <= to)
            && self.status.is_none_or(|status| invoice.status == status)
    }
}

/// Finance overview across the budgets visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceDashboard {
    /// Number of budgets included.
    pub budgets: usize,
    /// Adjudicated total, unfiltered.
    pub total_adjudicated: Decimal,
    /// Invoiced total over the filtered invoices.
    pub total_invoiced: Decimal,
    /// Filtered invoices (open ones when no filter was given), by due date.
    pub invoices: Vec<Invoice>,
}
