//! Invoice lifecycle and budget aggregation.
//!
//! Reading a budget's invoices runs the overdue sweep first and persists
//! whatever it changed, so every view reflects today's status. Payments are
//! one per invoice: posting again updates the existing record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::access::{AccessContext, Action};
use crate::calculation::{adjudicated_total, budget_totals, status_after_payment, sweep_overdue};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BudgetId, BudgetStatus, DashboardFilter, FinanceDashboard, Invoice, InvoiceId, InvoiceStatus,
    InvoiceView, LineId, Payment, PaymentType, ProjectBudget,
};
use crate::store::LedgerStore;

use super::RequestContext;

/// Input for issuing an invoice against a budget line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoice {
    /// The budget line invoiced; must belong to the budget.
    pub budget_line_id: LineId,
    /// Human-facing invoice number.
    pub invoice_number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date; not before the issue date.
    pub due_date: NaiveDate,
    /// Invoiced amount.
    pub amount: Decimal,
}

/// Input for posting a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPosting {
    /// Date the money arrived.
    pub payment_date: NaiveDate,
    /// Bank deposit reference.
    #[serde(default)]
    pub deposit_number: Option<String>,
    /// Amount received.
    pub amount: Decimal,
    /// Whether the payment settles the invoice.
    pub payment_type: PaymentType,
    /// Note stored on the invoice when given.
    #[serde(default)]
    pub note: Option<String>,
}

fn budget_not_found(id: BudgetId) -> EngineError {
    EngineError::NotFound {
        entity: "budget",
        id,
    }
}

fn invoice_not_found(id: InvoiceId) -> EngineError {
    EngineError::NotFound {
        entity: "invoice",
        id,
    }
}

/// Loads a budget's invoices with the overdue sweep applied and persisted.
fn swept_invoices<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    budget_id: BudgetId,
) -> EngineResult<Vec<Invoice>> {
    let mut invoices = store.invoices_for_budget(budget_id)?;
    let changed = sweep_overdue(&mut invoices, ctx.today);
    if !changed.is_empty() {
        debug!(
            correlation_id = %ctx.correlation_id,
            budget_id,
            invoices = ?changed,
            "Invoices moved to overdue"
        );
    }
    for invoice in invoices.iter().filter(|invoice| changed.contains(&invoice.id)) {
        store.save_invoice(invoice.clone())?;
    }
    Ok(invoices)
}

/// Issues a pending invoice against a budget line.
pub fn create_invoice<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    budget_id: BudgetId,
    request: NewInvoice,
) -> EngineResult<Invoice> {
    ctx.require_role(Action::ManageInvoices)?;
    store.budget(budget_id)?.ok_or(budget_not_found(budget_id))?;

    if request.invoice_number.trim().is_empty() {
        return Err(EngineError::validation("invoice_number", "must not be empty"));
    }
    if request.amount < Decimal::ZERO {
        return Err(EngineError::validation("amount", "must not be negative"));
    }
    if request.due_date < request.issue_date {
        return Err(EngineError::validation(
            "due_date",
            "must not be before issue_date",
        ));
    }
    match store.budget_line(request.budget_line_id)? {
        Some(line) if line.budget_id == budget_id => {}
        _ => {
            return Err(EngineError::validation(
                "budget_line_id",
                format!(
                    "line {} does not belong to budget {}",
                    request.budget_line_id, budget_id
                ),
            ));
        }
    }

    let invoice = store.insert_invoice(Invoice {
        id: 0,
        budget_id,
        budget_line_id: request.budget_line_id,
        invoice_number: request.invoice_number,
        issue_date: request.issue_date,
        due_date: request.due_date,
        amount: request.amount,
        status: InvoiceStatus::Pending,
        note: None,
    })?;

    info!(
        correlation_id = %ctx.correlation_id,
        invoice_id = invoice.id,
        budget_id,
        amount = %invoice.amount,
        due_date = %invoice.due_date,
        "Invoice issued"
    );
    Ok(invoice)
}

/// Deletes an invoice together with its payment.
pub fn delete_invoice<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    invoice_id: InvoiceId,
) -> EngineResult<Invoice> {
    ctx.require_role(Action::ManageInvoices)?;
    let invoice = store.invoice(invoice_id)?.ok_or(invoice_not_found(invoice_id))?;
    store.delete_invoice(invoice_id)?;

    info!(
        correlation_id = %ctx.correlation_id,
        invoice_id,
        "Invoice deleted"
    );
    Ok(invoice)
}

/// Posts a payment against an invoice.
///
/// An existing payment is updated in place. A full payment marks the invoice
/// paid and a partial one marks it partial, except that a paid invoice stays
/// paid.
pub fn pay<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    invoice_id: InvoiceId,
    posting: PaymentPosting,
) -> EngineResult<InvoiceView> {
    ctx.require_role(Action::PostPayment)?;
    if posting.amount < Decimal::ZERO {
        return Err(EngineError::validation("amount", "must not be negative"));
    }
    let mut invoice = store.invoice(invoice_id)?.ok_or(invoice_not_found(invoice_id))?;
    let replaced = store.payment(invoice_id)?.is_some();

    let payment = Payment {
        invoice_id,
        payment_date: posting.payment_date,
        deposit_number: posting.deposit_number,
        amount: posting.amount,
    };
    store.save_payment(payment.clone())?;

    let previous = invoice.status;
    invoice.status = status_after_payment(previous, posting.payment_type);
    if posting.note.is_some() {
        invoice.note = posting.note;
    }
    store.save_invoice(invoice.clone())?;

    info!(
        correlation_id = %ctx.correlation_id,
        invoice_id,
        amount = %payment.amount,
        payment_type = ?posting.payment_type,
        from = ?previous,
        to = ?invoice.status,
        replaced,
        "Invoice payment posted"
    );
    Ok(InvoiceView {
        invoice,
        payment: Some(payment),
    })
}

/// Returns a budget's totals and invoices, newest issue date first.
pub fn budget_status<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    budget_id: BudgetId,
) -> EngineResult<BudgetStatus> {
    ctx.require_role(Action::ViewFinance)?;
    let budget = store.budget(budget_id)?.ok_or(budget_not_found(budget_id))?;
    let projects = ctx.caller_projects(&*store)?;
    ctx.require(
        Action::ViewFinance,
        &AccessContext::for_caller(ctx.caller.id).on_project(budget.project_id, &projects),
    )?;

    let lines = store.budget_lines(budget_id)?;
    let mut invoices = swept_invoices(store, ctx, budget_id)?;
    let totals = budget_totals(&budget, &lines, &invoices);

    invoices.sort_by(|a, b| {
        b.issue_date
            .cmp(&a.issue_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    let views = invoices
        .into_iter()
        .map(|invoice| {
            let payment = store.payment(invoice.id)?;
            Ok(InvoiceView { invoice, payment })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(BudgetStatus {
        budget,
        adjudicated: totals.adjudicated,
        invoiced: totals.invoiced,
        balance: totals.balance,
        lines,
        invoices: views,
    })
}

/// Summarizes the budgets visible to the caller.
///
/// The adjudicated total is never filtered. The invoiced total covers the
/// invoices matching `filter`; the listed invoices are those matching a
/// non-empty filter, or every open invoice when the filter is empty.
pub fn finance_dashboard<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    filter: &DashboardFilter,
) -> EngineResult<FinanceDashboard> {
    ctx.require_role(Action::ViewFinance)?;
    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        if from > to {
            return Err(EngineError::validation("from", "must not be after to"));
        }
    }

    let projects = ctx.caller_projects(&*store)?;
    let visible: Vec<ProjectBudget> = store
        .budgets()?
        .into_iter()
        .filter(|budget| ctx.is_admin() || projects.contains(&budget.project_id))
        .collect();

    let mut total_adjudicated = Decimal::ZERO;
    let mut total_invoiced = Decimal::ZERO;
    let mut listed = Vec::new();

    for budget in &visible {
        let lines = store.budget_lines(budget.id)?;
        total_adjudicated += adjudicated_total(budget, &lines);

        for invoice in swept_invoices(store, ctx, budget.id)? {
            if !filter.matches(&invoice) {
                continue;
            }
            total_invoiced += invoice.amount;
            if !filter.is_empty() || invoice.status.is_open() {
                listed.push(invoice);
            }
        }
    }

    listed.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)));

    Ok(FinanceDashboard {
        budgets: visible.len(),
        total_adjudicated,
        total_invoiced,
        invoices: listed,
    })
}
