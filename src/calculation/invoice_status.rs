//! Invoice status transitions.
//!
//! Invoices move `pending → {overdue, partial, paid}`, `overdue → {partial,
//! paid}` and `partial → {partial, paid}`. `paid` is terminal. The only
//! transition that fires without a payment is `pending → overdue`, applied
//! by [`sweep_overdue`] whenever a budget's invoices are read.

use chrono::NaiveDate;

use crate::models::{Invoice, InvoiceId, InvoiceStatus, PaymentType};

/// Returns true if a pending invoice is past its due date.
pub fn is_overdue(invoice: &Invoice, today: NaiveDate) -> bool {
    invoice.status == InvoiceStatus::Pending && invoice.due_date < today
}

/// Moves every pending invoice whose due date has passed to overdue.
///
/// Returns the ids of the invoices that changed, so the caller can persist
/// just those. Running the sweep again on its own output changes nothing.
///
/// # Examples
///
/// ```
/// use labor_engine::calculation::sweep_overdue;
/// use labor_engine::models::{Invoice, InvoiceStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let today = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
/// let mut invoices = vec![Invoice {
///     id: 1,
///     budget_id: 1,
///     budget_line_id: 1,
///     invoice_number: "F-001".to_string(),
///     issue_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
///     due_date: NaiveDate::from_ymd_opt(2026, 5, 9).unwrap(),
///     amount: Decimal::from(1000),
///     status: InvoiceStatus::Pending,
///     note: None,
/// }];
///
/// assert_eq!(sweep_overdue(&mut invoices, today), vec![1]);
/// assert_eq!(invoices[0].status, InvoiceStatus::Overdue);
/// assert!(sweep_overdue(&mut invoices, today).is_empty());
/// ```
pub fn sweep_overdue(invoices: &mut [Invoice], today: NaiveDate) -> Vec<InvoiceId> {
    invoices
        .iter_mut()
        .filter(|invoice| is_overdue(invoice, today))
        .map(|invoice| {
            invoice.status = InvoiceStatus::Overdue;
            invoice.id
        })
        .collect()
}

/// Returns the status an invoice takes after a payment is posted.
///
/// A paid invoice stays paid whatever the payment type.
pub fn status_after_payment(current: InvoiceStatus, payment_type: PaymentType) -> InvoiceStatus {
    match (current, payment_type) {
        (InvoiceStatus::Paid, _) => InvoiceStatus::Paid,
        (_, PaymentType::Full) => InvoiceStatus::Paid,
        (_, PaymentType::Partial) => InvoiceStatus::Partial,
    }
}
