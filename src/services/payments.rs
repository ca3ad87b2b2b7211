//! Salary payments made to workers.

use rust_decimal::Decimal;
use tracing::info;

use crate::access::Action;
use crate::error::{EngineError, EngineResult};
use crate::models::{NewPayrollPayment, PayrollPayment, UserId};
use crate::store::LedgerStore;

use super::RequestContext;

/// Records a salary payment to a worker.
pub fn record_payment<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    worker_id: UserId,
    request: NewPayrollPayment,
) -> EngineResult<PayrollPayment> {
    ctx.require_role(Action::RecordWorkerPayment)?;
    if store.worker(worker_id)?.is_none() {
        return Err(EngineError::NotFound {
            entity: "worker",
            id: worker_id,
        });
    }
    for (field, value) in [
        ("amount", request.amount),
        ("hours_paid", request.hours_paid),
        ("overtime_hours", request.overtime_hours),
    ] {
        if value < Decimal::ZERO {
            return Err(EngineError::validation(field, "must not be negative"));
        }
    }

    let payment = store.insert_payroll_payment(PayrollPayment {
        id: 0,
        worker_id,
        date: request.date,
        amount: request.amount,
        hours_paid: request.hours_paid,
        overtime_hours: request.overtime_hours,
        notes: request.notes,
        created_by: ctx.caller.id,
    })?;

    info!(
        correlation_id = %ctx.correlation_id,
        payment_id = payment.id,
        worker_id,
        amount = %payment.amount,
        date = %payment.date,
        "Worker payment recorded"
    );
    Ok(payment)
}

/// Lists a worker's payments, newest first.
pub fn payment_history<S: LedgerStore + ?Sized>(
    store: &S,
    ctx: &RequestContext,
    worker_id: UserId,
) -> EngineResult<Vec<PayrollPayment>> {
    ctx.require_owner(Action::ViewWorkerPayments, worker_id)?;
    let mut payments = store.payroll_payments(worker_id)?;
    payments.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    Ok(payments)
}

/// Returns the worker's most recent payment, if any.
pub fn latest_payment<S: LedgerStore + ?Sized>(
    store: &S,
    worker_id: UserId,
) -> EngineResult<Option<PayrollPayment>> {
    Ok(store
        .payroll_payments(worker_id)?
        .into_iter()
        .max_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id))))
}
