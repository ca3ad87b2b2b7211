//! Liquidation preview, commit, history and worker reactivation.
//!
//! A committed liquidation separates the worker (status `liquidated`, login
//! disabled). Reactivation re-hires them with today as the new start date, so
//! the next liquidation only counts the new employment span.

use chrono::NaiveDate;
use tracing::info;

use crate::access::Action;
use crate::calculation::calculate_liquidation;
use crate::config::FinancialPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Liquidation, LiquidationAmounts, LiquidationPreview, UserId, Worker, WorkerStatus,
};
use crate::store::LedgerStore;

use super::RequestContext;
use super::payments::latest_payment;

fn load_worker<S: LedgerStore + ?Sized>(store: &S, worker_id: UserId) -> EngineResult<Worker> {
    store.worker(worker_id)?.ok_or(EngineError::NotFound {
        entity: "worker",
        id: worker_id,
    })
}

/// Computes what the worker would be owed if separated on `date`.
///
/// Nothing is persisted.
pub fn preview<S: LedgerStore + ?Sized>(
    store: &S,
    ctx: &RequestContext,
    policy: &FinancialPolicy,
    worker_id: UserId,
    date: NaiveDate,
    custom_start: Option<NaiveDate>,
) -> EngineResult<LiquidationPreview> {
    ctx.require_role(Action::PreviewLiquidation)?;
    let worker = load_worker(store, worker_id)?;
    let last_paid = latest_payment(store, worker_id)?.map(|payment| payment.date);

    Ok(calculate_liquidation(
        &worker,
        date,
        last_paid,
        custom_start,
        policy,
    ))
}

/// Persists a liquidation and separates the worker.
pub fn commit<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    worker_id: UserId,
    date: NaiveDate,
    amounts: LiquidationAmounts,
) -> EngineResult<Liquidation> {
    ctx.require_role(Action::CommitLiquidation)?;
    let mut worker = load_worker(&*store, worker_id)?;
    if worker.is_liquidated() {
        return Err(EngineError::invalid_state(format!(
            "worker {} is already liquidated",
            worker_id
        )));
    }

    let liquidation = store.insert_liquidation(Liquidation {
        id: 0,
        worker_id,
        date,
        vacation_days: amounts.vacation_days,
        vacation_amount: amounts.vacation_amount,
        aguinaldo_amount: amounts.aguinaldo_amount,
        salary_due: amounts.salary_due,
        total_amount: amounts.total,
        created_by: ctx.caller.id,
    })?;

    worker.status = WorkerStatus::Liquidated;
    worker.is_active = false;
    store.save_worker(worker)?;

    info!(
        correlation_id = %ctx.correlation_id,
        liquidation_id = liquidation.id,
        worker_id,
        total = %liquidation.total_amount,
        "Worker liquidated"
    );
    Ok(liquidation)
}

/// Lists a worker's liquidations, newest first.
pub fn history<S: LedgerStore + ?Sized>(
    store: &S,
    ctx: &RequestContext,
    worker_id: UserId,
) -> EngineResult<Vec<Liquidation>> {
    ctx.require_owner(Action::ViewLiquidations, worker_id)?;
    let mut liquidations = store.liquidations(worker_id)?;
    liquidations.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    Ok(liquidations)
}

/// Re-hires a liquidated worker starting today.
pub fn reactivate<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    worker_id: UserId,
) -> EngineResult<Worker> {
    ctx.require_role(Action::ReactivateWorker)?;
    let mut worker = load_worker(&*store, worker_id)?;
    if !worker.is_liquidated() {
        return Err(EngineError::invalid_state(format!(
            "worker {} is not liquidated",
            worker_id
        )));
    }

    worker.status = WorkerStatus::Active;
    worker.is_active = true;
    worker.start_date = Some(ctx.today);
    store.save_worker(worker.clone())?;

    info!(
        correlation_id = %ctx.correlation_id,
        worker_id,
        start_date = %ctx.today,
        "Worker reactivated"
    );
    Ok(worker)
}
