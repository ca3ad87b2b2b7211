//! Payroll generation and period lifecycle.
//!
//! A payroll period is generated from the confirmed schedule entries in its
//! date range: one entry per worker with at least one confirmed day. Periods
//! start as drafts, are finalized once, and can be deleted at any status
//! (which discards their entries).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::access::Action;
use crate::calculation::{apply_deductions, calculate_pay, summarize_entries};
use crate::config::FinancialPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EntryId, PayrollDetail, PayrollEntry, PayrollPeriod, PeriodId, PeriodStatus, PeriodSummary,
    ScheduleEntry, UserId, Worker,
};
use crate::store::LedgerStore;

use super::RequestContext;

fn period_not_found(id: PeriodId) -> EngineError {
    EngineError::NotFound {
        entity: "payroll period",
        id,
    }
}

/// Prices one worker's confirmed days into a payroll entry.
///
/// `days` must all belong to `worker` and be ordered by date.
fn price_worker(
    period_id: PeriodId,
    worker: &Worker,
    days: &[ScheduleEntry],
    policy: &FinancialPolicy,
) -> PayrollEntry {
    let total_hours: Decimal = days.iter().map(|day| day.hours_worked).sum();
    let overtime_hours: Decimal = days.iter().map(|day| day.overtime_hours).sum();
    let pay = calculate_pay(
        total_hours,
        overtime_hours,
        worker.payroll_rate(),
        worker.apply_deductions,
        policy,
    );

    PayrollEntry {
        id: 0,
        period_id,
        worker_id: worker.id,
        total_hours,
        overtime_hours,
        gross_salary: pay.gross,
        social_charges: pay.social_charges,
        net_salary: pay.net,
        apply_deductions: worker.apply_deductions,
        details: days
            .iter()
            .map(|day| PayrollDetail {
                date: day.date,
                hours: day.hours_worked,
                overtime: day.overtime_hours,
                project_id: day.project_id,
            })
            .collect(),
    }
}

/// Generates a draft payroll period over `[start, end]`.
///
/// Fails with `InvalidState` if another period already covers part of the
/// range, unless the policy allows overlapping periods. Confirmed days of a
/// worker that no longer exists are left out of the period.
pub fn generate<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    policy: &FinancialPolicy,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<PeriodSummary> {
    ctx.require_role(Action::GeneratePayroll)?;
    if start > end {
        return Err(EngineError::validation(
            "start_date",
            "must not be after end_date",
        ));
    }

    if let Some(existing) = store
        .periods()?
        .into_iter()
        .find(|period| period.overlaps(start, end))
    {
        if policy.reject_overlapping_periods {
            return Err(EngineError::invalid_state(format!(
                "payroll period {} already covers {} to {}",
                existing.id, existing.start_date, existing.end_date
            )));
        }
        warn!(
            correlation_id = %ctx.correlation_id,
            existing_period = existing.id,
            "Generating a payroll period that overlaps an existing one"
        );
    }

    let period = store.insert_period(PayrollPeriod {
        id: 0,
        start_date: start,
        end_date: end,
        status: PeriodStatus::Draft,
    })?;

    let mut by_worker: BTreeMap<UserId, Vec<ScheduleEntry>> = BTreeMap::new();
    for entry in store
        .schedules_between(start, end)?
        .into_iter()
        .filter(|entry| entry.is_confirmed)
    {
        by_worker.entry(entry.worker_id).or_default().push(entry);
    }

    let mut entries = Vec::with_capacity(by_worker.len());
    for (worker_id, days) in by_worker {
        let Some(worker) = store.worker(worker_id)? else {
            warn!(
                correlation_id = %ctx.correlation_id,
                worker_id,
                skipped_days = days.len(),
                "Confirmed schedule entries reference a missing worker; skipping"
            );
            continue;
        };
        let entry = store.insert_payroll_entry(price_worker(period.id, &worker, &days, policy))?;
        entries.push(entry);
    }

    let totals = summarize_entries(&entries, policy);
    info!(
        correlation_id = %ctx.correlation_id,
        period_id = period.id,
        start_date = %start,
        end_date = %end,
        workers = entries.len(),
        gross = %totals.gross,
        "Payroll period generated"
    );

    Ok(PeriodSummary {
        period,
        entries,
        totals,
    })
}

/// Switches social charges on or off for one payroll entry.
///
/// Charges and net are recomputed from the stored gross; hours are not
/// re-derived.
pub fn toggle_deductions<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    policy: &FinancialPolicy,
    entry_id: EntryId,
    apply: bool,
) -> EngineResult<PayrollEntry> {
    ctx.require_role(Action::ToggleDeductions)?;
    let mut entry = store.payroll_entry(entry_id)?.ok_or(EngineError::NotFound {
        entity: "payroll entry",
        id: entry_id,
    })?;

    let (charges, net) = apply_deductions(entry.gross_salary, apply, policy);
    entry.apply_deductions = apply;
    entry.social_charges = charges;
    entry.net_salary = net;
    store.save_payroll_entry(entry.clone())?;

    info!(
        correlation_id = %ctx.correlation_id,
        entry_id,
        apply_deductions = apply,
        social_charges = %charges,
        net_salary = %net,
        "Payroll deductions updated"
    );
    Ok(entry)
}

/// Marks a period final. Finalizing a final period changes nothing.
pub fn confirm_period<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    period_id: PeriodId,
) -> EngineResult<PayrollPeriod> {
    ctx.require_role(Action::FinalizePayroll)?;
    let mut period = store.period(period_id)?.ok_or(period_not_found(period_id))?;
    if period.is_final() {
        return Ok(period);
    }

    period.status = PeriodStatus::Final;
    store.save_period(period.clone())?;
    info!(
        correlation_id = %ctx.correlation_id,
        period_id,
        "Payroll period finalized"
    );
    Ok(period)
}

/// Deletes a period and all of its entries, whatever its status.
pub fn delete_period<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    period_id: PeriodId,
) -> EngineResult<PayrollPeriod> {
    ctx.require_role(Action::DeletePayroll)?;
    let period = store.period(period_id)?.ok_or(period_not_found(period_id))?;
    store.delete_period(period_id)?;

    info!(
        correlation_id = %ctx.correlation_id,
        period_id,
        status = ?period.status,
        "Payroll period deleted"
    );
    Ok(period)
}

/// Returns a period with its entries and totals.
///
/// Non-admins only see their own entry.
pub fn period_summary<S: LedgerStore + ?Sized>(
    store: &S,
    ctx: &RequestContext,
    policy: &FinancialPolicy,
    period_id: PeriodId,
) -> EngineResult<PeriodSummary> {
    ctx.require_role(Action::ViewPayroll)?;
    let period = store.period(period_id)?.ok_or(period_not_found(period_id))?;

    let admin = ctx.is_admin();
    let entries: Vec<PayrollEntry> = store
        .entries_for_period(period_id)?
        .into_iter()
        .filter(|entry| admin || entry.worker_id == ctx.caller.id)
        .collect();
    let totals = summarize_entries(&entries, policy);

    Ok(PeriodSummary {
        period,
        entries,
        totals,
    })
}

/// Lists payroll periods, newest first.
pub fn list_periods<S: LedgerStore + ?Sized>(
    store: &S,
    ctx: &RequestContext,
) -> EngineResult<Vec<PayrollPeriod>> {
    ctx.require_role(Action::ViewPayroll)?;
    let mut periods = store.periods()?;
    periods.sort_by(|a, b| {
        b.start_date
            .cmp(&a.start_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    Ok(periods)
}
