//! Schedule confirmation ledger.
//!
//! Entries are assigned by an admin with placeholder hours and confirmed by
//! a supervisor or admin, which records the actual hours. Only confirmed
//! entries are picked up by payroll. Entries dated inside a finalized payroll
//! period are locked: confirming them changes nothing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::access::{AccessContext, Action, can};
use crate::error::{EngineError, EngineResult};
use crate::models::{EntryId, ProjectId, ScheduleConfirmation, ScheduleEntry, UserId};
use crate::store::LedgerStore;

use super::RequestContext;

fn validate_hours(hours: Option<Decimal>, overtime: Option<Decimal>) -> EngineResult<()> {
    if hours.is_some_and(|h| h < Decimal::ZERO) {
        return Err(EngineError::validation("hours", "must not be negative"));
    }
    if overtime.is_some_and(|o| o < Decimal::ZERO) {
        return Err(EngineError::validation("overtime", "must not be negative"));
    }
    Ok(())
}

/// Returns true if `date` falls inside a finalized payroll period.
fn is_locked<S: LedgerStore + ?Sized>(store: &S, date: NaiveDate) -> EngineResult<bool> {
    Ok(store
        .periods()?
        .iter()
        .any(|period| period.is_final() && period.contains_date(date)))
}

fn entry_access<'a>(
    ctx: &RequestContext,
    entry: &ScheduleEntry,
    projects: &'a [ProjectId],
) -> AccessContext<'a> {
    AccessContext::for_caller(ctx.caller.id)
        .owned_by(entry.worker_id)
        .on_project(entry.project_id, projects)
}

/// Assigns a worker to a project on a date.
///
/// The entry starts unconfirmed with the default hours.
pub fn assign<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    project_id: ProjectId,
    worker_id: UserId,
    date: NaiveDate,
) -> EngineResult<ScheduleEntry> {
    ctx.require_role(Action::AssignSchedule)?;
    if store.worker(worker_id)?.is_none() {
        return Err(EngineError::NotFound {
            entity: "worker",
            id: worker_id,
        });
    }

    let entry = store.insert_schedule(ScheduleEntry::assigned(0, project_id, worker_id, date))?;
    info!(
        correlation_id = %ctx.correlation_id,
        entry_id = entry.id,
        project_id,
        worker_id,
        date = %date,
        "Schedule entry assigned"
    );
    Ok(entry)
}

/// Confirms the hours of one schedule entry.
///
/// Supervisors may only confirm entries on their assigned projects and never
/// their own. An entry inside a finalized period is returned unchanged.
pub fn confirm<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    entry_id: EntryId,
    hours: Decimal,
    overtime: Decimal,
) -> EngineResult<ScheduleEntry> {
    ctx.require_role(Action::ConfirmSchedule)?;
    validate_hours(Some(hours), Some(overtime))?;

    let mut entry = store.schedule(entry_id)?.ok_or(EngineError::NotFound {
        entity: "schedule entry",
        id: entry_id,
    })?;
    let projects = ctx.caller_projects(&*store)?;
    ctx.require(Action::ConfirmSchedule, &entry_access(ctx, &entry, &projects))?;

    if is_locked(&*store, entry.date)? {
        debug!(
            correlation_id = %ctx.correlation_id,
            entry_id,
            date = %entry.date,
            "Entry lies in a final payroll period; confirmation ignored"
        );
        return Ok(entry);
    }

    entry.hours_worked = hours;
    entry.overtime_hours = overtime;
    entry.is_confirmed = true;
    store.save_schedule(entry.clone())?;

    info!(
        correlation_id = %ctx.correlation_id,
        entry_id,
        hours = %hours,
        overtime = %overtime,
        confirmed_by = ctx.caller.id,
        "Schedule entry confirmed"
    );
    Ok(entry)
}

/// Confirms several entries at once and returns how many were updated.
///
/// Items the caller may not confirm, unknown ids and locked entries are
/// skipped rather than failing the batch. Missing hours keep the values
/// already on the entry. A negative value anywhere rejects the whole batch.
pub fn confirm_batch<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    items: &[ScheduleConfirmation],
) -> EngineResult<usize> {
    ctx.require_role(Action::ConfirmSchedule)?;
    for item in items {
        validate_hours(item.hours, item.overtime)?;
    }

    let projects = ctx.caller_projects(&*store)?;
    let mut updated = 0;
    let mut skipped = 0;

    for item in items {
        let Some(mut entry) = store.schedule(item.entry_id)? else {
            skipped += 1;
            continue;
        };
        if !can(
            ctx.caller.role,
            Action::ConfirmSchedule,
            &entry_access(ctx, &entry, &projects),
        ) || is_locked(&*store, entry.date)?
        {
            skipped += 1;
            continue;
        }

        if let Some(hours) = item.hours {
            entry.hours_worked = hours;
        }
        if let Some(overtime) = item.overtime {
            entry.overtime_hours = overtime;
        }
        entry.is_confirmed = true;
        store.save_schedule(entry)?;
        updated += 1;
    }

    info!(
        correlation_id = %ctx.correlation_id,
        requested = items.len(),
        updated,
        skipped,
        "Batch confirmation applied"
    );
    Ok(updated)
}

/// Lists a day's entries for the approval screen.
///
/// Supervisors only see entries on their assigned projects, minus their own;
/// naming a project they are not assigned to is refused.
pub fn list_for_approval<S: LedgerStore + ?Sized>(
    store: &S,
    ctx: &RequestContext,
    date: NaiveDate,
    project_id: Option<ProjectId>,
) -> EngineResult<Vec<ScheduleEntry>> {
    ctx.require_role(Action::ViewScheduleQueue)?;
    let projects = ctx.caller_projects(store)?;

    let mut access = AccessContext::for_caller(ctx.caller.id).with_projects(&projects);
    access.project = project_id;
    ctx.require(Action::ViewScheduleQueue, &access)?;

    let admin = ctx.is_admin();
    Ok(store
        .schedules_between(date, date)?
        .into_iter()
        .filter(|entry| project_id.is_none_or(|project| entry.project_id == project))
        .filter(|entry| {
            admin || (projects.contains(&entry.project_id) && entry.worker_id != ctx.caller.id)
        })
        .collect())
}

/// Lists entries in `[start, end]`. Non-admins only see their own.
pub fn calendar<S: LedgerStore + ?Sized>(
    store: &S,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<Vec<ScheduleEntry>> {
    ctx.require_role(Action::ViewCalendar)?;
    if start > end {
        return Err(EngineError::validation("start", "must not be after end"));
    }

    let admin = ctx.is_admin();
    Ok(store
        .schedules_between(start, end)?
        .into_iter()
        .filter(|entry| admin || entry.worker_id == ctx.caller.id)
        .collect())
}

/// Deletes a schedule entry and returns it.
pub fn delete<S: LedgerStore + ?Sized>(
    store: &mut S,
    ctx: &RequestContext,
    entry_id: EntryId,
) -> EngineResult<ScheduleEntry> {
    ctx.require_role(Action::DeleteSchedule)?;
    let entry = store.schedule(entry_id)?.ok_or(EngineError::NotFound {
        entity: "schedule entry",
        id: entry_id,
    })?;
    store.delete_schedule(entry_id)?;

    info!(
        correlation_id = %ctx.correlation_id,
        entry_id,
        "Schedule entry deleted"
    );
    Ok(entry)
}
