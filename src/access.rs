//! Role-based access policy.
//!
//! Authorization is a pure predicate over a [`Role`], an [`Action`] and an
//! [`AccessContext`] describing the record being touched. [`role_allows`] is
//! the static role/action table; [`can`] adds the record-level scoping
//! (assigned projects, ownership, no self-approval).

use std::fmt;

use crate::models::{ProjectId, Role, UserId};

/// Every guarded operation of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Assign a worker to a project on a date.
    AssignSchedule,
    /// List a day's entries awaiting approval.
    ViewScheduleQueue,
    /// Confirm hours on a schedule entry.
    ConfirmSchedule,
    /// View schedule entries over a date range.
    ViewCalendar,
    /// Remove a schedule entry.
    DeleteSchedule,
    /// Generate a payroll period.
    GeneratePayroll,
    /// View payroll periods and entries.
    ViewPayroll,
    /// Finalize a payroll period.
    FinalizePayroll,
    /// Delete a payroll period.
    DeletePayroll,
    /// Switch social charges on or off for a payroll entry.
    ToggleDeductions,
    /// Create or delete invoices.
    ManageInvoices,
    /// Post a payment against an invoice.
    PostPayment,
    /// View budgets, invoices and the finance dashboard.
    ViewFinance,
    /// Record a salary payment to a worker.
    RecordWorkerPayment,
    /// View a worker's salary payments.
    ViewWorkerPayments,
    /// Compute a liquidation preview.
    PreviewLiquidation,
    /// Persist a liquidation and separate the worker.
    CommitLiquidation,
    /// View a worker's liquidations.
    ViewLiquidations,
    /// Re-hire a liquidated worker.
    ReactivateWorker,
    /// Read the activity trail.
    ViewActivity,
}

impl Action {
    /// Returns a short human-readable description, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Action::AssignSchedule => "assign schedules",
            Action::ViewScheduleQueue => "view the approval queue",
            Action::ConfirmSchedule => "confirm schedule entries",
            Action::ViewCalendar => "view the schedule calendar",
            Action::DeleteSchedule => "delete schedule entries",
            Action::GeneratePayroll => "generate payroll",
            Action::ViewPayroll => "view payroll",
            Action::FinalizePayroll => "finalize payroll periods",
            Action::DeletePayroll => "delete payroll periods",
            Action::ToggleDeductions => "change payroll deductions",
            Action::ManageInvoices => "manage invoices",
            Action::PostPayment => "post invoice payments",
            Action::ViewFinance => "view finance data",
            Action::RecordWorkerPayment => "record worker payments",
            Action::ViewWorkerPayments => "view worker payments",
            Action::PreviewLiquidation => "preview liquidations",
            Action::CommitLiquidation => "commit liquidations",
            Action::ViewLiquidations => "view liquidations",
            Action::ReactivateWorker => "reactivate workers",
            Action::ViewActivity => "view the activity log",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// What is known about the record an action targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessContext<'a> {
    /// The caller's user id.
    pub caller_id: UserId,
    /// The user the record belongs to, if it has one.
    pub owner: Option<UserId>,
    /// The project the record belongs to, if it has one.
    pub project: Option<ProjectId>,
    /// Projects assigned to (or linked with) the caller.
    pub caller_projects: &'a [ProjectId],
}

impl<'a> AccessContext<'a> {
    /// A context with no record attached.
    pub fn for_caller(caller_id: UserId) -> Self {
        Self {
            caller_id,
            ..Default::default()
        }
    }

    /// Sets the record owner.
    pub fn owned_by(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the record's project together with the caller's project set.
    pub fn on_project(mut self, project: ProjectId, caller_projects: &'a [ProjectId]) -> Self {
        self.project = Some(project);
        self.caller_projects = caller_projects;
        self
    }

    /// Sets the caller's project set without pinning a project.
    pub fn with_projects(mut self, caller_projects: &'a [ProjectId]) -> Self {
        self.caller_projects = caller_projects;
        self
    }

    fn project_assigned(&self) -> bool {
        self.project
            .is_some_and(|project| self.caller_projects.contains(&project))
    }

    fn project_in_scope(&self) -> bool {
        self.project
            .is_none_or(|project| self.caller_projects.contains(&project))
    }

    fn is_own(&self) -> bool {
        self.owner == Some(self.caller_id)
    }
}

/// Returns true if `role` may ever perform `action`, whatever the record.
pub fn role_allows(role: Role, action: Action) -> bool {
    use Action::*;

    match role {
        Role::Admin => true,
        Role::Supervisor => matches!(
            action,
            ViewScheduleQueue
                | ConfirmSchedule
                | ViewCalendar
                | ViewPayroll
                | ViewFinance
                | ViewWorkerPayments
                | ViewLiquidations
        ),
        Role::Worker => matches!(
            action,
            ViewCalendar | ViewPayroll | ViewWorkerPayments | ViewLiquidations
        ),
        Role::Client => matches!(action, ViewFinance),
    }
}

/// Returns true if `role` may perform `action` on the record in `context`.
///
/// # Examples
///
/// ```
/// use labor_engine::access::{AccessContext, Action, can};
/// use labor_engine::models::Role;
///
/// let assigned = [10];
/// let own_entry = AccessContext::for_caller(5).owned_by(5).on_project(10, &assigned);
/// let crew_entry = AccessContext::for_caller(5).owned_by(6).on_project(10, &assigned);
///
/// assert!(!can(Role::Supervisor, Action::ConfirmSchedule, &own_entry));
/// assert!(can(Role::Supervisor, Action::ConfirmSchedule, &crew_entry));
/// assert!(can(Role::Admin, Action::ConfirmSchedule, &own_entry));
/// ```
pub fn can(role: Role, action: Action, context: &AccessContext<'_>) -> bool {
    use Action::*;

    if !role_allows(role, action) {
        return false;
    }
    if role == Role::Admin {
        return true;
    }

    match action {
        ConfirmSchedule => context.project_assigned() && !context.is_own(),
        ViewScheduleQueue | ViewFinance => context.project_in_scope(),
        ViewWorkerPayments | ViewLiquidations => context.is_own(),
        _ => true,
    }
}
