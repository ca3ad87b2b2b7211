//! The engine facade.
//!
//! [`Ledger`] runs every operation in its own transaction against the
//! backing store and, once a state-changing operation has committed, writes
//! an activity record. Reads that advance invoice statuses also run in a
//! transaction so the sweep is persisted.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::access::Action;
use crate::audit::{ActivitySink, record_best_effort};
use crate::config::FinancialPolicy;
use crate::error::EngineResult;
use crate::models::{
    ActivityAction, ActivityRecord, BudgetId, BudgetStatus, DashboardFilter, EntryId,
    FinanceDashboard, Invoice, InvoiceId, InvoiceView, Liquidation, LiquidationAmounts,
    LiquidationPreview, NewPayrollPayment, PayrollEntry, PayrollPayment, PayrollPeriod, PeriodId,
    PeriodSummary, ProjectId, ScheduleConfirmation, ScheduleEntry, UserId, Worker,
};
use crate::services::{
    NewInvoice, PaymentPosting, RequestContext, invoice, liquidation, payments, payroll, schedule,
};
use crate::store::{MemoryStore, Transactional};

/// Transactional entry point to every engine operation.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use chrono::NaiveDate;
/// use labor_engine::audit::MemoryActivityLog;
/// use labor_engine::config::FinancialPolicy;
/// use labor_engine::ledger::Ledger;
/// use labor_engine::models::{Caller, Role, Worker};
/// use labor_engine::services::RequestContext;
/// use labor_engine::store::{LedgerStore, MemoryStore, Transactional};
/// use rust_decimal::Decimal;
///
/// let store = MemoryStore::new();
/// store
///     .transaction(|tx| {
///         let mut worker = Worker::new(10, "Carlos Rojas", Role::Worker);
///         worker.hourly_rate = Some(Decimal::from(5000));
///         tx.save_worker(worker)
///     })
///     .unwrap();
///
/// let ledger = Ledger::new(store, FinancialPolicy::default(), Arc::new(MemoryActivityLog::new()));
/// let day = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
/// let ctx = RequestContext::at(Caller::new(1, Role::Admin), day);
///
/// let entry = ledger.assign_schedule(&ctx, 100, 10, day).unwrap();
/// ledger.confirm_schedule(&ctx, entry.id, Decimal::from(12), Decimal::ZERO).unwrap();
///
/// let summary = ledger.generate_payroll(&ctx, day, day).unwrap();
/// assert_eq!(summary.entries[0].gross_salary, Decimal::from(60000));
/// assert_eq!(summary.entries[0].net_salary, Decimal::from(54500));
/// ```
pub struct Ledger<S: Transactional = MemoryStore> {
    store: S,
    policy: FinancialPolicy,
    activity: Arc<dyn ActivitySink>,
}

impl<S: Transactional> Ledger<S> {
    /// Creates a ledger over `store`.
    pub fn new(store: S, policy: FinancialPolicy, activity: Arc<dyn ActivitySink>) -> Self {
        Self {
            store,
            policy,
            activity,
        }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the financial policy in force.
    pub fn policy(&self) -> &FinancialPolicy {
        &self.policy
    }

    /// Returns up to `limit` activity records, newest first. Admin only.
    pub fn activity_log(
        &self,
        ctx: &RequestContext,
        limit: usize,
    ) -> EngineResult<Vec<ActivityRecord>> {
        ctx.require_role(Action::ViewActivity)?;
        self.activity.recent(limit)
    }

    fn audit(
        &self,
        ctx: &RequestContext,
        action: ActivityAction,
        entity_type: &str,
        entity_id: Option<u64>,
        details: Option<String>,
    ) {
        record_best_effort(
            self.activity.as_ref(),
            ActivityRecord::new(ctx.caller.id, action, entity_type, entity_id, details),
        );
    }

    // Schedules

    /// See [`schedule::assign`].
    pub fn assign_schedule(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        worker_id: UserId,
        date: NaiveDate,
    ) -> EngineResult<ScheduleEntry> {
        let entry = self
            .store
            .transaction(|tx| schedule::assign(tx, ctx, project_id, worker_id, date))?;
        self.audit(
            ctx,
            ActivityAction::Create,
            "SCHEDULE",
            Some(entry.id),
            Some(format!("worker {} on project {} for {}", worker_id, project_id, date)),
        );
        Ok(entry)
    }

    /// See [`schedule::confirm`].
    pub fn confirm_schedule(
        &self,
        ctx: &RequestContext,
        entry_id: EntryId,
        hours: Decimal,
        overtime: Decimal,
    ) -> EngineResult<ScheduleEntry> {
        let entry = self
            .store
            .transaction(|tx| schedule::confirm(tx, ctx, entry_id, hours, overtime))?;
        self.audit(
            ctx,
            ActivityAction::Update,
            "SCHEDULE",
            Some(entry_id),
            Some(format!("confirmed {} h + {} h overtime", hours, overtime)),
        );
        Ok(entry)
    }

    /// See [`schedule::confirm_batch`].
    pub fn confirm_schedule_batch(
        &self,
        ctx: &RequestContext,
        items: &[ScheduleConfirmation],
    ) -> EngineResult<usize> {
        let updated = self
            .store
            .transaction(|tx| schedule::confirm_batch(tx, ctx, items))?;
        self.audit(
            ctx,
            ActivityAction::Update,
            "SCHEDULE",
            None,
            Some(format!("batch confirmed {} of {} entries", updated, items.len())),
        );
        Ok(updated)
    }

    /// See [`schedule::list_for_approval`].
    pub fn approval_queue(
        &self,
        ctx: &RequestContext,
        date: NaiveDate,
        project_id: Option<ProjectId>,
    ) -> EngineResult<Vec<ScheduleEntry>> {
        self.store
            .transaction(|tx| schedule::list_for_approval(&*tx, ctx, date, project_id))
    }

    /// See [`schedule::calendar`].
    pub fn calendar(
        &self,
        ctx: &RequestContext,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<ScheduleEntry>> {
        self.store
            .transaction(|tx| schedule::calendar(&*tx, ctx, start, end))
    }

    /// See [`schedule::delete`].
    pub fn delete_schedule(
        &self,
        ctx: &RequestContext,
        entry_id: EntryId,
    ) -> EngineResult<ScheduleEntry> {
        let entry = self
            .store
            .transaction(|tx| schedule::delete(tx, ctx, entry_id))?;
        self.audit(ctx, ActivityAction::Delete, "SCHEDULE", Some(entry_id), None);
        Ok(entry)
    }

    // Payroll

    /// See [`payroll::generate`].
    pub fn generate_payroll(
        &self,
        ctx: &RequestContext,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<PeriodSummary> {
        let summary = self
            .store
            .transaction(|tx| payroll::generate(tx, ctx, &self.policy, start, end))?;
        self.audit(
            ctx,
            ActivityAction::Create,
            "PAYROLL_PERIOD",
            Some(summary.period.id),
            Some(format!(
                "{} to {}, {} entries",
                start,
                end,
                summary.entries.len()
            )),
        );
        Ok(summary)
    }

    /// See [`payroll::toggle_deductions`].
    pub fn toggle_deductions(
        &self,
        ctx: &RequestContext,
        entry_id: EntryId,
        apply: bool,
    ) -> EngineResult<PayrollEntry> {
        let entry = self.store.transaction(|tx| {
            payroll::toggle_deductions(tx, ctx, &self.policy, entry_id, apply)
        })?;
        self.audit(
            ctx,
            ActivityAction::Update,
            "PAYROLL_ENTRY",
            Some(entry_id),
            Some(format!("apply_deductions = {}", apply)),
        );
        Ok(entry)
    }

    /// See [`payroll::confirm_period`].
    pub fn confirm_period(
        &self,
        ctx: &RequestContext,
        period_id: PeriodId,
    ) -> EngineResult<PayrollPeriod> {
        let period = self
            .store
            .transaction(|tx| payroll::confirm_period(tx, ctx, period_id))?;
        self.audit(
            ctx,
            ActivityAction::Update,
            "PAYROLL_PERIOD",
            Some(period_id),
            Some("finalized".to_string()),
        );
        Ok(period)
    }

    /// See [`payroll::delete_period`].
    pub fn delete_period(
        &self,
        ctx: &RequestContext,
        period_id: PeriodId,
    ) -> EngineResult<PayrollPeriod> {
        let period = self
            .store
            .transaction(|tx| payroll::delete_period(tx, ctx, period_id))?;
        self.audit(
            ctx,
            ActivityAction::Delete,
            "PAYROLL_PERIOD",
            Some(period_id),
            None,
        );
        Ok(period)
    }

    /// See [`payroll::period_summary`].
    pub fn period_summary(
        &self,
        ctx: &RequestContext,
        period_id: PeriodId,
    ) -> EngineResult<PeriodSummary> {
        self.store
            .transaction(|tx| payroll::period_summary(&*tx, ctx, &self.policy, period_id))
    }

    /// See [`payroll::list_periods`].
    pub fn list_periods(&self, ctx: &RequestContext) -> EngineResult<Vec<PayrollPeriod>> {
        self.store
            .transaction(|tx| payroll::list_periods(&*tx, ctx))
    }

    // Invoices and budgets

    /// See [`invoice::create_invoice`].
    pub fn create_invoice(
        &self,
        ctx: &RequestContext,
        budget_id: BudgetId,
        request: NewInvoice,
    ) -> EngineResult<Invoice> {
        let created = self
            .store
            .transaction(|tx| invoice::create_invoice(tx, ctx, budget_id, request))?;
        self.audit(
            ctx,
            ActivityAction::Create,
            "INVOICE",
            Some(created.id),
            Some(format!("{} for {}", created.invoice_number, created.amount)),
        );
        Ok(created)
    }

    /// See [`invoice::delete_invoice`].
    pub fn delete_invoice(
        &self,
        ctx: &RequestContext,
        invoice_id: InvoiceId,
    ) -> EngineResult<Invoice> {
        let deleted = self
            .store
            .transaction(|tx| invoice::delete_invoice(tx, ctx, invoice_id))?;
        self.audit(
            ctx,
            ActivityAction::Delete,
            "INVOICE",
            Some(invoice_id),
            Some(deleted.invoice_number.clone()),
        );
        Ok(deleted)
    }

    /// See [`invoice::pay`].
    pub fn pay_invoice(
        &self,
        ctx: &RequestContext,
        invoice_id: InvoiceId,
        posting: PaymentPosting,
    ) -> EngineResult<InvoiceView> {
        let view = self
            .store
            .transaction(|tx| invoice::pay(tx, ctx, invoice_id, posting))?;
        self.audit(
            ctx,
            ActivityAction::Update,
            "INVOICE",
            Some(invoice_id),
            Some(format!("payment posted, status {:?}", view.invoice.status)),
        );
        Ok(view)
    }

    /// See [`invoice::budget_status`].
    pub fn budget_status(
        &self,
        ctx: &RequestContext,
        budget_id: BudgetId,
    ) -> EngineResult<BudgetStatus> {
        self.store
            .transaction(|tx| invoice::budget_status(tx, ctx, budget_id))
    }

    /// See [`invoice::finance_dashboard`].
    pub fn finance_dashboard(
        &self,
        ctx: &RequestContext,
        filter: &DashboardFilter,
    ) -> EngineResult<FinanceDashboard> {
        self.store
            .transaction(|tx| invoice::finance_dashboard(tx, ctx, filter))
    }

    // Worker payments and liquidations

    /// See [`payments::record_payment`].
    pub fn record_payment(
        &self,
        ctx: &RequestContext,
        worker_id: UserId,
        request: NewPayrollPayment,
    ) -> EngineResult<PayrollPayment> {
        let payment = self
            .store
            .transaction(|tx| payments::record_payment(tx, ctx, worker_id, request))?;
        self.audit(
            ctx,
            ActivityAction::Create,
            "PAYROLL_PAYMENT",
            Some(payment.id),
            Some(format!("{} to worker {}", payment.amount, worker_id)),
        );
        Ok(payment)
    }

    /// See [`payments::payment_history`].
    pub fn payment_history(
        &self,
        ctx: &RequestContext,
        worker_id: UserId,
    ) -> EngineResult<Vec<PayrollPayment>> {
        self.store
            .transaction(|tx| payments::payment_history(&*tx, ctx, worker_id))
    }

    /// See [`liquidation::preview`].
    pub fn preview_liquidation(
        &self,
        ctx: &RequestContext,
        worker_id: UserId,
        date: NaiveDate,
        custom_start: Option<NaiveDate>,
    ) -> EngineResult<LiquidationPreview> {
        self.store.transaction(|tx| {
            liquidation::preview(&*tx, ctx, &self.policy, worker_id, date, custom_start)
        })
    }

    /// See [`liquidation::commit`].
    pub fn commit_liquidation(
        &self,
        ctx: &RequestContext,
        worker_id: UserId,
        date: NaiveDate,
        amounts: LiquidationAmounts,
    ) -> EngineResult<Liquidation> {
        let record = self
            .store
            .transaction(|tx| liquidation::commit(tx, ctx, worker_id, date, amounts))?;
        self.audit(
            ctx,
            ActivityAction::Create,
            "LIQUIDATION",
            Some(record.id),
            Some(format!(
                "worker {} liquidated for {}",
                worker_id, record.total_amount
            )),
        );
        Ok(record)
    }

    /// See [`liquidation::history`].
    pub fn liquidation_history(
        &self,
        ctx: &RequestContext,
        worker_id: UserId,
    ) -> EngineResult<Vec<Liquidation>> {
        self.store
            .transaction(|tx| liquidation::history(&*tx, ctx, worker_id))
    }

    /// See [`liquidation::reactivate`].
    pub fn reactivate_worker(
        &self,
        ctx: &RequestContext,
        worker_id: UserId,
    ) -> EngineResult<Worker> {
        let worker = self
            .store
            .transaction(|tx| liquidation::reactivate(tx, ctx, worker_id))?;
        self.audit(
            ctx,
            ActivityAction::Update,
            "USER",
            Some(worker_id),
            Some(format!("reactivated from {}", ctx.today)),
        );
        Ok(worker)
    }
}
