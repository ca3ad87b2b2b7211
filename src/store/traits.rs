//! Storage abstraction for the labor engine.
//!
//! [`LedgerStore`] is the repository seen by the service layer: one method
//! per query or write the operations need, with no knowledge of how rows are
//! kept. [`Transactional`] opens a unit of work over a store and commits it
//! only when the operation succeeds.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    BudgetId, BudgetLine, EntryId, Invoice, InvoiceId, LineId, Liquidation, Payment,
    PayrollEntry, PayrollPayment, PayrollPeriod, PeriodId, ProjectBudget, ProjectId,
    ScheduleEntry, UserId, Worker,
};

/// Repository for every record the engine reads or writes.
///
/// `insert_*` methods ignore the `id` of the record passed in, assign a fresh
/// one and return the stored record. `save_*` methods overwrite an existing
/// record (or create it, for records keyed by a collaborator-owned id).
pub trait LedgerStore {
    // Workers and project assignments

    /// Retrieve a worker by id.
    fn worker(&self, id: UserId) -> EngineResult<Option<Worker>>;

    /// Create or replace a worker.
    fn save_worker(&mut self, worker: Worker) -> EngineResult<()>;

    /// Link a user to a project (supervisor assignment or client ownership).
    fn assign_project(&mut self, user_id: UserId, project_id: ProjectId) -> EngineResult<()>;

    /// Projects linked to a user, ascending.
    fn projects_for_user(&self, user_id: UserId) -> EngineResult<Vec<ProjectId>>;

    // Schedule entries

    /// Store a new schedule entry.
    fn insert_schedule(&mut self, entry: ScheduleEntry) -> EngineResult<ScheduleEntry>;

    /// Retrieve a schedule entry by id.
    fn schedule(&self, id: EntryId) -> EngineResult<Option<ScheduleEntry>>;

    /// Overwrite an existing schedule entry.
    fn save_schedule(&mut self, entry: ScheduleEntry) -> EngineResult<()>;

    /// Delete a schedule entry. Returns false if it did not exist.
    fn delete_schedule(&mut self, id: EntryId) -> EngineResult<bool>;

    /// Entries dated within `[start, end]`, ordered by date then id.
    fn schedules_between(&self, start: NaiveDate, end: NaiveDate)
    -> EngineResult<Vec<ScheduleEntry>>;

    // Payroll

    /// Store a new payroll period.
    fn insert_period(&mut self, period: PayrollPeriod) -> EngineResult<PayrollPeriod>;

    /// Retrieve a payroll period by id.
    fn period(&self, id: PeriodId) -> EngineResult<Option<PayrollPeriod>>;

    /// Every payroll period, ordered by id.
    fn periods(&self) -> EngineResult<Vec<PayrollPeriod>>;

    /// Overwrite an existing payroll period.
    fn save_period(&mut self, period: PayrollPeriod) -> EngineResult<()>;

    /// Delete a period together with all its entries. Returns false if the
    /// period did not exist.
    fn delete_period(&mut self, id: PeriodId) -> EngineResult<bool>;

    /// Store a new payroll entry.
    fn insert_payroll_entry(&mut self, entry: PayrollEntry) -> EngineResult<PayrollEntry>;

    /// Retrieve a payroll entry by id.
    fn payroll_entry(&self, id: EntryId) -> EngineResult<Option<PayrollEntry>>;

    /// Overwrite an existing payroll entry.
    fn save_payroll_entry(&mut self, entry: PayrollEntry) -> EngineResult<()>;

    /// Entries of a period, ordered by worker id.
    fn entries_for_period(&self, period_id: PeriodId) -> EngineResult<Vec<PayrollEntry>>;

    // Budgets and invoices

    /// Store a new budget.
    fn insert_budget(&mut self, budget: ProjectBudget) -> EngineResult<ProjectBudget>;

    /// Retrieve a budget by id.
    fn budget(&self, id: BudgetId) -> EngineResult<Option<ProjectBudget>>;

    /// Every budget, ordered by id.
    fn budgets(&self) -> EngineResult<Vec<ProjectBudget>>;

    /// Store a new budget line.
    fn insert_budget_line(&mut self, line: BudgetLine) -> EngineResult<BudgetLine>;

    /// Retrieve a budget line by id.
    fn budget_line(&self, id: LineId) -> EngineResult<Option<BudgetLine>>;

    /// Lines of a budget, ordered by id.
    fn budget_lines(&self, budget_id: BudgetId) -> EngineResult<Vec<BudgetLine>>;

    /// Store a new invoice.
    fn insert_invoice(&mut self, invoice: Invoice) -> EngineResult<Invoice>;

    /// Retrieve an invoice by id.
    fn invoice(&self, id: InvoiceId) -> EngineResult<Option<Invoice>>;

    /// Overwrite an existing invoice.
    fn save_invoice(&mut self, invoice: Invoice) -> EngineResult<()>;

    /// Delete an invoice and its payment. Returns false if it did not exist.
    fn delete_invoice(&mut self, id: InvoiceId) -> EngineResult<bool>;

    /// Invoices of a budget, ordered by id.
    fn invoices_for_budget(&self, budget_id: BudgetId) -> EngineResult<Vec<Invoice>>;

    /// The payment attached to an invoice.
    fn payment(&self, invoice_id: InvoiceId) -> EngineResult<Option<Payment>>;

    /// Create or replace the payment of an invoice.
    fn save_payment(&mut self, payment: Payment) -> EngineResult<()>;

    // Worker payments and liquidations

    /// Store a new salary payment.
    fn insert_payroll_payment(&mut self, payment: PayrollPayment)
    -> EngineResult<PayrollPayment>;

    /// Salary payments of a worker, ordered by id.
    fn payroll_payments(&self, worker_id: UserId) -> EngineResult<Vec<PayrollPayment>>;

    /// Store a new liquidation.
    fn insert_liquidation(&mut self, liquidation: Liquidation) -> EngineResult<Liquidation>;

    /// Liquidations of a worker, ordered by id.
    fn liquidations(&self, worker_id: UserId) -> EngineResult<Vec<Liquidation>>;
}

/// A backend able to run an operation as one atomic unit of work.
pub trait Transactional: Send + Sync {
    /// The store handed to the operation.
    type Tx: LedgerStore;

    /// Runs `operation` and commits its writes if it returns `Ok`.
    ///
    /// An `Err` discards every write the operation made.
    fn transaction<T, F>(&self, operation: F) -> EngineResult<T>
    where
        F: FnOnce(&mut Self::Tx) -> EngineResult<T>;
}
