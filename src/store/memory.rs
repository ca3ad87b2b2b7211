//! In-process store.
//!
//! All tables live behind one `RwLock`. A transaction clones the tables,
//! runs the operation against the copy and swaps it in on success, so an
//! operation that fails halfway leaves nothing behind. Writers are
//! serialized by the lock.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    BudgetId, BudgetLine, EntryId, Invoice, InvoiceId, LineId, Liquidation, LiquidationId,
    Payment, PaymentId, PayrollEntry, PayrollPayment, PayrollPeriod, PeriodId, ProjectBudget,
    ProjectId, ScheduleEntry, UserId, Worker,
};

use super::traits::{LedgerStore, Transactional};

#[derive(Debug, Clone, Default)]
struct Sequences {
    schedule: EntryId,
    period: PeriodId,
    payroll_entry: EntryId,
    budget: BudgetId,
    line: LineId,
    invoice: InvoiceId,
    payroll_payment: PaymentId,
    liquidation: LiquidationId,
}

fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// The rows of every table. This is what a transaction operates on.
#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    workers: BTreeMap<UserId, Worker>,
    assignments: BTreeSet<(UserId, ProjectId)>,
    schedules: BTreeMap<EntryId, ScheduleEntry>,
    periods: BTreeMap<PeriodId, PayrollPeriod>,
    payroll_entries: BTreeMap<EntryId, PayrollEntry>,
    budgets: BTreeMap<BudgetId, ProjectBudget>,
    lines: BTreeMap<LineId, BudgetLine>,
    invoices: BTreeMap<InvoiceId, Invoice>,
    payments: BTreeMap<InvoiceId, Payment>,
    payroll_payments: BTreeMap<PaymentId, PayrollPayment>,
    liquidations: BTreeMap<LiquidationId, Liquidation>,
    sequences: Sequences,
}

fn missing(entity: &'static str, id: u64) -> EngineError {
    EngineError::NotFound { entity, id }
}

impl LedgerStore for MemoryTables {
    fn worker(&self, id: UserId) -> EngineResult<Option<Worker>> {
        Ok(self.workers.get(&id).cloned())
    }

    fn save_worker(&mut self, worker: Worker) -> EngineResult<()> {
        self.workers.insert(worker.id, worker);
        Ok(())
    }

    fn assign_project(&mut self, user_id: UserId, project_id: ProjectId) -> EngineResult<()> {
        self.assignments.insert((user_id, project_id));
        Ok(())
    }

    fn projects_for_user(&self, user_id: UserId) -> EngineResult<Vec<ProjectId>> {
        Ok(self
            .assignments
            .range((user_id, ProjectId::MIN)..=(user_id, ProjectId::MAX))
            .map(|(_, project)| *project)
            .collect())
    }

    fn insert_schedule(&mut self, mut entry: ScheduleEntry) -> EngineResult<ScheduleEntry> {
        entry.id = next_id(&mut self.sequences.schedule);
        self.schedules.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn schedule(&self, id: EntryId) -> EngineResult<Option<ScheduleEntry>> {
        Ok(self.schedules.get(&id).cloned())
    }

    fn save_schedule(&mut self, entry: ScheduleEntry) -> EngineResult<()> {
        let slot = self
            .schedules
            .get_mut(&entry.id)
            .ok_or_else(|| missing("schedule entry", entry.id))?;
        *slot = entry;
        Ok(())
    }

    fn delete_schedule(&mut self, id: EntryId) -> EngineResult<bool> {
        Ok(self.schedules.remove(&id).is_some())
    }

    fn schedules_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<ScheduleEntry>> {
        let mut entries: Vec<ScheduleEntry> = self
            .schedules
            .values()
            .filter(|entry| entry.date >= start && entry.date <= end)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.date, entry.id));
        Ok(entries)
    }

    fn insert_period(&mut self, mut period: PayrollPeriod) -> EngineResult<PayrollPeriod> {
        period.id = next_id(&mut self.sequences.period);
        self.periods.insert(period.id, period.clone());
        Ok(period)
    }

    fn period(&self, id: PeriodId) -> EngineResult<Option<PayrollPeriod>> {
        Ok(self.periods.get(&id).cloned())
    }

    fn periods(&self) -> EngineResult<Vec<PayrollPeriod>> {
        Ok(self.periods.values().cloned().collect())
    }

    fn save_period(&mut self, period: PayrollPeriod) -> EngineResult<()> {
        let slot = self
            .periods
            .get_mut(&period.id)
            .ok_or_else(|| missing("payroll period", period.id))?;
        *slot = period;
        Ok(())
    }

    fn delete_period(&mut self, id: PeriodId) -> EngineResult<bool> {
        if self.periods.remove(&id).is_none() {
            return Ok(false);
        }
        self.payroll_entries.retain(|_, entry| entry.period_id != id);
        Ok(true)
    }

    fn insert_payroll_entry(&mut self, mut entry: PayrollEntry) -> EngineResult<PayrollEntry> {
        if !self.periods.contains_key(&entry.period_id) {
            return Err(missing("payroll period", entry.period_id));
        }
        entry.id = next_id(&mut self.sequences.payroll_entry);
        self.payroll_entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn payroll_entry(&self, id: EntryId) -> EngineResult<Option<PayrollEntry>> {
        Ok(self.payroll_entries.get(&id).cloned())
    }

    fn save_payroll_entry(&mut self, entry: PayrollEntry) -> EngineResult<()> {
        let slot = self
            .payroll_entries
            .get_mut(&entry.id)
            .ok_or_else(|| missing("payroll entry", entry.id))?;
        *slot = entry;
        Ok(())
    }

    fn entries_for_period(&self, period_id: PeriodId) -> EngineResult<Vec<PayrollEntry>> {
        let mut entries: Vec<PayrollEntry> = self
            .payroll_entries
            .values()
            .filter(|entry| entry.period_id == period_id)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.worker_id, entry.id));
        Ok(entries)
    }

    fn insert_budget(&mut self, mut budget: ProjectBudget) -> EngineResult<ProjectBudget> {
        budget.id = next_id(&mut self.sequences.budget);
        self.budgets.insert(budget.id, budget.clone());
        Ok(budget)
    }

    fn budget(&self, id: BudgetId) -> EngineResult<Option<ProjectBudget>> {
        Ok(self.budgets.get(&id).cloned())
    }

    fn budgets(&self) -> EngineResult<Vec<ProjectBudget>> {
        Ok(self.budgets.values().cloned().collect())
    }

    fn insert_budget_line(&mut self, mut line: BudgetLine) -> EngineResult<BudgetLine> {
        if !self.budgets.contains_key(&line.budget_id) {
            return Err(missing("budget", line.budget_id));
        }
        line.id = next_id(&mut self.sequences.line);
        self.lines.insert(line.id, line.clone());
        Ok(line)
    }

    fn budget_line(&self, id: LineId) -> EngineResult<Option<BudgetLine>> {
        Ok(self.lines.get(&id).cloned())
    }

    fn budget_lines(&self, budget_id: BudgetId) -> EngineResult<Vec<BudgetLine>> {
        Ok(self
            .lines
            .values()
            .filter(|line| line.budget_id == budget_id)
            .cloned()
            .collect())
    }

    fn insert_invoice(&mut self, mut invoice: Invoice) -> EngineResult<Invoice> {
        invoice.id = next_id(&mut self.sequences.invoice);
        self.invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    fn invoice(&self, id: InvoiceId) -> EngineResult<Option<Invoice>> {
        Ok(self.invoices.get(&id).cloned())
    }

    fn save_invoice(&mut self, invoice: Invoice) -> EngineResult<()> {
        let slot = self
            .invoices
            .get_mut(&invoice.id)
            .ok_or_else(|| missing("invoice", invoice.id))?;
        *slot = invoice;
        Ok(())
    }

    fn delete_invoice(&mut self, id: InvoiceId) -> EngineResult<bool> {
        self.payments.remove(&id);
        Ok(self.invoices.remove(&id).is_some())
    }

    fn invoices_for_budget(&self, budget_id: BudgetId) -> EngineResult<Vec<Invoice>> {
        Ok(self
            .invoices
            .values()
            .filter(|invoice| invoice.budget_id == budget_id)
            .cloned()
            .collect())
    }

    fn payment(&self, invoice_id: InvoiceId) -> EngineResult<Option<Payment>> {
        Ok(self.payments.get(&invoice_id).cloned())
    }

    fn save_payment(&mut self, payment: Payment) -> EngineResult<()> {
        if !self.invoices.contains_key(&payment.invoice_id) {
            return Err(missing("invoice", payment.invoice_id));
        }
        self.payments.insert(payment.invoice_id, payment);
        Ok(())
    }

    fn insert_payroll_payment(
        &mut self,
        mut payment: PayrollPayment,
    ) -> EngineResult<PayrollPayment> {
        payment.id = next_id(&mut self.sequences.payroll_payment);
        self.payroll_payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    fn payroll_payments(&self, worker_id: UserId) -> EngineResult<Vec<PayrollPayment>> {
        Ok(self
            .payroll_payments
            .values()
            .filter(|payment| payment.worker_id == worker_id)
            .cloned()
            .collect())
    }

    fn insert_liquidation(&mut self, mut liquidation: Liquidation) -> EngineResult<Liquidation> {
        liquidation.id = next_id(&mut self.sequences.liquidation);
        self.liquidations.insert(liquidation.id, liquidation.clone());
        Ok(liquidation)
    }

    fn liquidations(&self, worker_id: UserId) -> EngineResult<Vec<Liquidation>> {
        Ok(self
            .liquidations
            .values()
            .filter(|liquidation| liquidation.worker_id == worker_id)
            .cloned()
            .collect())
    }
}

/// Thread-safe in-memory backend with all-or-nothing transactions.
///
/// # Example
///
/// ```
/// use labor_engine::models::{Role, Worker};
/// use labor_engine::store::{LedgerStore, MemoryStore, Transactional};
///
/// let store = MemoryStore::new();
/// store
///     .transaction(|tx| tx.save_worker(Worker::new(1, "Ana Mora", Role::Worker)))
///     .unwrap();
///
/// let worker = store.transaction(|tx| tx.worker(1)).unwrap();
/// assert_eq!(worker.unwrap().full_name, "Ana Mora");
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<MemoryTables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transactional for MemoryStore {
    type Tx = MemoryTables;

    fn transaction<T, F>(&self, operation: F) -> EngineResult<T>
    where
        F: FnOnce(&mut Self::Tx) -> EngineResult<T>,
    {
        let mut tables = self.tables.write().map_err(|_| EngineError::Storage {
            message: "store lock poisoned".to_string(),
        })?;

        let mut working = tables.clone();
        let result = operation(&mut working)?;
        *tables = working;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceStatus, PeriodStatus, Role};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(start: NaiveDate, end: NaiveDate) -> PayrollPeriod {
        PayrollPeriod {
            id: 0,
            start_date: start,
            end_date: end,
            status: PeriodStatus::Draft,
        }
    }

    fn entry_for(period_id: PeriodId, worker_id: UserId) -> PayrollEntry {
        PayrollEntry {
            id: 0,
            period_id,
            worker_id,
            total_hours: Decimal::from(8),
            overtime_hours: Decimal::ZERO,
            gross_salary: Decimal::from(40000),
            social_charges: Decimal::ZERO,
            net_salary: Decimal::from(40000),
            apply_deductions: false,
            details: vec![],
        }
    }

    #[test]
    fn test_failed_transaction_leaves_store_untouched() {
        let store = MemoryStore::new();

        let result: EngineResult<()> = store.transaction(|tx| {
            tx.save_worker(Worker::new(1, "Ana Mora", Role::Worker))?;
            Err(EngineError::invalid_state("abort"))
        });

        assert!(result.is_err());
        assert!(store.transaction(|tx| tx.worker(1)).unwrap().is_none());
    }

    #[test]
    fn test_committed_transaction_is_visible() {
        let store = MemoryStore::new();
        store
            .transaction(|tx| tx.save_worker(Worker::new(1, "Ana Mora", Role::Worker)))
            .unwrap();
        assert!(store.transaction(|tx| tx.worker(1)).unwrap().is_some());
    }

    #[test]
    fn test_ids_are_assigned_per_table() {
        let store = MemoryStore::new();
        let (first, second) = store
            .transaction(|tx| {
                let a = tx.insert_schedule(ScheduleEntry::assigned(99, 1, 1, date(2026, 3, 2)))?;
                let b = tx.insert_schedule(ScheduleEntry::assigned(99, 1, 1, date(2026, 3, 3)))?;
                Ok((a.id, b.id))
            })
            .unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[test]
    fn test_schedules_between_is_inclusive_and_ordered() {
        let mut tables = MemoryTables::default();
        tables
            .insert_schedule(ScheduleEntry::assigned(0, 1, 1, date(2026, 3, 5)))
            .unwrap();
        tables
            .insert_schedule(ScheduleEntry::assigned(0, 1, 2, date(2026, 3, 1)))
            .unwrap();
        tables
            .insert_schedule(ScheduleEntry::assigned(0, 1, 3, date(2026, 3, 9)))
            .unwrap();

        let found = tables
            .schedules_between(date(2026, 3, 1), date(2026, 3, 5))
            .unwrap();

        let dates: Vec<NaiveDate> = found.iter().map(|entry| entry.date).collect();
        assert_eq!(dates, vec![date(2026, 3, 1), date(2026, 3, 5)]);
    }

    #[test]
    fn test_delete_period_cascades_entries() {
        let mut tables = MemoryTables::default();
        let kept = tables
            .insert_period(period(date(2026, 2, 1), date(2026, 2, 28)))
            .unwrap();
        let doomed = tables
            .insert_period(period(date(2026, 3, 1), date(2026, 3, 31)))
            .unwrap();
        tables.insert_payroll_entry(entry_for(kept.id, 1)).unwrap();
        tables.insert_payroll_entry(entry_for(doomed.id, 1)).unwrap();
        tables.insert_payroll_entry(entry_for(doomed.id, 2)).unwrap();

        assert!(tables.delete_period(doomed.id).unwrap());
        assert!(!tables.delete_period(doomed.id).unwrap());

        assert!(tables.entries_for_period(doomed.id).unwrap().is_empty());
        assert_eq!(tables.entries_for_period(kept.id).unwrap().len(), 1);
    }

    #[test]
    fn test_entry_requires_existing_period() {
        let mut tables = MemoryTables::default();
        assert!(matches!(
            tables.insert_payroll_entry(entry_for(42, 1)),
            Err(EngineError::NotFound { id: 42, .. })
        ));
    }

    #[test]
    fn test_projects_for_user_only_returns_that_user() {
        let mut tables = MemoryTables::default();
        tables.assign_project(5, 30).unwrap();
        tables.assign_project(5, 10).unwrap();
        tables.assign_project(6, 20).unwrap();

        assert_eq!(tables.projects_for_user(5).unwrap(), vec![10, 30]);
        assert!(tables.projects_for_user(7).unwrap().is_empty());
    }

    #[test]
    fn test_delete_invoice_removes_payment() {
        let mut tables = MemoryTables::default();
        let budget = tables.insert_budget(ProjectBudget::new(0, 1)).unwrap();
        let invoice = tables
            .insert_invoice(Invoice {
                id: 0,
                budget_id: budget.id,
                budget_line_id: 1,
                invoice_number: "F-001".to_string(),
                issue_date: date(2026, 4, 1),
                due_date: date(2026, 4, 30),
                amount: Decimal::from(1000),
                status: InvoiceStatus::Pending,
                note: None,
            })
            .unwrap();
        tables
            .save_payment(Payment {
                invoice_id: invoice.id,
                payment_date: date(2026, 4, 10),
                deposit_number: None,
                amount: Decimal::from(1000),
            })
            .unwrap();

        assert!(tables.delete_invoice(invoice.id).unwrap());
        assert!(tables.payment(invoice.id).unwrap().is_none());
    }

    #[test]
    fn test_save_missing_record_is_not_found() {
        let mut tables = MemoryTables::default();
        let result = tables.save_schedule(ScheduleEntry::assigned(7, 1, 1, date(2026, 3, 2)));
        assert!(matches!(result, Err(EngineError::NotFound { id: 7, .. })));
    }
}
