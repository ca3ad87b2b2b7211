//! Pure calculation logic for the labor engine.
//!
//! Everything in this module is a function of its arguments and the
//! [`FinancialPolicy`](crate::config::FinancialPolicy): payroll pricing and
//! deductions, budget aggregation, invoice status transitions and liquidation
//! estimates. Persistence and authorization live in the service layer.

mod budget;
mod invoice_status;
mod liquidation;
mod pay;
mod rounding;

pub use budget::{BudgetTotals, adjudicated_total, budget_totals, invoiced_total};
pub use invoice_status::{is_overdue, status_after_payment, sweep_overdue};
pub use liquidation::{calculate_liquidation, months_worked, settlement_hourly_rate, unpaid_days};
pub use pay::{PayBreakdown, apply_deductions, calculate_pay, summarize_entries};
pub use rounding::{round_money, round_to_nearest};
