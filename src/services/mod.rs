//! Operations of the labor engine.
//!
//! Each operation is a free function over any [`LedgerStore`](crate::store::LedgerStore)
//! taking an explicit [`RequestContext`]. Functions check authorization,
//! validate input, compute and write through the store; they never open
//! transactions themselves; the [`Ledger`](crate::ledger::Ledger) wraps each
//! call in one.

mod context;
pub mod invoice;
pub mod liquidation;
pub mod payments;
pub mod payroll;
pub mod schedule;

#[cfg(test)]
pub(crate) mod fixtures;

pub use context::RequestContext;
pub use invoice::{NewInvoice, PaymentPosting};
