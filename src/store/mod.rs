//! Persistence for the labor engine.
//!
//! Services talk to [`LedgerStore`]; the [`Ledger`](crate::ledger::Ledger)
//! opens one [`Transactional::transaction`] per operation.

mod memory;
mod traits;

pub use memory::{MemoryStore, MemoryTables};
pub use traits::{LedgerStore, Transactional};
