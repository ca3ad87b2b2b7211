//! Application state for the labor engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::ledger::Ledger;
use crate::models::Caller;
use crate::services::RequestContext;

/// Shared application state.
///
/// Holds the ledger every handler works against and, for tests and
/// replays, an optional fixed calendar date used as "today".
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<Ledger>,
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    /// Creates a new application state over `ledger`.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(ledger),
            fixed_today: None,
        }
    }

    /// Pins "today" for every request served by this state.
    pub fn with_fixed_date(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// Returns the ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Builds the context for one request.
    pub fn request_context(&self, caller: Caller, correlation_id: Uuid) -> RequestContext {
        let ctx = match self.fixed_today {
            Some(today) => RequestContext::at(caller, today),
            None => RequestContext::new(caller),
        };
        ctx.with_correlation_id(correlation_id)
    }
}
