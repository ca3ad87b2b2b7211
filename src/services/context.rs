//! Per-request context.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::access::{AccessContext, Action, can, role_allows};
use crate::error::{EngineError, EngineResult};
use crate::models::{Caller, ProjectId, UserId};
use crate::store::LedgerStore;

/// Everything an operation knows about the request it serves.
///
/// Built once per request by the transport layer and passed explicitly to
/// every service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// The authenticated caller.
    pub caller: Caller,
    /// The calendar date used for "today" (overdue sweeps, reactivation).
    pub today: NaiveDate,
    /// Identifier attached to every log line of the request.
    pub correlation_id: Uuid,
}

impl RequestContext {
    /// Creates a context for `caller` dated with the local calendar date.
    pub fn new(caller: Caller) -> Self {
        Self::at(caller, chrono::Local::now().date_naive())
    }

    /// Creates a context with a fixed "today".
    pub fn at(caller: Caller, today: NaiveDate) -> Self {
        Self {
            caller,
            today,
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Replaces the generated correlation id with one minted upstream.
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    /// Returns true if the caller is an administrator.
    pub fn is_admin(&self) -> bool {
        self.caller.is_admin()
    }

    pub(crate) fn forbidden(&self, action: Action) -> EngineError {
        EngineError::Forbidden {
            role: self.caller.role.to_string(),
            action: action.to_string(),
        }
    }

    /// Fails with `Forbidden` unless the caller's role may perform `action`
    /// on some record.
    pub(crate) fn require_role(&self, action: Action) -> EngineResult<()> {
        if role_allows(self.caller.role, action) {
            Ok(())
        } else {
            Err(self.forbidden(action))
        }
    }

    /// Fails with `Forbidden` unless the caller may perform `action` on the
    /// record described by `access`.
    pub(crate) fn require(&self, action: Action, access: &AccessContext<'_>) -> EngineResult<()> {
        if can(self.caller.role, action, access) {
            Ok(())
        } else {
            Err(self.forbidden(action))
        }
    }

    /// Fails with `Forbidden` unless the caller may perform `action` on a
    /// record owned by `owner`.
    pub(crate) fn require_owner(&self, action: Action, owner: UserId) -> EngineResult<()> {
        self.require(action, &AccessContext::for_caller(self.caller.id).owned_by(owner))
    }

    /// Loads the projects linked to the caller.
    pub(crate) fn caller_projects<S: LedgerStore + ?Sized>(
        &self,
        store: &S,
    ) -> EngineResult<Vec<ProjectId>> {
        store.projects_for_user(self.caller.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
    }

    #[test]
    fn test_each_context_gets_its_own_correlation_id() {
        let caller = Caller::new(1, Role::Admin);
        let a = RequestContext::at(caller, today());
        let b = RequestContext::at(caller, today());
        assert_ne!(a.correlation_id, b.correlation_id);
    }

    #[test]
    fn test_upstream_correlation_id_is_kept() {
        let id = Uuid::new_v4();
        let ctx = RequestContext::at(Caller::new(1, Role::Admin), today()).with_correlation_id(id);
        assert_eq!(ctx.correlation_id, id);
    }

    #[test]
    fn test_require_role_reports_role_and_action() {
        let ctx = RequestContext::at(Caller::new(3, Role::Worker), today());
        match ctx.require_role(Action::GeneratePayroll) {
            Err(EngineError::Forbidden { role, action }) => {
                assert_eq!(role, "worker");
                assert_eq!(action, "generate payroll");
            }
            other => panic!("Expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_require_owner() {
        let ctx = RequestContext::at(Caller::new(3, Role::Worker), today());
        assert!(ctx.require_owner(Action::ViewLiquidations, 3).is_ok());
        assert!(ctx.require_owner(Action::ViewLiquidations, 4).is_err());
    }
}
