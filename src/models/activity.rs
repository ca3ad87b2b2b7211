//! Activity trail records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// What kind of change an activity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    /// A record was created.
    Create,
    /// A record was changed.
    Update,
    /// A record was removed.
    Delete,
}

/// One line of the activity trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Who did it.
    pub user_id: UserId,
    /// What kind of change.
    pub action: ActivityAction,
    /// The kind of record touched (e.g. "PAYROLL_PERIOD").
    pub entity_type: String,
    /// The id of the record touched.
    pub entity_id: Option<u64>,
    /// Human-readable details.
    pub details: Option<String>,
    /// When it happened.
    pub at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Creates a record stamped with the current time.
    pub fn new(
        user_id: UserId,
        action: ActivityAction,
        entity_type: impl Into<String>,
        entity_id: Option<u64>,
        details: Option<String>,
    ) -> Self {
        Self {
            user_id,
            action,
            entity_type: entity_type.into(),
            entity_id,
            details,
            at: Utc::now(),
        }
    }
}
