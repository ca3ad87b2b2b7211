//! Schedule entries: one worker assigned to one project on one date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EntryId, ProjectId, UserId};

/// Hours credited to a freshly assigned entry.
pub const DEFAULT_HOURS_WORKED: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// A worker's assignment to a project on a calendar date.
///
/// Hours are placeholders until a supervisor or admin confirms the entry;
/// only confirmed entries feed payroll generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Unique identifier.
    pub id: EntryId,
    /// The project worked on.
    pub project_id: ProjectId,
    /// The assigned worker.
    pub worker_id: UserId,
    /// The calendar date of the assignment.
    pub date: NaiveDate,
    /// Regular hours worked.
    pub hours_worked: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Whether the hours were signed off.
    pub is_confirmed: bool,
}

impl ScheduleEntry {
    /// Creates an unconfirmed entry with the default hours.
    pub fn assigned(id: EntryId, project_id: ProjectId, worker_id: UserId, date: NaiveDate) -> Self {
        Self {
            id,
            project_id,
            worker_id,
            date,
            hours_worked: DEFAULT_HOURS_WORKED,
            overtime_hours: Decimal::ZERO,
            is_confirmed: false,
        }
    }
}

/// One item of a batch confirmation.
///
/// Missing hours keep the values already on the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfirmation {
    /// The entry to confirm.
    pub entry_id: EntryId,
    /// Regular hours to record.
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// Overtime hours to record.
    #[serde(default)]
    pub overtime: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigned_entry_defaults() {
        let entry = ScheduleEntry::assigned(1, 2, 3, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(entry.hours_worked, Decimal::from(8));
        assert_eq!(entry.overtime_hours, Decimal::ZERO);
        assert!(!entry.is_confirmed);
    }

    #[test]
    fn test_confirmation_hours_are_optional() {
        let item: ScheduleConfirmation = serde_json::from_str(r#"{"entry_id": 9}"#).unwrap();
        assert_eq!(item.entry_id, 9);
        assert!(item.hours.is_none());
        assert!(item.overtime.is_none());
    }
}
