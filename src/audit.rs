//! Activity trail.
//!
//! Recording activity is a side channel: a failure to record is logged and
//! never propagated to the operation that triggered it.

use std::sync::RwLock;

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::ActivityRecord;

/// Destination for activity records.
pub trait ActivitySink: Send + Sync {
    /// Appends a record to the trail.
    fn record(&self, record: ActivityRecord) -> EngineResult<()>;

    /// Returns up to `limit` records, newest first.
    fn recent(&self, limit: usize) -> EngineResult<Vec<ActivityRecord>>;
}

/// Records `record`, logging and discarding any failure.
pub fn record_best_effort(sink: &dyn ActivitySink, record: ActivityRecord) {
    let entity_type = record.entity_type.clone();
    let entity_id = record.entity_id;
    if let Err(error) = sink.record(record) {
        warn!(
            entity_type = %entity_type,
            entity_id = ?entity_id,
            error = %error,
            "Failed to record activity"
        );
    }
}

/// Activity trail kept in memory.
#[derive(Debug, Default)]
pub struct MemoryActivityLog {
    records: RwLock<Vec<ActivityRecord>>,
}

impl MemoryActivityLog {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record, oldest first.
    pub fn records(&self) -> Vec<ActivityRecord> {
        self.records
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl ActivitySink for MemoryActivityLog {
    fn record(&self, record: ActivityRecord) -> EngineResult<()> {
        self.records
            .write()
            .map_err(|_| EngineError::Storage {
                message: "activity log lock poisoned".to_string(),
            })?
            .push(record);
        Ok(())
    }

    fn recent(&self, limit: usize) -> EngineResult<Vec<ActivityRecord>> {
        let records = self.records.read().map_err(|_| EngineError::Storage {
            message: "activity log lock poisoned".to_string(),
        })?;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}
