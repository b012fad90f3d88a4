use crate::models::{ClassificationRecord, ClassificationType};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// How many classifications the log retains.
const DEFAULT_CAPACITY: usize = 256;

/// How many entries the read endpoint reports.
pub const RECENT_LIMIT: usize = 10;

/// Bounded in-memory log of classification events.
///
/// This is ephemeral read-mostly state, not the system of record: a process
/// restart drops it. The capacity bound keeps the log from growing without
/// limit under sustained traffic.
pub struct ClassificationLog {
    records: Mutex<VecDeque<ClassificationRecord>>,
    capacity: usize,
}

impl ClassificationLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Record one classification event and return the stored entry.
    pub fn record(
        &self,
        kind: ClassificationType,
        conversation_id: Option<String>,
    ) -> ClassificationRecord {
        let record = ClassificationRecord {
            id: Uuid::new_v4().to_string(),
            kind,
            timestamp: Utc::now(),
            conversation_id,
        };

        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record.clone());

        record
    }

    /// The last `limit` entries in insertion order: the oldest entry of the
    /// window comes first.
    pub fn recent(&self, limit: usize) -> Vec<ClassificationRecord> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let skip = records.len().saturating_sub(limit);
        records.iter().skip(skip).cloned().collect()
    }
}

impl Default for ClassificationLog {
    fn default() -> Self {
        Self::new()
    }
}
