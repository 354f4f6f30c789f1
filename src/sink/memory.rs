//! In-memory bucket sink

use super::traits::{BucketSink, SinkError, SinkResult};
use crate::graph::{BucketRecord, RelationshipCategory};
use std::sync::Mutex;

type Written = Vec<(RelationshipCategory, Vec<BucketRecord>)>;

/// Collects written buckets in call order
///
/// Writes are held back until `commit`; `writes` and `bucket` only ever
/// show committed buckets.
#[derive(Debug, Default)]
pub struct MemorySink {
    pending: Mutex<Written>,
    written: Mutex<Written>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every committed `write` call so far, in order
    pub fn writes(&self) -> SinkResult<Written> {
        Ok(self.written.lock().map_err(|_| SinkError::Poisoned)?.clone())
    }

    /// Records of the most recent write for a category
    pub fn bucket(&self, category: RelationshipCategory) -> SinkResult<Option<Vec<BucketRecord>>> {
        let written = self.written.lock().map_err(|_| SinkError::Poisoned)?;
        Ok(written
            .iter()
            .rev()
            .find(|(c, _)| *c == category)
            .map(|(_, r)| r.clone()))
    }
}

impl BucketSink for MemorySink {
    fn write(&self, category: RelationshipCategory, records: &[BucketRecord]) -> SinkResult<()> {
        self.pending
            .lock()
            .map_err(|_| SinkError::Poisoned)?
            .push((category, records.to_vec()));
        Ok(())
    }

    fn commit(&self) -> SinkResult<()> {
        let mut pending = self.pending.lock().map_err(|_| SinkError::Poisoned)?;
        let mut written = self.written.lock().map_err(|_| SinkError::Poisoned)?;
        written.append(&mut pending);
        Ok(())
    }

    fn discard(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.clear();
        }
    }
}
