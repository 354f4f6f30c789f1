//! Bucket sink trait definitions

use crate::graph::{BucketRecord, RelationshipCategory};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing buckets
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sink lock poisoned")]
    Poisoned,
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Receives one ordered bucket per relationship category
///
/// The sink chooses the destination and the serialization; records must be
/// kept in the order supplied. Written buckets stay pending until `commit`,
/// which publishes all of them together; `discard` drops them instead.
pub trait BucketSink {
    fn write(&self, category: RelationshipCategory, records: &[BucketRecord]) -> SinkResult<()>;

    /// Publish every bucket written since the last commit
    fn commit(&self) -> SinkResult<()>;

    /// Drop every bucket written since the last commit
    fn discard(&self);
}
