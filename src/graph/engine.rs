//! Bucketizer: the main entry point for reconciling two cluster sets

use super::bucket::{BucketRecord, Buckets};
use super::category::RelationshipCategory;
use super::cluster::AssociationSet;
use super::component::classify;
use super::index::build_index;
use crate::sink::{BucketSink, SinkError, SinkResult};
use crate::source::{AssociationSource, SetDescriptor, SourceError};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur in a bucketize run
#[derive(Debug, Error)]
pub enum BucketizeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error(transparent)]
    Source(SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl From<SourceError> for BucketizeError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            e @ SourceError::MalformedRecord { .. } => Self::MalformedRecord(e.to_string()),
            other => Self::Source(other),
        }
    }
}

/// Result type for bucketize runs
pub type BucketizeResult<T> = Result<T, BucketizeError>;

/// Record counts of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    pub set1_records: usize,
    pub set2_records: usize,
    pub buckets: BTreeMap<RelationshipCategory, usize>,
}

/// Classify every cluster of both sets into the six relationship buckets.
///
/// Pure: no I/O, no state beyond this call. Disjoint buckets are sorted by
/// (cluster, member), joint buckets by (cluster1, cluster2).
pub fn bucketize(set1: &AssociationSet, set2: &AssociationSet) -> Buckets {
    let index = build_index(set1, set2);
    let mut buckets = Buckets::new();

    buckets.set(
        RelationshipCategory::ZeroToOne,
        index.disjoint2.into_iter().map(BucketRecord::from).collect(),
    );
    buckets.set(
        RelationshipCategory::OneToZero,
        index.disjoint1.into_iter().map(BucketRecord::from).collect(),
    );
    for (category, edges) in classify(index.joint_edges) {
        buckets.set(category, edges.into_iter().map(BucketRecord::from).collect());
    }

    buckets
}

/// Drives a full run: load both sets, classify, hand every bucket to a sink
pub struct Bucketizer<S, K> {
    source: S,
    sink: K,
}

impl<S: AssociationSource, K: BucketSink> Bucketizer<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self { source, sink }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Run against the two described sets.
    ///
    /// All six buckets are written, empty ones included, in category order,
    /// then committed together. The first failure aborts the run and the
    /// sink discards whatever it was given, so either the full partition is
    /// produced or nothing is.
    pub fn run(
        &self,
        set1: &SetDescriptor,
        set2: &SetDescriptor,
    ) -> BucketizeResult<BucketSummary> {
        let assoc1 = self.source.load(set1)?;
        let assoc2 = self.source.load(set2)?;
        info!(source = %set1, records = assoc1.len(), "Source 1 records");
        info!(source = %set2, records = assoc2.len(), "Source 2 records");

        let buckets = bucketize(&assoc1, &assoc2);
        if let Err(err) = self.publish(&buckets) {
            warn!(error = %err, "discarding buckets of failed run");
            self.sink.discard();
            return Err(err.into());
        }

        Ok(BucketSummary {
            set1_records: assoc1.len(),
            set2_records: assoc2.len(),
            buckets: buckets.counts(),
        })
    }

    fn publish(&self, buckets: &Buckets) -> SinkResult<()> {
        for (category, records) in buckets.iter() {
            self.sink.write(category, records)?;
            info!(bucket = %category, records = records.len(), "bucket written");
        }
        self.sink.commit()
    }
}
