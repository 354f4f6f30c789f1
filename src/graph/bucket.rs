//! Bucket records and the six-way partition produced by a run

use super::category::RelationshipCategory;
use super::cluster::Association;
use super::index::JointEdge;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of a bucket
///
/// The disjoint buckets (0to1, 1to0) carry whole clusters at member level;
/// the joint buckets carry cluster pairs. Both serialize as two columns.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketRecord {
    Member(Association),
    Edge(JointEdge),
}

impl BucketRecord {
    /// The two output columns: (cluster, member) or (cluster1, cluster2)
    pub fn fields(&self) -> (&str, &str) {
        match self {
            Self::Member(a) => (a.cluster.as_str(), a.member.as_str()),
            Self::Edge(e) => (e.cluster1.as_str(), e.cluster2.as_str()),
        }
    }
}

impl std::fmt::Display for BucketRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (left, right) = self.fields();
        write!(f, "{}\t{}", left, right)
    }
}

impl From<Association> for BucketRecord {
    fn from(a: Association) -> Self {
        Self::Member(a)
    }
}

impl From<JointEdge> for BucketRecord {
    fn from(e: JointEdge) -> Self {
        Self::Edge(e)
    }
}

/// Complete classification: every category, each with its ordered records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    buckets: BTreeMap<RelationshipCategory, Vec<BucketRecord>>,
}

impl Buckets {
    /// All six buckets, empty
    pub fn new() -> Self {
        Self {
            buckets: RelationshipCategory::ALL
                .into_iter()
                .map(|c| (c, Vec::new()))
                .collect(),
        }
    }

    /// Records of one bucket, in output order
    pub fn get(&self, category: RelationshipCategory) -> &[BucketRecord] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn set(&mut self, category: RelationshipCategory, records: Vec<BucketRecord>) {
        self.buckets.insert(category, records);
    }

    /// Buckets in category order
    pub fn iter(&self) -> impl Iterator<Item = (RelationshipCategory, &[BucketRecord])> + '_ {
        self.buckets.iter().map(|(c, r)| (*c, r.as_slice()))
    }

    /// Number of records in one bucket
    pub fn count(&self, category: RelationshipCategory) -> usize {
        self.get(category).len()
    }

    /// Total records across all buckets
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True when no bucket holds a record
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Record counts per category
    pub fn counts(&self) -> BTreeMap<RelationshipCategory, usize> {
        self.buckets.iter().map(|(c, r)| (*c, r.len())).collect()
    }
}

impl Default for Buckets {
    fn default() -> Self {
        Self::new()
    }
}
