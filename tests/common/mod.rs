//! Common test utilities for clusterbucket integration tests
//!
//! Builders for association sets, a seeded generator of random
//! well-formed cluster sets, and helpers to flatten buckets.

#![allow(dead_code)]

use clusterbucket::{AssociationSet, BucketRecord, Buckets, RelationshipCategory};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::path::Path;

/// Association set from string pairs
pub fn set(pairs: &[(&str, &str)]) -> AssociationSet {
    AssociationSet::from_pairs(pairs.iter().copied())
}

/// Shape parameters for a generated pair of cluster sets
#[derive(Debug, Clone, Copy)]
pub struct RandomSetConfig {
    /// Size of the shared member universe
    pub members: usize,
    /// Clusters available to each set
    pub clusters: usize,
    /// Probability that a member appears in a given set
    pub coverage: f64,
}

impl Default for RandomSetConfig {
    fn default() -> Self {
        Self {
            members: 40,
            clusters: 12,
            coverage: 0.7,
        }
    }
}

/// Two random cluster sets over the same member universe.
///
/// Every member has at most one cluster per set. Both sets draw cluster
/// ids from the same `c<N>` namespace so textual collisions are common.
pub fn random_pair(seed: u64, config: RandomSetConfig) -> (AssociationSet, AssociationSet) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut one = || {
        let mut pairs = Vec::new();
        for m in 0..config.members {
            if rng.gen_bool(config.coverage) {
                let c = rng.gen_range(0..config.clusters);
                pairs.push((format!("c{}", c), format!("m{}", m)));
            }
        }
        AssociationSet::from_pairs(pairs)
    };
    let set1 = one();
    let set2 = one();
    (set1, set2)
}

/// The two columns of every record in a bucket
pub fn columns(buckets: &Buckets, category: RelationshipCategory) -> Vec<(String, String)> {
    buckets
        .get(category)
        .iter()
        .map(BucketRecord::fields)
        .map(|(l, r)| (l.to_string(), r.to_string()))
        .collect()
}

/// Bucket contents as a set of (category, left, right)
pub fn record_set(buckets: &Buckets) -> BTreeSet<(RelationshipCategory, String, String)> {
    let mut out = BTreeSet::new();
    for (category, records) in buckets.iter() {
        for record in records {
            let (l, r) = record.fields();
            out.insert((category, l.to_string(), r.to_string()));
        }
    }
    out
}

/// Write a cluster file in `ClusterID<TAB>MemberID` form
pub fn write_cluster_file(path: &Path, set: &AssociationSet) {
    let text: String = set
        .iter()
        .map(|a| format!("{}\t{}\n", a.cluster, a.member))
        .collect();
    std::fs::write(path, text).expect("failed to write cluster file");
}

/// Read a bucket file back as (left, right) lines
pub fn read_bucket(path: &Path) -> Vec<(String, String)> {
    std::fs::read_to_string(path)
        .expect("failed to read bucket file")
        .lines()
        .map(|line| {
            let (l, r) = line.split_once('\t').expect("bucket line without tab");
            (l.to_string(), r.to_string())
        })
        .collect()
}
