//! Bipartite index: hash join of two cluster sets on member id

use super::cluster::{Association, AssociationSet, ClusterId, MemberId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// A (set-1 cluster, set-2 cluster) pair sharing at least one member
///
/// Ordered by (cluster1, cluster2).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JointEdge {
    pub cluster1: ClusterId,
    pub cluster2: ClusterId,
}

impl JointEdge {
    pub fn new(cluster1: impl Into<ClusterId>, cluster2: impl Into<ClusterId>) -> Self {
        Self {
            cluster1: cluster1.into(),
            cluster2: cluster2.into(),
        }
    }

    /// The same edge seen from the other set
    pub fn swapped(&self) -> Self {
        Self {
            cluster1: self.cluster2.clone(),
            cluster2: self.cluster1.clone(),
        }
    }
}

/// Result of joining two cluster sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BipartiteIndex {
    /// Associations of set-1 clusters that share no member with set 2,
    /// sorted by (cluster, member)
    pub disjoint1: Vec<Association>,
    /// Associations of set-2 clusters that share no member with set 1,
    /// sorted by (cluster, member)
    pub disjoint2: Vec<Association>,
    /// Distinct cluster pairs joined by at least one shared member
    pub joint_edges: BTreeSet<JointEdge>,
}

impl BipartiteIndex {
    /// True when the two sets share no member at all
    pub fn is_fully_disjoint(&self) -> bool {
        self.joint_edges.is_empty()
    }
}

/// Join `set1` and `set2` on member id.
///
/// Disjointness is decided per cluster: a cluster with any shared member
/// contributes only edges, none of its associations are emitted as
/// disjoint, even the unmatched ones.
pub fn build_index(set1: &AssociationSet, set2: &AssociationSet) -> BipartiteIndex {
    // Members normally have one home; keep every home so malformed input
    // still joins deterministically.
    let mut homes1: HashMap<&MemberId, Vec<&ClusterId>> = HashMap::with_capacity(set1.len());
    for assoc in set1 {
        homes1.entry(&assoc.member).or_default().push(&assoc.cluster);
    }

    let mut shared1: HashSet<&ClusterId> = HashSet::new();
    let mut shared2: HashSet<&ClusterId> = HashSet::new();
    let mut joint_edges = BTreeSet::new();

    for assoc in set2 {
        let Some(clusters1) = homes1.get(&assoc.member) else {
            continue;
        };
        shared2.insert(&assoc.cluster);
        for &cluster1 in clusters1 {
            shared1.insert(cluster1);
            joint_edges.insert(JointEdge {
                cluster1: cluster1.clone(),
                cluster2: assoc.cluster.clone(),
            });
        }
    }

    BipartiteIndex {
        disjoint1: unshared(set1, &shared1),
        disjoint2: unshared(set2, &shared2),
        joint_edges,
    }
}

fn unshared(set: &AssociationSet, shared: &HashSet<&ClusterId>) -> Vec<Association> {
    let mut out: Vec<Association> = set
        .iter()
        .filter(|a| !shared.contains(&a.cluster))
        .cloned()
        .collect();
    out.sort();
    out
}
