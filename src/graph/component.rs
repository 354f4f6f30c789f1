//! Component classifier: connected components of the joint-edge graph

use super::category::RelationshipCategory;
use super::cluster::{ClusterId, SetSide};
use super::index::JointEdge;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

/// Joint edges grouped by relationship category
///
/// Holds exactly the four joint categories, each sorted by (cluster1, cluster2).
pub type JointBuckets = BTreeMap<RelationshipCategory, Vec<JointEdge>>;

/// Undirected adjacency of the bipartite graph, one map per side
///
/// Sorted maps keep traversal order, and therefore component order,
/// reproducible.
#[derive(Debug, Default)]
pub struct Adjacency<'a> {
    /// set-1 cluster -> set-2 clusters it shares members with
    deg1: BTreeMap<&'a ClusterId, BTreeSet<&'a ClusterId>>,
    /// set-2 cluster -> set-1 clusters it shares members with
    deg2: BTreeMap<&'a ClusterId, BTreeSet<&'a ClusterId>>,
}

impl<'a> Adjacency<'a> {
    pub fn build(edges: impl IntoIterator<Item = &'a JointEdge>) -> Self {
        let mut adj = Self::default();
        for edge in edges {
            adj.deg1.entry(&edge.cluster1).or_default().insert(&edge.cluster2);
            adj.deg2.entry(&edge.cluster2).or_default().insert(&edge.cluster1);
        }
        adj
    }

    /// Number of set-2 clusters joined to a set-1 cluster
    pub fn degree1(&self, cluster: &ClusterId) -> usize {
        self.deg1.get(cluster).map_or(0, BTreeSet::len)
    }

    /// Number of set-1 clusters joined to a set-2 cluster
    pub fn degree2(&self, cluster: &ClusterId) -> usize {
        self.deg2.get(cluster).map_or(0, BTreeSet::len)
    }

    fn neighbors(
        &self,
        side: SetSide,
        cluster: &ClusterId,
    ) -> impl Iterator<Item = &'a ClusterId> + '_ {
        let map = match side {
            SetSide::First => &self.deg1,
            SetSide::Second => &self.deg2,
        };
        map.get(cluster).into_iter().flat_map(|n| n.iter().copied())
    }

    /// Connected components, in order of their smallest set-1 cluster.
    pub fn components(&self) -> Vec<Component> {
        let mut visited: HashSet<(SetSide, &ClusterId)> = HashSet::new();
        let mut components = Vec::new();

        for &seed in self.deg1.keys() {
            if visited.contains(&(SetSide::First, seed)) {
                continue;
            }

            let mut component = Component::default();
            let mut stack: Vec<(SetSide, &ClusterId)> = vec![(SetSide::First, seed)];

            while let Some((side, current)) = stack.pop() {
                if !visited.insert((side, current)) {
                    continue;
                }
                match side {
                    SetSide::First => {
                        component.nodes1.insert(current.clone());
                    }
                    SetSide::Second => {
                        component.nodes2.insert(current.clone());
                    }
                }
                for neighbor in self.neighbors(side, current) {
                    if !visited.contains(&(side.other(), neighbor)) {
                        stack.push((side.other(), neighbor));
                    }
                }
            }

            // Every edge has exactly one set-1 endpoint, so walking the
            // set-1 nodes lists each edge once.
            for cluster1 in &component.nodes1 {
                for cluster2 in self.neighbors(SetSide::First, cluster1) {
                    component.edges.push(JointEdge {
                        cluster1: cluster1.clone(),
                        cluster2: cluster2.clone(),
                    });
                }
            }

            components.push(component);
        }

        components
    }
}

/// A maximal connected subgraph of the joint-edge graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    pub nodes1: BTreeSet<ClusterId>,
    pub nodes2: BTreeSet<ClusterId>,
    /// Sorted by (cluster1, cluster2)
    pub edges: Vec<JointEdge>,
}

impl Component {
    /// Shape category; depends only on node counts, not on edge density
    pub fn category(&self) -> RelationshipCategory {
        RelationshipCategory::from_shape(self.nodes1.len(), self.nodes2.len())
    }
}

/// Connected components of the graph formed by `edges`
pub fn components(edges: &BTreeSet<JointEdge>) -> Vec<Component> {
    Adjacency::build(edges).components()
}

/// Tag every joint edge with the shape of its component.
///
/// Takes ownership of the finished edge set. The result always holds all
/// four joint categories, empty ones included.
pub fn classify(joint_edges: BTreeSet<JointEdge>) -> JointBuckets {
    let mut buckets: JointBuckets = RelationshipCategory::ALL
        .into_iter()
        .filter(|c| c.is_joint())
        .map(|c| (c, Vec::new()))
        .collect();

    let adjacency = Adjacency::build(&joint_edges);
    let components = adjacency.components();
    debug!(
        edges = joint_edges.len(),
        components = components.len(),
        "classifying joint components"
    );

    for component in components {
        let category = component.category();
        debug_assert!(
            category != RelationshipCategory::OneToN
                || component.nodes2.iter().all(|c| adjacency.degree2(c) == 1)
        );
        debug_assert!(
            category != RelationshipCategory::NToOne
                || component.nodes1.iter().all(|c| adjacency.degree1(c) == 1)
        );
        buckets.entry(category).or_default().extend(component.edges);
    }

    for edges in buckets.values_mut() {
        edges.sort();
    }
    buckets
}
