//! Cluster set data model: identifiers, associations, and association sets

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Identifier of a cluster within one cluster set
///
/// Unique only inside its own set. Ids from the two sets are never
/// compared with each other; they only meet through shared members.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(String);

impl ClusterId {
    /// Create a ClusterId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClusterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClusterId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a cluster member; the join key between the two sets
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Create a MemberId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which of the two cluster sets a cluster belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetSide {
    First,
    Second,
}

impl SetSide {
    /// The opposite side
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl std::fmt::Display for SetSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "set 1"),
            Self::Second => write!(f, "set 2"),
        }
    }
}

/// "This cluster contains this member"
///
/// Field order matters: the derived ordering sorts by cluster, then member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Association {
    pub cluster: ClusterId,
    pub member: MemberId,
}

impl Association {
    pub fn new(cluster: impl Into<ClusterId>, member: impl Into<MemberId>) -> Self {
        Self {
            cluster: cluster.into(),
            member: member.into(),
        }
    }
}

/// A member that was found in more than one association of the same set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeConflict {
    pub member: MemberId,
    pub first: ClusterId,
    pub second: ClusterId,
}

impl std::fmt::Display for HomeConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.first == self.second {
            write!(f, "member {} listed twice in cluster {}", self.member, self.first)
        } else {
            write!(
                f,
                "member {} belongs to both cluster {} and cluster {}",
                self.member, self.first, self.second
            )
        }
    }
}

/// All associations of one cluster set, in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationSet {
    associations: Vec<Association>,
}

impl AssociationSet {
    pub fn new(associations: Vec<Association>) -> Self {
        Self { associations }
    }

    /// Build a set from (cluster, member) pairs
    pub fn from_pairs<C, M>(pairs: impl IntoIterator<Item = (C, M)>) -> Self
    where
        C: Into<ClusterId>,
        M: Into<MemberId>,
    {
        Self {
            associations: pairs
                .into_iter()
                .map(|(c, m)| Association::new(c, m))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.associations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Association> {
        self.associations.iter()
    }

    pub fn as_slice(&self) -> &[Association] {
        &self.associations
    }

    /// Number of distinct clusters
    pub fn cluster_count(&self) -> usize {
        self.associations
            .iter()
            .map(|a| &a.cluster)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of distinct members
    pub fn member_count(&self) -> usize {
        self.associations
            .iter()
            .map(|a| &a.member)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Check that every member has exactly one home cluster.
    ///
    /// Returns the first offending member in load order.
    pub fn check_single_home(&self) -> Result<(), HomeConflict> {
        let mut homes: HashMap<&MemberId, &ClusterId> = HashMap::with_capacity(self.len());
        for assoc in &self.associations {
            if let Some(existing) = homes.insert(&assoc.member, &assoc.cluster) {
                return Err(HomeConflict {
                    member: assoc.member.clone(),
                    first: existing.clone(),
                    second: assoc.cluster.clone(),
                });
            }
        }
        Ok(())
    }

    /// Consume the set, returning its associations in load order
    pub fn into_inner(self) -> Vec<Association> {
        self.associations
    }
}

impl FromIterator<Association> for AssociationSet {
    fn from_iter<I: IntoIterator<Item = Association>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AssociationSet {
    type Item = &'a Association;
    type IntoIter = std::slice::Iter<'a, Association>;

    fn into_iter(self) -> Self::IntoIter {
        self.associations.iter()
    }
}
