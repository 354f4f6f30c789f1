//! Relationship categories (the six output buckets)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Shape of a cluster's association with the other cluster set
///
/// Variant order is bucket order: output is grouped by category in this
/// order, then sorted within each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RelationshipCategory {
    /// Set-2 cluster sharing no member with set 1
    #[serde(rename = "0to1")]
    ZeroToOne,
    /// Set-1 cluster sharing no member with set 2
    #[serde(rename = "1to0")]
    OneToZero,
    #[serde(rename = "1to1")]
    OneToOne,
    #[serde(rename = "1toN")]
    OneToN,
    #[serde(rename = "Nto1")]
    NToOne,
    #[serde(rename = "NtoN")]
    NToN,
}

impl RelationshipCategory {
    /// All categories in bucket order
    pub const ALL: [RelationshipCategory; 6] = [
        Self::ZeroToOne,
        Self::OneToZero,
        Self::OneToOne,
        Self::OneToN,
        Self::NToOne,
        Self::NToN,
    ];

    /// Bucket file suffix, e.g. `1toN`
    pub fn suffix(self) -> &'static str {
        match self {
            Self::ZeroToOne => "0to1",
            Self::OneToZero => "1to0",
            Self::OneToOne => "1to1",
            Self::OneToN => "1toN",
            Self::NToOne => "Nto1",
            Self::NToN => "NtoN",
        }
    }

    /// True for the four buckets holding (cluster1, cluster2) pairs
    pub fn is_joint(self) -> bool {
        !matches!(self, Self::ZeroToOne | Self::OneToZero)
    }

    /// The category the same records land in when the two sets are exchanged
    pub fn swapped(self) -> Self {
        match self {
            Self::ZeroToOne => Self::OneToZero,
            Self::OneToZero => Self::ZeroToOne,
            Self::OneToN => Self::NToOne,
            Self::NToOne => Self::OneToN,
            same @ (Self::OneToOne | Self::NToN) => same,
        }
    }

    /// Category of a connected component from its node count on each side.
    ///
    /// Both counts are at least 1 for any component built from edges.
    pub fn from_shape(nodes1: usize, nodes2: usize) -> Self {
        match (nodes1 > 1, nodes2 > 1) {
            (false, false) => Self::OneToOne,
            (false, true) => Self::OneToN,
            (true, false) => Self::NToOne,
            (true, true) => Self::NToN,
        }
    }
}

impl std::fmt::Display for RelationshipCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for RelationshipCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.suffix() == s)
            .ok_or_else(|| format!("unknown bucket suffix: {}", s))
    }
}
