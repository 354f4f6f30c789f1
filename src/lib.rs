//! Clusterbucket: Cluster Set Reconciliation
//!
//! Compares two independently produced groupings of the same members and
//! sorts every cluster into one of six relationship buckets by the shape of
//! its association with the other grouping.
//!
//! # Core Concepts
//!
//! - **Association sets**: (cluster, member) pairs for one grouping
//! - **Joint edges**: cluster pairs from the two sets that share a member
//! - **Components**: connected groups of joint edges, classified as 1:1,
//!   1:N, N:1 or N:N by how many clusters they touch on each side
//! - **Buckets**: 0to1 and 1to0 hold unmatched clusters member by member;
//!   the other four hold cluster pairs
//!
//! # Example
//!
//! ```
//! use clusterbucket::{bucketize, AssociationSet, RelationshipCategory};
//!
//! let set1 = AssociationSet::from_pairs([("c1", "m1"), ("c1", "m2")]);
//! let set2 = AssociationSet::from_pairs([("c2", "m1"), ("c3", "m2")]);
//! let buckets = bucketize(&set1, &set2);
//! assert_eq!(buckets.count(RelationshipCategory::OneToN), 2);
//! ```

mod graph;
pub mod sink;
pub mod source;

pub use graph::{
    bucketize, build_index, classify, components, Adjacency, Association, AssociationSet,
    BipartiteIndex, BucketRecord, BucketSummary, Bucketizer, BucketizeError, BucketizeResult,
    Buckets, ClusterId, Component, HomeConflict, JointBuckets, JointEdge, MemberId,
    RelationshipCategory, SetSide,
};
pub use sink::{BucketSink, FileSink, MemorySink, SinkError, SinkResult};
pub use source::{
    convert_member_lists, expand_member_lists, parse_associations, AssociationSource, FileSource,
    SetDescriptor, SourceError, SourceResult, SourceRouter, SqliteSource, TABLE_PREFIX,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
