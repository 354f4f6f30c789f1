//! Core reconciliation: data model, bipartite index, component classifier

mod bucket;
mod category;
mod cluster;
mod component;
mod engine;
mod index;


pub use bucket::{BucketRecord, Buckets};
pub use category::RelationshipCategory;
pub use cluster::{Association, AssociationSet, ClusterId, HomeConflict, MemberId, SetSide};
pub use component::{classify, components, Adjacency, Component, JointBuckets};
pub use engine::{bucketize, BucketSummary, Bucketizer, BucketizeError, BucketizeResult};
pub use index::{build_index, BipartiteIndex, JointEdge};
