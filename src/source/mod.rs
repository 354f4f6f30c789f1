//! Association sources
//!
//! A source turns a `SetDescriptor` into an `AssociationSet`. Files and
//! SQLite tables are supported; `SourceRouter` picks between them.

mod file;
mod router;
mod sqlite;
mod traits;

pub use file::{convert_member_lists, expand_member_lists, parse_associations, FileSource};
pub use router::SourceRouter;
pub use sqlite::SqliteSource;
pub use traits::{AssociationSource, SetDescriptor, SourceError, SourceResult, TABLE_PREFIX};
