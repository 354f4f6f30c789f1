//! Descriptor-based dispatch between file and table sources

use super::file::FileSource;
use super::sqlite::SqliteSource;
use super::traits::{AssociationSource, SetDescriptor, SourceError, SourceResult};
use crate::graph::AssociationSet;

/// Routes each descriptor to the source that can read it
///
/// Files are always readable; tables need a database to be attached.
#[derive(Default)]
pub struct SourceRouter {
    files: FileSource,
    database: Option<SqliteSource>,
}

impl SourceRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the database that table descriptors are read from
    pub fn with_database(mut self, database: SqliteSource) -> Self {
        self.database = Some(database);
        self
    }

    pub fn has_database(&self) -> bool {
        self.database.is_some()
    }
}

impl AssociationSource for SourceRouter {
    fn load(&self, descriptor: &SetDescriptor) -> SourceResult<AssociationSet> {
        match descriptor {
            SetDescriptor::File { .. } => self.files.load(descriptor),
            SetDescriptor::Table { .. } => match &self.database {
                Some(db) => db.load(descriptor),
                None => Err(SourceError::InvalidArgument(format!(
                    "table {} given but no database was configured",
                    descriptor
                ))),
            },
        }
    }
}
