//! SQLite-backed cluster sets

use super::traits::{
    require_single_home, AssociationSource, SetDescriptor, SourceError, SourceResult,
};
use crate::graph::{Association, AssociationSet};
use rusqlite::types::Value;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Reads cluster sets out of existing SQLite tables
///
/// Thread-safe via internal mutex on the connection.
pub struct SqliteSource {
    conn: Mutex<Connection>,
}

impl SqliteSource {
    /// Open an existing database file
    pub fn open(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }
        Ok(Self::from_connection(Connection::open(path)?))
    }

    /// Wrap an already open connection (in-memory databases, tests)
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn load_table(
        &self,
        table: &str,
        cluster_column: &str,
        member_column: &str,
    ) -> SourceResult<AssociationSet> {
        let sql = format!(
            "SELECT {}, {} FROM {}",
            quote_identifier(cluster_column)?,
            quote_identifier(member_column)?,
            quote_identifier(table)?
        );
        let origin = format!("{}({}, {})", table, cluster_column, member_column);

        let conn = self.conn.lock().map_err(|_| SourceError::Poisoned)?;
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;

        let mut associations = Vec::new();
        while let Some(row) = rows.next()? {
            let rowno = associations.len() + 1;
            let cid = text_value(row.get::<_, Value>(0)?, &origin, rowno, cluster_column)?;
            let mid = text_value(row.get::<_, Value>(1)?, &origin, rowno, member_column)?;
            associations.push(Association::new(cid, mid));
        }
        debug!(table, records = associations.len(), "loaded cluster table");

        require_single_home(&origin, AssociationSet::new(associations))
    }
}

impl AssociationSource for SqliteSource {
    fn load(&self, descriptor: &SetDescriptor) -> SourceResult<AssociationSet> {
        match descriptor {
            SetDescriptor::Table {
                table,
                cluster_column,
                member_column,
            } => self.load_table(table, cluster_column, member_column),
            SetDescriptor::File { path } => Err(SourceError::InvalidArgument(format!(
                "database source cannot load file {}",
                path.display()
            ))),
        }
    }
}

/// Quote a table or column name, accepting only plain identifiers
fn quote_identifier(name: &str) -> SourceResult<String> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(SourceError::InvalidArgument(format!(
            "not a valid table or column name: {:?}",
            name
        )));
    }
    Ok(format!("\"{}\"", name))
}

/// Cluster and member ids may be stored as text or numbers
fn text_value(value: Value, origin: &str, row: usize, column: &str) -> SourceResult<String> {
    let text = match value {
        Value::Text(s) => s,
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Null | Value::Blob(_) => {
            return Err(SourceError::MalformedRecord {
                origin: origin.to_string(),
                line: row,
                reason: format!("column {} is not a text or numeric id", column),
            })
        }
    };
    if text.is_empty() {
        return Err(SourceError::MalformedRecord {
            origin: origin.to_string(),
            line: row,
            reason: format!("column {} is empty", column),
        });
    }
    Ok(text)
}
