//! Association source trait definitions

use crate::graph::AssociationSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a cluster set
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Input file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Malformed record at {origin}:{line}: {reason}")]
    MalformedRecord {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Connection lock poisoned")]
    Poisoned,
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Marks a command-line set argument as a table rather than a file path
pub const TABLE_PREFIX: &str = "table:";

/// Where one cluster set lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDescriptor {
    /// Tab-separated `ClusterID<TAB>MemberID` lines
    File { path: PathBuf },
    /// Two columns of a database table
    Table {
        table: String,
        cluster_column: String,
        member_column: String,
    },
}

impl SetDescriptor {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    pub fn table(
        table: impl Into<String>,
        cluster_column: impl Into<String>,
        member_column: impl Into<String>,
    ) -> Self {
        Self::Table {
            table: table.into(),
            cluster_column: cluster_column.into(),
            member_column: member_column.into(),
        }
    }

    /// Parse `table:cluster_column:member_column`.
    ///
    /// Returns `None` for anything without exactly three non-empty parts.
    pub fn parse_table(arg: &str) -> Option<Self> {
        let mut parts = arg.split(':');
        let (Some(table), Some(cid), Some(cmid), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        if table.is_empty() || cid.is_empty() || cmid.is_empty() {
            return None;
        }
        Some(Self::table(table, cid, cmid))
    }

    /// Interpret a command-line set argument.
    ///
    /// `table:NAME:CID:CMID` names a table; anything else is a file path,
    /// colons included. A `table:` argument without three non-empty parts
    /// is `InvalidArgument`.
    pub fn from_arg(arg: &str) -> SourceResult<Self> {
        match arg.strip_prefix(TABLE_PREFIX) {
            Some(rest) => Self::parse_table(rest).ok_or_else(|| {
                SourceError::InvalidArgument(format!(
                    "expected {}TABLE:CLUSTER_COLUMN:MEMBER_COLUMN, got {:?}",
                    TABLE_PREFIX, arg
                ))
            }),
            None => Ok(Self::file(arg)),
        }
    }
}

impl std::fmt::Display for SetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File { path } => write!(f, "{}", path.display()),
            Self::Table {
                table,
                cluster_column,
                member_column,
            } => write!(f, "{}({}, {})", table, cluster_column, member_column),
        }
    }
}

/// Supplies the complete association collection for a cluster set
///
/// The classification core never sees where the associations came from.
pub trait AssociationSource {
    /// Load every (cluster, member) pair of the described set
    fn load(&self, descriptor: &SetDescriptor) -> SourceResult<AssociationSet>;
}

impl<S: AssociationSource + ?Sized> AssociationSource for &S {
    fn load(&self, descriptor: &SetDescriptor) -> SourceResult<AssociationSet> {
        (**self).load(descriptor)
    }
}

/// Reject sets where a member has more than one home cluster
pub(crate) fn require_single_home(
    origin: &str,
    set: AssociationSet,
) -> SourceResult<AssociationSet> {
    match set.check_single_home() {
        Ok(()) => Ok(set),
        Err(conflict) => {
            // Report the line of the second occurrence
            let line = set
                .iter()
                .enumerate()
                .filter(|(_, a)| a.member == conflict.member)
                .nth(1)
                .map_or(0, |(i, _)| i + 1);
            Err(SourceError::MalformedRecord {
                origin: origin.to_string(),
                line,
                reason: conflict.to_string(),
            })
        }
    }
}
