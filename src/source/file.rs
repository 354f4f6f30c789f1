//! Tab-separated cluster files

use super::traits::{AssociationSource, SetDescriptor, SourceError, SourceResult};
use crate::graph::{Association, AssociationSet, ClusterId, MemberId};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

/// Loads cluster sets from `ClusterID<TAB>MemberID` files
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl FileSource {
    pub fn new() -> Self {
        Self
    }

    /// Read one cluster file
    pub fn load_path(&self, path: &Path) -> SourceResult<AssociationSet> {
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let set = parse_associations(&path.display().to_string(), BufReader::new(file))?;
        debug!(path = %path.display(), records = set.len(), "loaded cluster file");
        Ok(set)
    }
}

impl AssociationSource for FileSource {
    fn load(&self, descriptor: &SetDescriptor) -> SourceResult<AssociationSet> {
        match descriptor {
            SetDescriptor::File { path } => self.load_path(path),
            SetDescriptor::Table { .. } => Err(SourceError::InvalidArgument(format!(
                "file source cannot load table {}",
                descriptor
            ))),
        }
    }
}

/// Parse cluster lines from any reader.
///
/// Blank lines are skipped. Every other line must hold exactly two
/// non-empty tab-separated fields, and no member may appear twice.
/// `origin` names the input in error messages.
pub fn parse_associations(origin: &str, reader: impl BufRead) -> SourceResult<AssociationSet> {
    let mut associations = Vec::new();
    let mut homes: HashMap<MemberId, (ClusterId, usize)> = HashMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }

        let malformed = |reason: String| SourceError::MalformedRecord {
            origin: origin.to_string(),
            line: lineno,
            reason,
        };

        let mut fields = line.split('\t');
        let (Some(cid), Some(mid), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(malformed(format!(
                "expected 2 tab-separated fields, found {}",
                line.split('\t').count()
            )));
        };
        if cid.is_empty() || mid.is_empty() {
            return Err(malformed("empty cluster or member id".to_string()));
        }

        let assoc = Association::new(cid, mid);
        if let Some((home, first_line)) = homes.get(&assoc.member) {
            return Err(malformed(format!(
                "member {} already assigned to cluster {} on line {}",
                assoc.member, home, first_line
            )));
        }
        homes.insert(assoc.member.clone(), (assoc.cluster.clone(), lineno));
        associations.push(assoc);
    }

    Ok(AssociationSet::new(associations))
}

/// Expand `ClusterID<WS>Member<DELIM>Member...` lines into one association
/// per member.
///
/// The cluster id ends at the first run of spaces or tabs; the rest of the
/// line is the member list, split on `delimiter` (taken literally). Each
/// member is trimmed and empty members are dropped. Lines that start with
/// whitespace, have no whitespace at all, or have an empty member list are
/// skipped. No single-home check is made; that happens when the result is
/// loaded.
pub fn expand_member_lists(
    reader: impl BufRead,
    delimiter: &str,
) -> SourceResult<Vec<Association>> {
    if delimiter.is_empty() {
        return Err(SourceError::InvalidArgument("member delimiter must not be empty".to_string()));
    }

    let mut associations = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        let Some(split) = line.find(is_blank) else {
            continue;
        };
        let (cid, rest) = line.split_at(split);
        let members = rest.trim_start_matches(is_blank);
        if cid.is_empty() || members.is_empty() {
            continue;
        }

        associations.extend(
            members
                .split(delimiter)
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(|m| Association::new(cid, m)),
        );
    }
    Ok(associations)
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Convert a member-list cluster file into a `ClusterID<TAB>MemberID` file.
///
/// Refuses to start when `input` is missing or `output` already exists.
/// Returns the number of lines written.
pub fn convert_member_lists(input: &Path, output: &Path, delimiter: &str) -> SourceResult<usize> {
    if !input.exists() {
        return Err(SourceError::NotFound(input.to_path_buf()));
    }
    let associations = expand_member_lists(BufReader::new(File::open(input)?), delimiter)?;

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => SourceError::OutputExists(output.to_path_buf()),
            _ => SourceError::Io(e),
        })?;
    let mut out = BufWriter::new(file);
    for assoc in &associations {
        writeln!(out, "{}\t{}", assoc.cluster, assoc.member)?;
    }
    out.flush()?;

    info!(
        input = %input.display(),
        output = %output.display(),
        records = associations.len(),
        "converted member lists"
    );
    Ok(associations.len())
}
