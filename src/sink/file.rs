//! Bucket files named `<prefix>.<suffix>`
//!
//! Buckets are first written to `<prefix>.<suffix>.tmp` and renamed into
//! place on commit, so a failed run never leaves a partial set behind.

use super::traits::{BucketSink, SinkError, SinkResult};
use crate::graph::{BucketRecord, RelationshipCategory};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Writes each bucket to `<prefix>.<suffix>`, one `left<TAB>right` line per record
#[derive(Debug)]
pub struct FileSink {
    prefix: PathBuf,
    staged: Mutex<Vec<RelationshipCategory>>,
}

impl FileSink {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            staged: Mutex::new(Vec::new()),
        }
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Destination file for a category, e.g. `out/bucket.1toN`
    pub fn path_for(&self, category: RelationshipCategory) -> PathBuf {
        self.with_extension(category, "")
    }

    /// Where a bucket waits until commit, e.g. `out/bucket.1toN.tmp`
    pub fn staging_path_for(&self, category: RelationshipCategory) -> PathBuf {
        self.with_extension(category, ".tmp")
    }

    fn with_extension(&self, category: RelationshipCategory, tail: &str) -> PathBuf {
        let mut name = self.prefix.clone().into_os_string();
        name.push(".");
        name.push(category.suffix());
        name.push(tail);
        PathBuf::from(name)
    }

    fn take_staged(&self) -> SinkResult<Vec<RelationshipCategory>> {
        let mut staged = self.staged.lock().map_err(|_| SinkError::Poisoned)?;
        Ok(std::mem::take(&mut *staged))
    }

    fn remove_staged(&self, categories: &[RelationshipCategory]) {
        for &category in categories {
            let path = self.staging_path_for(category);
            if let Err(err) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %err, "could not remove staged bucket");
            }
        }
    }
}

impl BucketSink for FileSink {
    fn write(&self, category: RelationshipCategory, records: &[BucketRecord]) -> SinkResult<()> {
        let path = self.staging_path_for(category);
        let io_err = |source| SinkError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_err)?;
        {
            let mut staged = self.staged.lock().map_err(|_| SinkError::Poisoned)?;
            if !staged.contains(&category) {
                staged.push(category);
            }
        }

        let mut out = BufWriter::new(file);
        for record in records {
            let (left, right) = record.fields();
            writeln!(out, "{}\t{}", left, right).map_err(io_err)?;
        }
        out.flush().map_err(io_err)?;

        debug!(path = %path.display(), records = records.len(), "staged bucket");
        Ok(())
    }

    /// Rename every staged bucket into place.
    ///
    /// Destinations are checked before anything is renamed. If a rename
    /// still fails, the buckets already renamed by this commit are removed
    /// again along with the remaining staged files.
    fn commit(&self) -> SinkResult<()> {
        let staged = self.take_staged()?;

        if let Some(blocked) = staged
            .iter()
            .map(|&category| self.path_for(category))
            .find(|path| path.is_dir())
        {
            self.remove_staged(&staged);
            return Err(SinkError::Io {
                path: blocked,
                source: io::Error::other("a directory is in the way"),
            });
        }

        let mut published: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (done, &category) in staged.iter().enumerate() {
            let target = self.path_for(category);
            if let Err(source) = fs::rename(self.staging_path_for(category), &target) {
                for path in &published {
                    let _ = fs::remove_file(path);
                }
                self.remove_staged(&staged[done..]);
                return Err(SinkError::Io {
                    path: target,
                    source,
                });
            }
            published.push(target);
        }

        debug!(prefix = %self.prefix.display(), buckets = published.len(), "published buckets");
        Ok(())
    }

    fn discard(&self) {
        match self.take_staged() {
            Ok(staged) => self.remove_staged(&staged),
            Err(err) => warn!(error = %err, "could not discard staged buckets"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Association, JointEdge};

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn path_appends_suffix() {
        let sink = FileSink::new("/tmp/run/bucket");
        assert_eq!(
            sink.path_for(RelationshipCategory::NToOne),
            PathBuf::from("/tmp/run/bucket.Nto1")
        );
        assert_eq!(
            sink.path_for(RelationshipCategory::ZeroToOne),
            PathBuf::from("/tmp/run/bucket.0to1")
        );
        assert_eq!(
            sink.staging_path_for(RelationshipCategory::OneToN),
            PathBuf::from("/tmp/run/bucket.1toN.tmp")
        );
    }

    #[test]
    fn writes_records_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("b"));
        let records = vec![
            BucketRecord::from(JointEdge::new("c2", "x")),
            BucketRecord::from(JointEdge::new("c1", "x")),
        ];
        sink.write(RelationshipCategory::NToOne, &records).unwrap();
        sink.commit().unwrap();
        let text = fs::read_to_string(dir.path().join("b.Nto1")).unwrap();
        assert_eq!(text, "c2\tx\nc1\tx\n");
    }

    #[test]
    fn nothing_is_visible_before_commit() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("b"));
        sink.write(RelationshipCategory::OneToOne, &[JointEdge::new("a", "b").into()])
            .unwrap();
        assert_eq!(names(dir.path()), vec!["b.1to1.tmp"]);

        sink.commit().unwrap();
        assert_eq!(names(dir.path()), vec!["b.1to1"]);
    }

    #[test]
    fn discard_removes_staged_buckets() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("b"));
        sink.write(RelationshipCategory::ZeroToOne, &[]).unwrap();
        sink.write(RelationshipCategory::OneToZero, &[]).unwrap();
        sink.discard();
        assert!(names(dir.path()).is_empty());

        // A later commit has nothing left to publish
        sink.commit().unwrap();
        assert!(names(dir.path()).is_empty());
    }

    #[test]
    fn empty_bucket_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("b"));
        sink.write(RelationshipCategory::OneToZero, &[]).unwrap();
        sink.commit().unwrap();
        let path = dir.path().join("b.1to0");
        assert!(path.exists());
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn replaces_existing_file_on_commit() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("b"));
        fs::write(dir.path().join("b.0to1"), "stale\tline\nmore\tstale\n").unwrap();
        sink.write(
            RelationshipCategory::ZeroToOne,
            &[Association::new("c9", "m9").into()],
        )
        .unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("b.0to1")).unwrap(),
            "stale\tline\nmore\tstale\n"
        );
        sink.commit().unwrap();
        let text = fs::read_to_string(dir.path().join("b.0to1")).unwrap();
        assert_eq!(text, "c9\tm9\n");
    }

    #[test]
    fn blocked_destination_publishes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("b"));
        fs::write(dir.path().join("b.0to1"), "old\tbucket\n").unwrap();
        fs::create_dir(dir.path().join("b.1to1")).unwrap();

        for category in RelationshipCategory::ALL {
            sink.write(category, &[Association::new("c", "m").into()])
                .unwrap();
        }
        let err = sink.commit().unwrap_err();
        match err {
            SinkError::Io { path, .. } => assert!(path.ends_with("b.1to1")),
            other => panic!("expected Io error, got {:?}", other),
        }

        // Only what was there before the run remains
        assert_eq!(names(dir.path()), vec!["b.0to1", "b.1to1"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("b.0to1")).unwrap(),
            "old\tbucket\n"
        );
    }

    #[test]
    fn unwritable_destination_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("missing-dir").join("b"));
        let err = sink.write(RelationshipCategory::OneToOne, &[]).unwrap_err();
        match err {
            SinkError::Io { path, .. } => assert!(path.ends_with("b.1to1.tmp")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
