//! Executor module for file operations

pub mod copy;
pub mod tree;

use crate::types::{Manifest, SizeMismatch, SyncError};
use crate::Config;
use camino::Utf8Path;
use std::cell::RefCell;
use std::path::{Component, Path, PathBuf};

/// Statistics for a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Files whose bytes were written.
    pub files_copied: usize,
    /// Files left alone because the destination was current.
    pub files_skipped: usize,
    /// Aggregate copied bytes.
    pub bytes_copied: u64,
    /// Non-fatal size warnings raised during the run.
    pub size_mismatches: Vec<SizeMismatch>,
}

impl ExecutionStats {
    fn record(&mut self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::Copied { bytes, .. } => {
                self.files_copied += 1;
                self.bytes_copied += bytes;
            }
            ExecutionEvent::Skipped { .. } => self.files_skipped += 1,
            ExecutionEvent::SizeMismatch(warning) => self.size_mismatches.push(warning.clone()),
            ExecutionEvent::CopyStart { .. } | ExecutionEvent::Complete { .. } => {}
        }
    }
}

/// Events emitted while copying.
#[derive(Debug)]
pub enum ExecutionEvent {
    /// Both files are open and bytes are about to move.
    CopyStart { from: PathBuf, to: PathBuf },
    /// Destination received the bytes and the source mtime.
    Copied { from: PathBuf, to: PathBuf, bytes: u64 },
    /// Destination was already current.
    Skipped { from: PathBuf, to: PathBuf },
    /// Byte count differed from the stat'ed size; the copy went ahead.
    SizeMismatch(SizeMismatch),
    /// Every manifest entry was processed without error.
    Complete { stats: ExecutionStats },
}

impl ExecutionEvent {
    /// Short name, handy for logs and tests.
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionEvent::CopyStart { .. } => "start",
            ExecutionEvent::Copied { .. } => "copied",
            ExecutionEvent::Skipped { .. } => "skipped",
            ExecutionEvent::SizeMismatch(_) => "size-mismatch",
            ExecutionEvent::Complete { .. } => "complete",
        }
    }
}

/// Optional callback used to receive execution events.
pub type ExecutionCallback<'a> = dyn Fn(&ExecutionEvent) + 'a;

pub use copy::copy_file;
pub use tree::copy_dir;

/// Copy everything the manifest names from `config.source` to `config.destination`
///
/// All `files` entries go first, then all `dirs` entries, each list in
/// manifest order. The first failure aborts the run; files already copied
/// stay in place. The error is wrapped with the entry's source path.
pub fn execute_manifest(
    manifest: &Manifest,
    config: &Config,
    on_event: Option<&ExecutionCallback<'_>>,
) -> Result<ExecutionStats, SyncError> {
    let stats = RefCell::new(ExecutionStats::default());
    {
        let tally: &ExecutionCallback<'_> = &|event: &ExecutionEvent| {
            stats.borrow_mut().record(event);
            emit_event(on_event, event);
        };

        for entry in &manifest.files {
            let (src, dest) = resolve_entry(config, entry);
            copy_file(&src, &dest, Some(tally)).map_err(|e| SyncError::for_entry(&src, e))?;
        }

        for entry in &manifest.dirs {
            let (src, dest) = resolve_entry(config, entry);
            copy_dir(&src, &dest, Some(tally)).map_err(|e| SyncError::for_entry(&src, e))?;
        }
    }

    let stats = stats.into_inner();
    emit_event(
        on_event,
        &ExecutionEvent::Complete {
            stats: stats.clone(),
        },
    );
    Ok(stats)
}

/// Source and destination paths for one manifest entry.
///
/// A leading `/` on the entry is dropped so it always lands under the roots.
pub fn resolve_entry(config: &Config, entry: &Utf8Path) -> (PathBuf, PathBuf) {
    let relative = relative_part(entry.as_std_path());
    (config.source.join(&relative), config.destination.join(&relative))
}

fn relative_part(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}

pub(crate) fn emit_event(on_event: Option<&ExecutionCallback<'_>>, event: &ExecutionEvent) {
    if let Some(callback) = on_event {
        callback(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(source: &TempDir, destination: &TempDir) -> Config {
        Config {
            source: source.path().to_path_buf(),
            destination: destination.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_resolve_entry_joins_both_roots() {
        let config = Config {
            source: PathBuf::from("/dev/site"),
            destination: PathBuf::from("/srv/site"),
            ..Config::default()
        };

        let (src, dest) = resolve_entry(&config, Utf8Path::new("base/tpb.js"));
        assert_eq!(src, PathBuf::from("/dev/site/base/tpb.js"));
        assert_eq!(dest, PathBuf::from("/srv/site/base/tpb.js"));
    }

    #[test]
    #[cfg(unix)]
    fn test_resolve_entry_keeps_absolute_entries_under_roots() {
        let config = Config {
            source: PathBuf::from("/dev/site"),
            destination: PathBuf::from("/srv/site"),
            ..Config::default()
        };

        let (src, dest) = resolve_entry(&config, Utf8Path::new("/index.html"));
        assert_eq!(src, PathBuf::from("/dev/site/index.html"));
        assert_eq!(dest, PathBuf::from("/srv/site/index.html"));
    }

    #[test]
    fn test_execute_manifest_copies_files_then_dirs() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let dst = tempfile::tempdir().expect("create dst tempdir");
        let config = config_for(&src, &dst);

        fs::write(src.path().join("index.html"), b"<html>").expect("write index");
        fs::create_dir_all(src.path().join("base")).expect("create base");
        fs::write(src.path().join("base/app.js"), b"app()").expect("write app");

        let manifest = Manifest::from_json(r#"{"dirs":["base"],"files":["index.html"]}"#)
            .expect("parse manifest");

        let copied = RefCell::new(Vec::new());
        let callback = |event: &ExecutionEvent| {
            if let ExecutionEvent::Copied { to, .. } = event {
                copied.borrow_mut().push(to.clone());
            }
        };

        let stats = execute_manifest(&manifest, &config, Some(&callback)).expect("execute");

        assert_eq!(stats.files_copied, 2);
        assert_eq!(stats.files_skipped, 0);
        assert_eq!(stats.bytes_copied, 11);
        assert!(stats.size_mismatches.is_empty());
        assert_eq!(
            *copied.borrow(),
            vec![dst.path().join("index.html"), dst.path().join("base/app.js")]
        );
    }

    #[test]
    fn test_execute_manifest_counts_skips_on_rerun() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let dst = tempfile::tempdir().expect("create dst tempdir");
        let config = config_for(&src, &dst);
        fs::write(src.path().join("a.txt"), b"a").expect("write a");

        let manifest = Manifest::from_json(r#"{"files":["a.txt","a.txt"]}"#).expect("parse");
        let stats = execute_manifest(&manifest, &config, None).expect("execute");

        assert_eq!(stats.files_copied, 1);
        assert_eq!(stats.files_skipped, 1);
    }

    #[test]
    fn test_execute_manifest_aborts_with_entry_context() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let dst = tempfile::tempdir().expect("create dst tempdir");
        let config = config_for(&src, &dst);
        fs::write(src.path().join("later.txt"), b"later").expect("write later");

        let manifest =
            Manifest::from_json(r#"{"files":["missing.txt","later.txt"]}"#).expect("parse");

        let labels = RefCell::new(Vec::new());
        let callback = |event: &ExecutionEvent| labels.borrow_mut().push(event.label());
        let err = execute_manifest(&manifest, &config, Some(&callback)).unwrap_err();

        match &err {
            SyncError::Entry { path, source } => {
                assert_eq!(path, &src.path().join("missing.txt"));
                assert!(matches!(**source, SyncError::Stat { .. }));
            }
            other => panic!("expected entry error, got {other:?}"),
        }
        assert!(!dst.path().join("later.txt").exists());
        assert!(labels.borrow().is_empty(), "no complete event after abort");
    }
}
