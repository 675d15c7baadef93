//! Error types for coolju

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for sync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Manifest file could not be read
    #[error("Cannot read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest contents are not a valid `{"files": [...], "dirs": [...]}` document
    #[error("Cannot parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Source directory could not be listed
    #[error("Cannot read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source exists but is not a regular file (directory, fifo, socket...)
    #[error("{path} is not a regular file")]
    NotARegularFile { path: PathBuf },

    /// Source could not be stat'ed
    #[error("Cannot stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Opening, creating or streaming bytes failed
    #[error("Copy {from} -> {to} failed: {source}")]
    ByteCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes landed but the destination timestamps could not be set
    #[error("Cannot set times on {path}: {source}")]
    TimestampSet {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure while copying one manifest entry
    #[error("Copying {path} failed: {source}")]
    Entry {
        path: PathBuf,
        #[source]
        source: Box<SyncError>,
    },
}

impl SyncError {
    /// Wrap an error with the manifest entry's source path
    pub fn for_entry(path: impl Into<PathBuf>, source: SyncError) -> Self {
        SyncError::Entry {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Innermost error, looking through `Entry` context
    pub fn root_cause(&self) -> &SyncError {
        match self {
            SyncError::Entry { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Check if this error happened before any copying started
    pub fn is_manifest_error(&self) -> bool {
        matches!(
            self,
            SyncError::ManifestRead { .. } | SyncError::ManifestParse { .. }
        )
    }

    /// Path the innermost error is about
    pub fn failing_path(&self) -> Option<&Path> {
        match self.root_cause() {
            SyncError::ManifestRead { path, .. }
            | SyncError::ManifestParse { path, .. }
            | SyncError::DirectoryRead { path, .. }
            | SyncError::NotARegularFile { path }
            | SyncError::Stat { path, .. }
            | SyncError::TimestampSet { path, .. } => Some(path),
            SyncError::ByteCopy { from, .. } => Some(from),
            SyncError::Config(_) | SyncError::Entry { .. } => None,
        }
    }
}

/// Bytes written differ from the size the source reported before the copy.
///
/// Non-fatal: reported, collected in the run stats, never returned as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeMismatch {
    pub from: PathBuf,
    pub to: PathBuf,
    pub expected: u64,
    pub copied: u64,
}

impl fmt::Display for SizeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} and {} differ in size: expected {} bytes, copied {}",
            self.from.display(),
            self.to.display(),
            self.expected,
            self.copied
        )
    }
}
