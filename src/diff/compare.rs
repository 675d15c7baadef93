//! Destination freshness check

use filetime::FileTime;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// State of a destination file relative to its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Destination does not exist
    Missing,

    /// Destination could not be stat'ed for another reason (permissions, I/O)
    Unreadable,

    /// Destination mtime equals the source mtime exactly
    Current,

    /// Destination exists with any other mtime, older or newer
    Stale,
}

impl Freshness {
    pub fn needs_copy(self) -> bool {
        !matches!(self, Freshness::Current)
    }
}

/// Stat `dest` and classify it against `src_mtime`. No side effects.
///
/// Equality is exact to the nanosecond; volumes with coarser timestamp
/// resolution will look `Stale` on every run.
pub fn check_destination(dest: &Path, src_mtime: FileTime) -> Freshness {
    match fs::metadata(dest) {
        Ok(metadata) => {
            if FileTime::from_last_modification_time(&metadata) == src_mtime {
                Freshness::Current
            } else {
                Freshness::Stale
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Freshness::Missing,
        Err(e) => {
            tracing::warn!(
                "Cannot stat destination {}: {}; copying as if it were missing",
                dest.display(),
                e
            );
            Freshness::Unreadable
        }
    }
}

/// Decide whether `dest` must be (re)written from a source with `src_mtime`.
///
/// When the destination is missing or unreadable, its parent directory is
/// created on the way out. Creation errors are dropped here: the copy that
/// follows fails with the real cause.
pub fn needs_copy(dest: &Path, src_mtime: FileTime) -> bool {
    let freshness = check_destination(dest, src_mtime);

    if matches!(freshness, Freshness::Missing | Freshness::Unreadable) {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::debug!("Cannot create {}: {}", parent.display(), e);
            }
        }
    }

    freshness.needs_copy()
}
