//! Single file copy with mtime preservation

use super::{emit_event, ExecutionCallback, ExecutionEvent};
use crate::diff::needs_copy;
use crate::types::{CopyOutcome, SizeMismatch, SyncError};
use filetime::FileTime;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

const BUFFER_SIZE: usize = 128 * 1024;

/// Copy one regular file, skipping it when the destination is current
///
/// 1. Stat the source; it must be a regular file
/// 2. Skip if the destination mtime equals the source mtime exactly
///    (a missing destination gets its parent directories created here)
/// 3. Create/truncate the destination and stream the bytes
/// 4. Warn when the byte count differs from the stat'ed size
/// 5. Stamp the destination's atime and mtime with the source mtime
///
/// A failure in step 5 is returned as `SyncError::TimestampSet` even though
/// the destination already holds the new bytes.
///
/// # Example
/// ```no_run
/// use coolju::executor::copy_file;
/// use std::path::Path;
///
/// let outcome = copy_file(Path::new("src/a.js"), Path::new("dist/a.js"), None)?;
/// println!("{} bytes", outcome.bytes());
/// # Ok::<(), coolju::SyncError>(())
/// ```
pub fn copy_file(
    src: &Path,
    dest: &Path,
    on_event: Option<&ExecutionCallback<'_>>,
) -> Result<CopyOutcome, SyncError> {
    copy_file_stamped(src, dest, on_event, stamp_times)
}

type StampFn = fn(&Path, FileTime) -> std::io::Result<()>;

/// Set atime and mtime of `path` to `mtime`
fn stamp_times(path: &Path, mtime: FileTime) -> std::io::Result<()> {
    filetime::set_file_times(path, mtime, mtime)
}

fn copy_file_stamped(
    src: &Path,
    dest: &Path,
    on_event: Option<&ExecutionCallback<'_>>,
    stamp: StampFn,
) -> Result<CopyOutcome, SyncError> {
    let metadata = fs::metadata(src).map_err(|source| SyncError::Stat {
        path: src.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(SyncError::NotARegularFile {
            path: src.to_path_buf(),
        });
    }

    let mtime = FileTime::from_last_modification_time(&metadata);
    if !needs_copy(dest, mtime) {
        tracing::debug!("Up to date: {}", dest.display());
        emit_event(
            on_event,
            &ExecutionEvent::Skipped {
                from: src.to_path_buf(),
                to: dest.to_path_buf(),
            },
        );
        return Ok(CopyOutcome::Skipped);
    }

    let copied = copy_bytes(src, dest, on_event).map_err(|source| SyncError::ByteCopy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    })?;

    if copied != metadata.len() {
        let warning = SizeMismatch {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
            expected: metadata.len(),
            copied,
        };
        tracing::warn!("{}", warning);
        emit_event(on_event, &ExecutionEvent::SizeMismatch(warning));
    }

    if let Err(source) = stamp(dest, mtime) {
        tracing::warn!("Cannot set times on {}: {}", dest.display(), source);
        return Err(SyncError::TimestampSet {
            path: dest.to_path_buf(),
            source,
        });
    }

    emit_event(
        on_event,
        &ExecutionEvent::Copied {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
            bytes: copied,
        },
    );
    Ok(CopyOutcome::Copied { bytes: copied })
}

/// Stream `src` into a freshly truncated `dest`. Both handles close on return.
fn copy_bytes(
    src: &Path,
    dest: &Path,
    on_event: Option<&ExecutionCallback<'_>>,
) -> std::io::Result<u64> {
    let mut src_file = File::open(src)?;
    let mut dest_file = File::create(dest)?;

    emit_event(
        on_event,
        &ExecutionEvent::CopyStart {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
        },
    );

    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = match src_file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        dest_file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    dest_file.flush()?;
    Ok(total_bytes)
}
