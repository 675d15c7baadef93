//! Recursive directory copy

use super::copy::copy_file;
use super::ExecutionCallback;
use crate::types::SyncError;
use std::fs;
use std::path::{Path, PathBuf};

/// Pending work: a directory to list, or a file to hand to the file copier
#[derive(Debug)]
enum Pending {
    Dir { src: PathBuf, dest: PathBuf },
    File { src: PathBuf, dest: PathBuf },
}

/// Copy every file below `src` into the same relative place below `dest`
///
/// Walks depth-first with an explicit stack, visiting children in file-name
/// order. Symlinks are not followed when classifying children; one that
/// points at a directory is handed to the file copier and rejected there.
/// Empty source directories produce nothing at the destination.
///
/// # Errors
/// Stops at the first failure, leaving remaining siblings uncopied.
/// * `SyncError::DirectoryRead` - a directory cannot be listed
/// * anything `copy_file` returns
pub fn copy_dir(
    src: &Path,
    dest: &Path,
    on_event: Option<&ExecutionCallback<'_>>,
) -> Result<(), SyncError> {
    let mut stack = vec![Pending::Dir {
        src: src.to_path_buf(),
        dest: dest.to_path_buf(),
    }];

    while let Some(task) = stack.pop() {
        match task {
            Pending::File { src, dest } => {
                copy_file(&src, &dest, on_event)?;
            }
            Pending::Dir { src, dest } => {
                let children = list_children(&src)?;
                // Reversed so the stack pops them in name order.
                for (name, is_dir) in children.into_iter().rev() {
                    let child_src = src.join(&name);
                    let child_dest = dest.join(&name);
                    stack.push(if is_dir {
                        Pending::Dir {
                            src: child_src,
                            dest: child_dest,
                        }
                    } else {
                        Pending::File {
                            src: child_src,
                            dest: child_dest,
                        }
                    });
                }
            }
        }
    }

    Ok(())
}

/// Immediate children of `dir` as (name, is_dir), sorted by name
fn list_children(dir: &Path) -> Result<Vec<(std::ffi::OsString, bool)>, SyncError> {
    let read_error = |source| SyncError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut children = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let file_type = entry.file_type().map_err(read_error)?;
        children.push((entry.file_name(), file_type.is_dir()));
    }

    children.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(children)
}
