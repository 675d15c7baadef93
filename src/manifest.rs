//! Manifest loading

use crate::types::{Manifest, SyncError};
use std::fs;
use std::path::Path;

/// Read and decode the manifest at `path`
///
/// # Errors
/// * `SyncError::ManifestRead` - the file cannot be read
/// * `SyncError::ManifestParse` - the contents are not a manifest document
pub fn load_manifest(path: &Path) -> Result<Manifest, SyncError> {
    let text = fs::read_to_string(path).map_err(|source| SyncError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    Manifest::from_json(&text).map_err(|source| SyncError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_manifest() {
        let dir = TempDir::new().expect("create tempdir");
        let path = dir.path().join("updates.json");
        fs::write(&path, r#"{"files":["a.txt"],"dirs":["sub"]}"#).expect("write manifest");

        let manifest = load_manifest(&path).expect("load manifest");
        assert_eq!(manifest.files, vec!["a.txt"]);
        assert_eq!(manifest.dirs, vec!["sub"]);
    }

    #[test]
    fn test_missing_manifest_is_read_error() {
        let dir = TempDir::new().expect("create tempdir");
        let err = load_manifest(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SyncError::ManifestRead { .. }));
    }

    #[test]
    fn test_directory_as_manifest_is_read_error() {
        let dir = TempDir::new().expect("create tempdir");
        let err = load_manifest(dir.path()).unwrap_err();
        assert!(matches!(err, SyncError::ManifestRead { .. }));
    }

    #[test]
    fn test_invalid_manifest_is_parse_error() {
        let dir = TempDir::new().expect("create tempdir");
        let path = dir.path().join("updates.json");
        fs::write(&path, r#"{"files": [1, 2]}"#).expect("write manifest");

        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, SyncError::ManifestParse { .. }));
        assert!(err.to_string().contains("updates.json"));
    }
}
