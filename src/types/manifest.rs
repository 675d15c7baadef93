//! Manifest - the declared set of files and directories to sync

use camino::Utf8PathBuf;
use serde::{Deserialize, Deserializer, Serialize};

/// Files and directories to sync, relative to the source/destination roots.
///
/// Absent or `null` lists decode as empty. Duplicates are kept; copying them twice is
/// harmless because the second copy is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Individual files
    #[serde(default, deserialize_with = "null_as_empty")]
    pub files: Vec<Utf8PathBuf>,

    /// Directories, copied recursively
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dirs: Vec<Utf8PathBuf>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Utf8PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Utf8PathBuf>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Manifest {
    /// Decode a manifest from JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.files.len() + self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}
