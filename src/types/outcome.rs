//! CopyOutcome - what the file copier decided for one file

/// Result of a single file copy request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Bytes were streamed into the destination
    Copied { bytes: u64 },

    /// Destination already carried the source's mtime
    Skipped,
}

impl CopyOutcome {
    pub fn is_skip(&self) -> bool {
        matches!(self, CopyOutcome::Skipped)
    }

    /// Bytes written (0 for a skip)
    pub fn bytes(&self) -> u64 {
        match self {
            CopyOutcome::Copied { bytes } => *bytes,
            CopyOutcome::Skipped => 0,
        }
    }
}
