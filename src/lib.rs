//! # coolju - Manifest-driven release sync
//!
//! Copies the files and directories named in a JSON manifest from a
//! development tree into a deployment tree. Only files whose modification
//! time differs are rewritten, and copies keep the source's mtime.
//!
//! Also ships `fileweb`, a tiny static file server for testing the result.

// Module declarations
pub mod config;
pub mod manifest;
pub mod diff;
pub mod executor;
pub mod ui;
pub mod commands;
pub mod server;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use types::{CopyOutcome, Manifest, SizeMismatch, SyncError};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
