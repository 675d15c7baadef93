//! Core type definitions for coolju

mod error;
mod manifest;
mod outcome;

pub use error::{SizeMismatch, SyncError};
pub use manifest::Manifest;
pub use outcome::CopyOutcome;
