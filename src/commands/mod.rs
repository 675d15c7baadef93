//! Command entry points

pub mod sync;
