//! Change detection between source and destination files

pub mod compare;

pub use compare::{check_destination, needs_copy, Freshness};
