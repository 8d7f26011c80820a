//! Common utilities for the EAD converter.
//!
//! This crate provides shared infrastructure used by the markup and tree crates:
//! - **Warning System** - colored, de-duplicated stderr output for ignored input
//! - **Source Locations** - line/column/byte positions for diagnostics

pub mod location;
pub mod warning;

pub use location::SourceLocation;
