//! XML tokenizer module.
//!
//! Turns markup text into the [`Event`] stream the tree builder consumes.
//! Lexing is done by `quick-xml`; this module adapts its events to the
//! builder's `Open`/`Text`/`Close` contract. Comments, processing
//! instructions, and DOCTYPE declarations are skipped.

/// Reader adapter producing builder events.
pub mod core;
/// Byte offset to line/column conversion.
pub mod position;
/// Character and entity reference resolution.
pub mod references;
/// Event types produced by the tokenizer.
pub mod token;

pub use self::core::{TokenizeError, XmlTokenizer};
pub use token::{Attribute, Event, EventKind};
