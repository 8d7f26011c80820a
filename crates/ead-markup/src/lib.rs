//! XML tokenizer and tree builder for archival markup.
//!
//! # Scope
//!
//! This crate implements:
//! - **XML Tokenizer** - a pull adapter over `quick-xml` producing `Open`,
//!   `Text`, and `Close` events
//!   - Local names for elements and attributes; end tags checked against
//!     start tags by qualified name
//!   - Predefined and numeric character references, CDATA sections
//!   - Comments, processing instructions, and DOCTYPE declarations (skipped)
//!
//! - **Tree Builder** - reduces the event stream to an [`ElementTree`]
//!   - Explicit stack of open elements
//!   - One normalized text value per element (last non-blank text wins)
//!   - Fatal errors on unmatched, mismatched, unterminated, or too deep
//!     nesting
//!
//! # Not Yet Implemented
//!
//! - Namespace URIs (prefixes are dropped, not resolved)
//! - DTD entity expansion

/// Event-to-tree reduction.
pub mod builder;
/// XML tokenizer for converting input into events.
pub mod tokenizer;

pub use builder::{
    BuildError, BuilderState, MAX_DEPTH, TreeBuilder, build_tree, normalize_whitespace,
};
pub use tokenizer::{Attribute, Event, EventKind, TokenizeError, XmlTokenizer};

use ead_common::SourceLocation;
use ead_tree::ElementTree;
use thiserror::Error;

/// A failed conversion, with the position of the input that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (at {location})")]
pub struct ParseError {
    /// What went wrong.
    pub kind: BuildError,
    /// Where the offending event began, or where the lexical error was found.
    pub location: SourceLocation,
}

impl From<TokenizeError> for ParseError {
    fn from(error: TokenizeError) -> Self {
        Self {
            location: error.location,
            kind: BuildError::Tokenize(error),
        }
    }
}

/// Parse markup text into an element tree.
///
/// Runs the tokenizer and the tree builder as one pull loop: each event is
/// reduced before the next one is read. Clears the once-only warning set
/// first, so every conversion reports its own warnings.
///
/// # Errors
///
/// Returns the first lexical or structural error.
///
/// ```
/// let tree = ead_markup::parse_document("<ead><eadheader/></ead>").unwrap();
/// let root = tree.root().unwrap();
/// assert_eq!(tree.name(root), Some("ead"));
/// assert_eq!(tree.children(root).len(), 1);
/// ```
pub fn parse_document(input: &str) -> Result<ElementTree, ParseError> {
    ead_common::warning::clear_warnings();

    let mut tokenizer = XmlTokenizer::new(input);
    let mut builder = TreeBuilder::new();

    while let Some(event) = tokenizer.next_event()? {
        builder.process(event).map_err(|kind| ParseError {
            kind,
            location: tokenizer.location(),
        })?;
    }

    builder.finish().map_err(|kind| ParseError {
        kind,
        location: tokenizer.input_location(),
    })
}
