//! High-level conversion API for archival markup.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Loading** - read a markup file and build its element tree
//! - **JSON Rendering** - pretty or compact JSON for a loaded document
//!
//! # Not Yet Implemented
//!
//! - Loading from URLs
//! - Streaming output for documents larger than memory

pub use ead_markup as markup;
pub use ead_tree as tree;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ead_markup::ParseError;
use ead_tree::ElementTree;
use thiserror::Error;

/// A fully loaded and converted document.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Source path, empty for inline markup
    pub source_path: String,

    /// The converted element tree
    pub tree: ElementTree,
}

/// Error type for document loading and rendering.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the input file.
    #[error("failed to read '{}'", .path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The markup could not be converted to a tree.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The tree could not be serialized as JSON.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The rendered JSON could not be written out.
    #[error("failed to write output")]
    Write(#[source] io::Error),
}

/// How JSON output is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// Two-space indentation, one field per line.
    #[default]
    Pretty,
    /// Everything on one line.
    Compact,
}

/// Load a document from a file path.
///
/// The whole file is read before conversion starts; the handle is closed by
/// the time this returns.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read as UTF-8 text, or
/// [`LoadError::Parse`] if its markup is malformed.
pub fn load_document(path: &Path) -> Result<LoadedDocument, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut doc = parse_markup_string(&source)?;
    doc.source_path = path.display().to_string();
    Ok(doc)
}

/// Parse a markup string into a [`LoadedDocument`].
///
/// Use this when you already have the markup content as a string.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] if the markup is malformed.
pub fn parse_markup_string(markup: &str) -> Result<LoadedDocument, LoadError> {
    let tree = ead_markup::parse_document(markup)?;
    Ok(LoadedDocument {
        source_path: String::new(),
        tree,
    })
}

impl LoadedDocument {
    /// Render the tree as a JSON string, without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] if serialization fails.
    pub fn to_json(&self, style: OutputStyle) -> Result<String, LoadError> {
        let json = match style {
            OutputStyle::Pretty => serde_json::to_string_pretty(&self.tree)?,
            OutputStyle::Compact => serde_json::to_string(&self.tree)?,
        };
        Ok(json)
    }

    /// Write the tree as JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] if serialization fails, or
    /// [`LoadError::Write`] if the writer does.
    pub fn write_json<W: Write>(
        &self,
        writer: &mut W,
        style: OutputStyle,
    ) -> Result<(), LoadError> {
        let json = self.to_json(style)?;
        writeln!(writer, "{json}").map_err(LoadError::Write)?;
        writer.flush().map_err(LoadError::Write)
    }
}
