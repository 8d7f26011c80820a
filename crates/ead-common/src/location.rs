//! Source positions for diagnostics.

use std::fmt;

/// Source location within a markup document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (in characters, not bytes).
    pub column: u32,
    /// 0-based byte offset from the start of the input.
    pub byte_offset: usize,
}

impl SourceLocation {
    /// The position of the first character of a document.
    pub const START: Self = Self {
        line: 1,
        column: 1,
        byte_offset: 0,
    };

    /// Returns the location one character past this one.
    ///
    /// A newline moves to column 1 of the next line.
    #[must_use]
    pub const fn advance(self, c: char, byte_len: usize) -> Self {
        if c == '\n' {
            Self {
                line: self.line + 1,
                column: 1,
                byte_offset: self.byte_offset + byte_len,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
                byte_offset: self.byte_offset + byte_len,
            }
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
