//! Maps byte offsets reported by the reader to line and column numbers.

use ead_common::SourceLocation;

/// Converts byte offsets into [`SourceLocation`]s.
///
/// Offsets are usually requested in increasing order, so the locator resumes
/// from the last answer instead of rescanning the input.
#[derive(Debug, Clone)]
pub struct Locator<'a> {
    input: &'a str,
    origin: SourceLocation,
    offset: usize,
    location: SourceLocation,
}

impl<'a> Locator<'a> {
    /// Create a locator for `input`, whose first byte sits at `origin`.
    #[must_use]
    pub const fn new(input: &'a str, origin: SourceLocation) -> Self {
        Self {
            input,
            origin,
            offset: 0,
            location: origin,
        }
    }

    /// The location of byte `offset` of the input. Offsets past the end map
    /// to the end of input.
    pub fn locate(&mut self, offset: usize) -> SourceLocation {
        let offset = offset.min(self.input.len());
        if offset < self.offset {
            self.offset = 0;
            self.location = self.origin;
        }

        if let Some(span) = self.input.get(self.offset..offset) {
            let mut chars = span.chars().peekable();
            while let Some(c) = chars.next() {
                // \r\n is one line break; a lone \r is too
                let c = if c == '\r' && chars.peek() != Some(&'\n') {
                    '\n'
                } else {
                    c
                };
                self.location = self.location.advance(c, c.len_utf8());
            }
            self.offset = offset;
        }
        self.location
    }
}

/// Replace `\r\n` and lone `\r` with `\n`.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
