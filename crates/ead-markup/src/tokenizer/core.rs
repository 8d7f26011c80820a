use std::collections::VecDeque;

use ead_common::SourceLocation;
use ead_common::warning::warn_once;
use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, BytesText, Event as XmlEvent};
use thiserror::Error;

use super::position::{Locator, normalize_line_endings};
use super::references::{find_illegal_char, resolve_reference};
use super::token::{Attribute, Event};

/// A lexical error in the input. Fatal for the whole conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TokenizeError {
    /// What was wrong.
    pub message: String,
    /// Where the offending construct (or the end of input) was.
    pub location: SourceLocation,
}

/// Pull-based XML tokenizer.
///
/// Wraps a `quick-xml` reader and turns its events into the builder's
/// [`Event`]s:
/// - element and attribute names are reported as local names
/// - `<a/>` yields `Open` then `Close`
/// - text and the references inside it are joined into one `Text` event;
///   a CDATA section is a `Text` event of its own
/// - declarations, comments, processing instructions, and DOCTYPE are skipped
///
/// The reader checks that end tags match their start tags by qualified name,
/// so `<a:x></b:x>` is rejected here even though both local names agree.
pub struct XmlTokenizer<'a> {
    reader: Reader<&'a [u8]>,
    locator: Locator<'a>,

    /// Character data not yet emitted, and the offset it started at.
    text_buffer: String,
    text_start: Option<usize>,

    pending: VecDeque<(Event, usize)>,
    /// Where the most recently returned event began.
    event_location: SourceLocation,
    at_eof: bool,
}

impl<'a> XmlTokenizer<'a> {
    /// Create a new tokenizer over `input`.
    ///
    /// A leading byte order mark is skipped.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let body = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        let origin = SourceLocation {
            byte_offset: input.len() - body.len(),
            ..SourceLocation::START
        };

        let mut reader = Reader::from_str(body);
        let config = reader.config_mut();
        config.check_end_names = true;
        config.check_comments = true;
        config.expand_empty_elements = false;

        Self {
            reader,
            locator: Locator::new(body, origin),
            text_buffer: String::new(),
            text_start: None,
            pending: VecDeque::new(),
            event_location: origin,
            at_eof: false,
        }
    }

    /// Where the most recently returned event began.
    #[must_use]
    pub const fn location(&self) -> SourceLocation {
        self.event_location
    }

    /// Where the tokenizer is in the input: the position of the next byte
    /// the reader will look at, or the end of input once exhausted.
    pub fn input_location(&mut self) -> SourceLocation {
        let offset = self.offset();
        self.locator.locate(offset)
    }

    /// Returns the next event, `Ok(None)` at the end of input, or the first
    /// lexical error.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenizeError`] when the input is not well-formed at the
    /// lexical level. After an error the tokenizer should be discarded.
    pub fn next_event(&mut self) -> Result<Option<Event>, TokenizeError> {
        loop {
            if let Some((event, offset)) = self.pending.pop_front() {
                self.event_location = self.locator.locate(offset);
                return Ok(Some(event));
            }
            if self.at_eof {
                return Ok(None);
            }
            self.step()?;
        }
    }

    /// Reads one event from the underlying reader.
    fn step(&mut self) -> Result<(), TokenizeError> {
        let start = self.offset();
        let event = match self.reader.read_event() {
            Ok(event) => event,
            Err(err) => return Err(self.reader_error(&err)),
        };

        match event {
            XmlEvent::Start(tag) => {
                self.flush_text();
                let (name, attributes) = self.read_tag(&tag, start)?;
                self.emit(Event::Open { name, attributes }, start);
            }
            XmlEvent::Empty(tag) => {
                self.flush_text();
                let (name, attributes) = self.read_tag(&tag, start)?;
                self.emit(
                    Event::Open {
                        name: name.clone(),
                        attributes,
                    },
                    start,
                );
                self.emit(Event::Close { name }, start);
            }
            XmlEvent::End(tag) => {
                self.flush_text();
                let name = self.decode_name(tag.local_name().as_ref(), start)?;
                self.emit(Event::Close { name }, start);
            }
            XmlEvent::Text(text) => self.push_text(&text, start)?,
            XmlEvent::GeneralRef(reference) => self.push_reference(&reference, start)?,
            XmlEvent::CData(data) => {
                self.flush_text();
                let data =
                    std::str::from_utf8(&data).map_err(|err| self.error(err.to_string(), start))?;
                if let Some(c) = find_illegal_char(data) {
                    return Err(self.error(format!("illegal character {c:?} in CDATA"), start));
                }
                if !data.is_empty() {
                    self.emit(Event::Text(normalize_line_endings(data)), start);
                }
            }
            XmlEvent::DocType(doctype) => {
                self.flush_text();
                if doctype.contains(&b'[') {
                    warn_once(
                        "Markup",
                        "DOCTYPE internal subset ignored; entities declared there are not expanded",
                    );
                }
            }
            XmlEvent::Decl(_) | XmlEvent::Comment(_) | XmlEvent::PI(_) => self.flush_text(),
            XmlEvent::Eof => {
                self.flush_text();
                self.at_eof = true;
            }
        }
        Ok(())
    }

    /// The local name and decoded attributes of a start tag.
    fn read_tag(
        &mut self,
        tag: &BytesStart<'_>,
        start: usize,
    ) -> Result<(String, Vec<Attribute>), TokenizeError> {
        let name = self.decode_name(tag.local_name().as_ref(), start)?;
        let decoder = self.reader.decoder();

        let mut attributes = Vec::new();
        // Repeated names are passed through; the builder keeps the last value.
        let mut iter = tag.attributes();
        let _ = iter.with_checks(false);
        for attr in iter {
            let attr = attr.map_err(|err| self.error(format!("in <{name}>: {err}"), start))?;
            let key = self.decode_name(attr.key.local_name().as_ref(), start)?;
            if attr.value.contains(&b'<') {
                return Err(self.error(format!("'<' in value of attribute '{key}'"), start));
            }
            let value = attr
                .decode_and_unescape_value(decoder)
                .map_err(|err| self.error(format!("attribute '{key}': {err}"), start))?;
            if let Some(c) = find_illegal_char(&value) {
                return Err(self.error(
                    format!("illegal character {c:?} in value of attribute '{key}'"),
                    start,
                ));
            }
            attributes.push(Attribute::new(key, normalize_line_endings(&value)));
        }
        Ok((name, attributes))
    }

    fn decode_name(&mut self, bytes: &[u8], start: usize) -> Result<String, TokenizeError> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|err| self.error(err.to_string(), start))
    }

    /// Buffer a run of character data.
    fn push_text(&mut self, text: &BytesText<'_>, start: usize) -> Result<(), TokenizeError> {
        let raw = text
            .decode()
            .map_err(|err| self.error(err.to_string(), start))?;
        if let Some(index) = raw.find("]]>") {
            return Err(self.error(
                "']]>' is not allowed in character data".to_string(),
                start + index,
            ));
        }
        if let Some(c) = find_illegal_char(&raw) {
            return Err(self.error(format!("illegal character {c:?} in character data"), start));
        }

        if self.text_start.is_none() {
            self.text_start = Some(start);
        }
        self.text_buffer.push_str(&normalize_line_endings(&raw));
        Ok(())
    }

    /// Resolve a reference and append it to the buffered character data.
    fn push_reference(&mut self, reference: &BytesRef<'_>, start: usize) -> Result<(), TokenizeError> {
        let name = reference
            .decode()
            .map_err(|err| self.error(err.to_string(), start))?;
        let resolved = resolve_reference(&name).map_err(|message| self.error(message, start))?;

        if self.text_start.is_none() {
            self.text_start = Some(start);
        }
        self.text_buffer.push_str(&resolved);
        Ok(())
    }

    /// Emit buffered character data as one `Text` event.
    fn flush_text(&mut self) {
        let start = self.text_start.take();
        if !self.text_buffer.is_empty() {
            let data = std::mem::take(&mut self.text_buffer);
            let offset = start.unwrap_or_else(|| self.offset());
            self.emit(Event::Text(data), offset);
        }
    }

    /// Queue an event that began at byte `offset`.
    fn emit(&mut self, event: Event, offset: usize) {
        self.pending.push_back((event, offset));
    }

    /// The reader's current byte offset.
    fn offset(&self) -> usize {
        to_offset(self.reader.buffer_position())
    }

    fn reader_error(&mut self, err: &quick_xml::Error) -> TokenizeError {
        let offset = to_offset(self.reader.error_position());
        self.error(err.to_string(), offset)
    }

    fn error(&mut self, message: String, offset: usize) -> TokenizeError {
        TokenizeError {
            message,
            location: self.locator.locate(offset),
        }
    }
}

/// Reader positions are `u64`; anything past `usize::MAX` is past the end of
/// an in-memory input anyway.
fn to_offset(position: u64) -> usize {
    usize::try_from(position).unwrap_or(usize::MAX)
}

impl Iterator for XmlTokenizer<'_> {
    type Item = Result<Event, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => None,
            Err(e) => {
                // Stop after the first error.
                self.at_eof = true;
                self.pending.clear();
                Some(Err(e))
            }
        }
    }
}
