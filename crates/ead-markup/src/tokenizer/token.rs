use strum_macros::Display;

/// An attribute on an element start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute's local name (any `prefix:` removed).
    pub name: String,
    /// The attribute value with character references decoded.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// One markup event, in document order.
///
/// This is the whole contract between an event source and the tree builder:
/// the end of the stream is signaled out of band (`None` from the source), and
/// comments, processing instructions, and directives never appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An element start tag. `<a/>` produces an `Open` immediately followed
    /// by a `Close`.
    Open {
        /// The element's local name.
        name: String,
        /// Attributes in source order. Names may repeat if the source is
        /// malformed; the builder keeps the last value.
        attributes: Vec<Attribute>,
    },

    /// A run of character data between two pieces of markup, or the content
    /// of one CDATA section. Not normalized.
    Text(String),

    /// An element end tag.
    Close {
        /// The element's local name.
        name: String,
    },
}

impl Event {
    /// Create an `Open` event.
    #[must_use]
    pub fn open(name: &str, attributes: &[(&str, &str)]) -> Self {
        Self::Open {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| Attribute::new((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Create a `Text` event.
    #[must_use]
    pub fn text(data: &str) -> Self {
        Self::Text(data.to_string())
    }

    /// Create a `Close` event.
    #[must_use]
    pub fn close(name: &str) -> Self {
        Self::Close {
            name: name.to_string(),
        }
    }

    /// The kind of this event, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Open { .. } => EventKind::Open,
            Self::Text(_) => EventKind::Text,
            Self::Close { .. } => EventKind::Close,
        }
    }
}

/// The three event kinds, without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EventKind {
    /// An element start tag.
    #[strum(to_string = "start tag")]
    Open,
    /// Character data.
    #[strum(to_string = "text")]
    Text,
    /// An element end tag.
    #[strum(to_string = "end tag")]
    Close,
}
