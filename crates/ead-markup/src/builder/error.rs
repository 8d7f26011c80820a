use thiserror::Error;

use crate::tokenizer::{EventKind, TokenizeError};

/// Why a conversion failed.
///
/// Every variant is fatal: the builder never skips an event or returns a
/// partial tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The input is not well-formed markup at the lexical level.
    #[error("malformed markup: {0}")]
    Tokenize(#[from] TokenizeError),

    /// Text or an end tag arrived while no element was open.
    #[error("{event} with no open element: {detail}")]
    EmptyStack {
        /// The offending event.
        event: EventKind,
        /// The text or end tag, as written back for the diagnostic.
        detail: String,
    },

    /// The stream ended before every element was closed, or before any
    /// element appeared at all.
    #[error("{}", describe_unterminated(.unclosed))]
    UnterminatedStream {
        /// Names of the elements still open, outermost first.
        unclosed: Vec<String>,
    },

    /// An end tag did not match the innermost open element.
    #[error("end tag </{found}> does not match open element <{expected}>")]
    NameMismatch {
        /// The innermost open element.
        expected: String,
        /// The name on the end tag.
        found: String,
    },

    /// An element opened deeper than [`MAX_DEPTH`](crate::builder::MAX_DEPTH)
    /// levels.
    #[error("element nesting exceeds the limit of {limit} levels")]
    TooDeep {
        /// The nesting limit that was hit.
        limit: usize,
    },

    /// A second top-level element started after the root was closed.
    #[error("second root element <{name}> after the document element was closed")]
    MultipleRoots {
        /// The name of the extra element.
        name: String,
    },
}

fn describe_unterminated(unclosed: &[String]) -> String {
    match unclosed {
        [] => "end of stream before any element was found".to_string(),
        [.., innermost] => format!(
            "end of stream with {} unclosed element(s), innermost <{innermost}>",
            unclosed.len()
        ),
    }
}
