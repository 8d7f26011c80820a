use strum_macros::Display;

use ead_common::warning::warn_once;
use ead_tree::{AttributesMap, ElementData, ElementTree, NodeId};

use super::error::BuildError;
use super::text::normalize_whitespace;
use crate::tokenizer::{Attribute, Event, EventKind};

/// How many elements may be open at once.
///
/// Trees are serialized recursively, so nesting is bounded here rather than
/// by the stack of whoever renders the tree.
pub const MAX_DEPTH: usize = 512;

/// Where the builder is in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BuilderState {
    /// No element has been opened yet.
    Empty,
    /// At least one element is open.
    Building,
    /// The root element has been closed; only end of stream may follow.
    Done,
}

/// Reduces a flat event stream to an [`ElementTree`].
///
/// Elements are allocated when they open and linked to their parent when they
/// close, so a node is only reachable from the tree once it is complete.
///
/// ```
/// use ead_markup::{Event, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// builder.process(Event::open("ead", &[])).unwrap();
/// builder.process(Event::text("  Finding aid ")).unwrap();
/// builder.process(Event::close("ead")).unwrap();
///
/// let tree = builder.finish().unwrap();
/// let root = tree.root().unwrap();
/// assert_eq!(tree.text(root), Some("Finding aid"));
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// The open-element ancestry path. Stores `NodeId`s into the arena; the
    /// last entry is the innermost open element.
    stack_of_open_elements: Vec<NodeId>,

    /// Every node allocated so far, linked or not.
    tree: ElementTree,
}

impl TreeBuilder {
    /// Create a builder with an empty stack and an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state of the reduction.
    #[must_use]
    pub fn state(&self) -> BuilderState {
        if !self.stack_of_open_elements.is_empty() {
            BuilderState::Building
        } else if self.tree.root().is_some() {
            BuilderState::Done
        } else {
            BuilderState::Empty
        }
    }

    /// Number of currently open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack_of_open_elements.len()
    }

    /// Names of the currently open elements, outermost first.
    #[must_use]
    pub fn open_elements(&self) -> Vec<String> {
        self.stack_of_open_elements
            .iter()
            .filter_map(|&id| self.tree.name(id))
            .map(str::to_string)
            .collect()
    }

    /// Feed one event to the builder.
    ///
    /// # Errors
    ///
    /// Returns the structural error the event causes. The builder should be
    /// discarded afterwards.
    pub fn process(&mut self, event: Event) -> Result<(), BuildError> {
        match event {
            Event::Open { name, attributes } => self.on_open(name, attributes),
            Event::Text(raw) => self.on_text(&raw),
            Event::Close { name } => self.on_close(&name),
        }
    }

    /// Open a new element and make it the innermost open element.
    ///
    /// If an attribute name repeats, the last value wins.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MultipleRoots`] if the document element has
    /// already been closed, or [`BuildError::TooDeep`] if [`MAX_DEPTH`]
    /// elements are already open.
    pub fn on_open(&mut self, name: String, attributes: Vec<Attribute>) -> Result<(), BuildError> {
        if self.state() == BuilderState::Done {
            return Err(BuildError::MultipleRoots { name });
        }
        if self.stack_of_open_elements.len() >= MAX_DEPTH {
            return Err(BuildError::TooDeep { limit: MAX_DEPTH });
        }

        let mut attrs = AttributesMap::with_capacity(attributes.len());
        for Attribute { name: key, value } in attributes {
            if attrs.insert(key.clone(), value).is_some() {
                warn_once(
                    "Tree Builder",
                    &format!("duplicate attribute '{key}' on <{name}>; keeping the last value"),
                );
            }
        }

        let id = self.tree.alloc(ElementData::new(name, attrs));
        self.stack_of_open_elements.push(id);
        Ok(())
    }

    /// Set the text of the innermost open element.
    ///
    /// Text that normalizes to nothing is discarded, wherever it appears.
    /// Otherwise it replaces any text the element already had.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyStack`] for non-blank text outside every
    /// element.
    pub fn on_text(&mut self, raw: &str) -> Result<(), BuildError> {
        let text = normalize_whitespace(raw);
        if text.is_empty() {
            return Ok(());
        }

        let Some(&current) = self.stack_of_open_elements.last() else {
            return Err(BuildError::EmptyStack {
                event: EventKind::Text,
                detail: format!("{text:?}"),
            });
        };
        self.tree.set_text(current, text);
        Ok(())
    }

    /// Close the innermost open element and link it to its parent, or make it
    /// the root when nothing else is open.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyStack`] if nothing is open, or
    /// [`BuildError::NameMismatch`] if `name` is not the innermost open
    /// element.
    pub fn on_close(&mut self, name: &str) -> Result<(), BuildError> {
        let Some(node) = self.stack_of_open_elements.pop() else {
            return Err(BuildError::EmptyStack {
                event: EventKind::Close,
                detail: format!("</{name}>"),
            });
        };

        let expected = self.tree.name(node).unwrap_or_default();
        if expected != name {
            return Err(BuildError::NameMismatch {
                expected: expected.to_string(),
                found: name.to_string(),
            });
        }

        match self.stack_of_open_elements.last() {
            Some(&parent) => self.tree.append_child(parent, node),
            None => self.tree.set_root(node),
        }
        Ok(())
    }

    /// Signal the end of the event stream and take the finished tree.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnterminatedStream`] if elements are still open
    /// or no element was ever seen.
    pub fn finish(self) -> Result<ElementTree, BuildError> {
        if self.state() != BuilderState::Done {
            return Err(BuildError::UnterminatedStream {
                unclosed: self.open_elements(),
            });
        }
        Ok(self.tree)
    }
}

/// Build a tree from a complete sequence of events.
///
/// # Errors
///
/// Returns the first structural error in the sequence, or
/// [`BuildError::UnterminatedStream`] if it ends early.
pub fn build_tree<I>(events: I) -> Result<ElementTree, BuildError>
where
    I: IntoIterator<Item = Event>,
{
    let mut builder = TreeBuilder::new();
    for event in events {
        builder.process(event)?;
    }
    builder.finish()
}
