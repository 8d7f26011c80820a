//! Element tree for converted archival markup.
//!
//! This crate provides an arena-based tree of markup elements. Each element
//! carries its name, an attribute map, at most one normalized text value, and
//! an ordered list of children.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Nodes are
//! allocated detached and linked into the tree once they are complete, which is
//! the order a streaming builder produces them in.

mod serialize;

pub use serialize::NodeView;

use std::collections::HashMap;

/// Map of attribute names to values for an element.
///
/// Iteration order is unspecified; use [`ElementData::sorted_attrs`] when
/// rendering.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the element tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// One element in the tree.
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// The element's name and attributes, fixed when the node is created.
    pub element: ElementData,

    /// Normalized direct text content. Never `Some("")`.
    pub text: Option<String>,

    /// The element this node was appended to, if any.
    pub parent: Option<NodeId>,

    /// Child elements in document order.
    pub children: Vec<NodeId>,

    /// The node immediately following this one in its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately preceding this one in its parent's children.
    pub prev_sibling: Option<NodeId>,
}

/// Element-specific data.
///
/// NOTE: We only store the local name. Namespace prefixes are dropped by the
/// tokenizer before elements reach the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// The element's local name.
    pub name: String,
    /// The element's attributes, keyed by local name.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with the given name and attributes.
    #[must_use]
    pub const fn new(name: String, attrs: AttributesMap) -> Self {
        Self { name, attrs }
    }

    /// Returns the value of the named attribute if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns the attributes sorted lexicographically by name.
    ///
    /// The map itself has no order; anything that displays or serializes
    /// attributes goes through this view so output is deterministic.
    #[must_use]
    pub fn sorted_attrs(&self) -> Vec<(&str, &str)> {
        let mut attrs: Vec<(&str, &str)> = self
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        attrs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        attrs
    }
}

/// Arena-based element tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - O(1) parent/sibling traversal
/// - No borrowing issues (indices instead of references)
///
/// A tree produced by a successful conversion has exactly one root, and every
/// other node is reachable from it.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,

    /// The document element, once it has been closed.
    root: Option<NodeId>,
}

impl ElementTree {
    /// Create an empty tree with no root.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Get the root element ID, if one has been set.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Mark `id` as the root element of the tree.
    pub const fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds no nodes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, element: ElementData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            element,
            text: None,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        // Get the current last child of parent (if any) to set up sibling links
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Replace the text of a node. The previous value, if any, is discarded.
    pub fn set_text(&mut self, id: NodeId, text: String) {
        if let Some(node) = self.get_mut(id) {
            node.text = Some(text);
        }
    }

    /// Get the element data of a node.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).map(|n| &n.element)
    }

    /// Get the element name of a node.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.element.name.as_str())
    }

    /// Get the text of a node, if it has any.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| n.text.as_deref())
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over a node and everything below it in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let pending = if self.get(id).is_some() {
            vec![id]
        } else {
            Vec::new()
        };
        DescendantIterator {
            tree: self,
            pending,
        }
    }

    /// Number of ancestors above a node. The root has depth 0.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Find the first element named `name` in document order, starting at the root.
    #[must_use]
    pub fn find_first(&self, name: &str) -> Option<NodeId> {
        let root = self.root?;
        self.descendants(root).find(|&id| self.name(id) == Some(name))
    }

    /// A serializable view of the subtree rooted at `id`.
    #[must_use]
    pub const fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView::new(self, id)
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a ElementTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct DescendantIterator<'a> {
    tree: &'a ElementTree,
    pending: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.pop()?;
        // Reverse so the first child is popped next.
        self.pending.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
