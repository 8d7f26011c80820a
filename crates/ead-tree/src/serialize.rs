//! `serde` rendering of element trees.
//!
//! Each element becomes an object with `name`, then `attr` (keys sorted),
//! `value`, and `children`. Absent fields are omitted rather than written as
//! `null` or empty placeholders, so an empty element renders as `{"name": ..}`.

use std::collections::BTreeMap;

use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::{ElementTree, NodeId};

/// Borrowed view of one node and its subtree, ready to serialize.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a ElementTree,
    id: NodeId,
}

impl<'a> NodeView<'a> {
    /// Create a view of the subtree rooted at `id`.
    #[must_use]
    pub const fn new(tree: &'a ElementTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The node this view starts at.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }
}

struct ChildrenView<'a> {
    tree: &'a ElementTree,
    ids: &'a [NodeId],
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ids.len()))?;
        for &id in self.ids {
            seq.serialize_element(&NodeView::new(self.tree, id))?;
        }
        seq.end()
    }
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(node) = self.tree.get(self.id) else {
            return serializer.serialize_none();
        };

        let has_attrs = !node.element.attrs.is_empty();
        let has_children = !node.children.is_empty();
        let len = 1
            + usize::from(has_attrs)
            + usize::from(node.text.is_some())
            + usize::from(has_children);

        let mut state = serializer.serialize_struct("Node", len)?;
        state.serialize_field("name", &node.element.name)?;

        if has_attrs {
            let attrs: BTreeMap<&str, &str> = node.element.sorted_attrs().into_iter().collect();
            state.serialize_field("attr", &attrs)?;
        } else {
            state.skip_field("attr")?;
        }

        match &node.text {
            Some(text) => state.serialize_field("value", text)?,
            None => state.skip_field("value")?,
        }

        if has_children {
            let children = ChildrenView {
                tree: self.tree,
                ids: &node.children,
            };
            state.serialize_field("children", &children)?;
        } else {
            state.skip_field("children")?;
        }

        state.end()
    }
}

impl Serialize for ElementTree {
    /// Serializes the root element, or `null` for a tree without one.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.root() {
            Some(root) => NodeView::new(self, root).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}
