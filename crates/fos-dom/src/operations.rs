//! DOM Node Operations
//!
//! Core node manipulation: appendChild, removeChild, insertBefore,
//! replaceChild. Every operation validates all of its arguments before
//! touching a link, so a failed call leaves the tree unchanged.

use crate::{DomTree, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Handle does not name a node of this tree
    #[error("Node not found: {0}")]
    NotFound(NodeId),
    /// Inserting a node into itself or one of its descendants
    #[error("Hierarchy request error: {child} cannot be placed under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Node kind cannot take part in the operation
    #[error("Invalid node type for {0}")]
    InvalidNodeType(NodeId),
    /// Reference is not a child of the given parent
    #[error("{child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}

/// Node operations trait
pub trait NodeOperations {
    /// Append a child node, moving it if it is attached elsewhere
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Remove a child node. The node stays addressable but detached.
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Insert before a reference node; `None` appends
    fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> DomResult<NodeId>;

    /// Replace a child with another node, returning the old child
    fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId>;

    /// Detach a node from whatever parent it has
    fn detach(&mut self, node: NodeId) -> DomResult<NodeId>;
}

impl DomTree {
    fn check_insertable(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if !parent_node.can_have_children() {
            return Err(DomError::InvalidNodeType(parent));
        }
        if child == NodeId::ROOT || matches!(child_node.data, crate::NodeData::Document) {
            return Err(DomError::InvalidNodeType(child));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    fn check_child(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.get(parent).ok_or(DomError::NotFound(parent))?;
        let node = self.get(child).ok_or(DomError::NotFound(child))?;
        if node.parent != parent {
            return Err(DomError::NotAChild { parent, child });
        }
        Ok(())
    }
}

impl NodeOperations for DomTree {
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_child(parent, child)?;
        self.unlink(child);
        tracing::trace!("removed {} from {}", child, parent);
        Ok(child)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insertable(parent, new_child)?;
        if let Some(reference) = ref_child {
            self.check_child(parent, reference)?;
        }

        // Inserting a node before itself leaves it where it is
        let mut anchor = ref_child;
        if anchor == Some(new_child) {
            anchor = self.next_sibling(new_child);
        }

        self.unlink(new_child);
        self.link_before(parent, new_child, anchor);
        tracing::trace!("inserted {} into {}", new_child, parent);
        Ok(new_child)
    }

    fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId> {
        self.check_child(parent, old_child)?;
        if new_child == old_child {
            return Ok(old_child);
        }
        self.check_insertable(parent, new_child)?;

        // Detach the replacement first: it may currently be old_child's next sibling
        self.unlink(new_child);
        let anchor = self.next_sibling(old_child);
        self.unlink(old_child);
        self.link_before(parent, new_child, anchor);
        tracing::trace!("replaced {} with {} in {}", old_child, new_child, parent);
        Ok(old_child)
    }

    fn detach(&mut self, node: NodeId) -> DomResult<NodeId> {
        self.get(node).ok_or(DomError::NotFound(node))?;
        self.unlink(node);
        Ok(node)
    }
}
