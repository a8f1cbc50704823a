//! Sibling insertion
//!
//! "Insert after" rebuilt from "insert before whatever currently follows".
//! The following sibling may be a text node (incidental whitespace) and is
//! still a valid anchor; when nothing follows, the new node is appended.

use fos_dom::{DomTree, NodeId, NodeOperations, NodeType};

use crate::{EditError, EditResult};

const OPERATION: &str = "insert_after";

fn is_structural(tree: &DomTree, node: NodeId) -> bool {
    matches!(
        tree.node_type(node),
        Some(NodeType::Element | NodeType::Text | NodeType::Comment)
    )
}

/// Insert `new_node` immediately after `reference`, moving it if it is
/// attached elsewhere. Afterwards `next_sibling(reference) == new_node`.
pub fn insert_after(tree: &mut DomTree, reference: NodeId, new_node: NodeId) -> EditResult<NodeId> {
    if !is_structural(tree, reference) {
        return Err(EditError::invalid(OPERATION, "reference"));
    }
    if !is_structural(tree, new_node) || new_node == reference {
        return Err(EditError::invalid(OPERATION, "new node"));
    }
    let parent = tree
        .parent(reference)
        .ok_or_else(|| EditError::detached(OPERATION, "reference"))?;

    let next = tree.next_sibling(reference);
    tree.insert_before(parent, new_node, next)?;

    tracing::debug!("inserted {} after {}", new_node, reference);
    Ok(new_node)
}
