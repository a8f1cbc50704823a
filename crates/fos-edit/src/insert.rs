//! Positional insertion
//!
//! Four positions relative to a reference element:
//!
//! ```text
//! <!-- beforebegin -->
//! <ul>
//!   <!-- afterbegin -->
//!   <li>...</li>
//!   <!-- beforeend -->
//! </ul>
//! <!-- afterend -->
//! ```

use std::fmt;
use std::str::FromStr;

use fos_dom::{DomTree, NodeId, NodeOperations};

use crate::{EditError, EditResult};

/// Where a node lands relative to the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertPosition {
    /// Immediately before the reference, as its sibling
    BeforeBegin,
    /// First child of the reference
    AfterBegin,
    /// Last child of the reference
    BeforeEnd,
    /// Immediately after the reference, as its sibling
    AfterEnd,
}

impl InsertPosition {
    pub const ALL: [InsertPosition; 4] = [
        InsertPosition::BeforeBegin,
        InsertPosition::AfterBegin,
        InsertPosition::BeforeEnd,
        InsertPosition::AfterEnd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InsertPosition::BeforeBegin => "beforebegin",
            InsertPosition::AfterBegin => "afterbegin",
            InsertPosition::BeforeEnd => "beforeend",
            InsertPosition::AfterEnd => "afterend",
        }
    }

    /// Inside positions use the reference itself as the container
    pub fn is_inside(self) -> bool {
        matches!(self, InsertPosition::AfterBegin | InsertPosition::BeforeEnd)
    }
}

impl fmt::Display for InsertPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertPosition {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsertPosition::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| EditError::UnsupportedPosition(s.to_string()))
    }
}

/// Resolve the container an insertion at `position` edits.
pub fn target_container(
    tree: &DomTree,
    reference: NodeId,
    position: InsertPosition,
) -> EditResult<NodeId> {
    if !tree.is_element(reference) {
        return Err(EditError::invalid("insert", "reference"));
    }
    if position.is_inside() {
        Ok(reference)
    } else {
        tree.parent(reference)
            .ok_or_else(|| EditError::detached("insert", "reference"))
    }
}

/// Insert an existing node at `position` relative to `reference`
pub fn insert_adjacent_element(
    tree: &mut DomTree,
    reference: NodeId,
    position: InsertPosition,
    node: NodeId,
) -> EditResult<NodeId> {
    let container = target_container(tree, reference, position)?;
    if !tree.contains(node) || node == tree.root() || node == reference {
        return Err(EditError::invalid("insert", "node"));
    }

    let anchor = match position {
        InsertPosition::BeforeBegin => Some(reference),
        InsertPosition::AfterBegin => tree.first_child(reference),
        InsertPosition::BeforeEnd => None,
        InsertPosition::AfterEnd => tree.next_sibling(reference),
    };
    tree.insert_before(container, node, anchor)?;

    tracing::debug!("inserted {} {} {}", node, position, reference);
    Ok(node)
}

/// Insert a bare text node at `position` relative to `reference`
pub fn insert_adjacent_text(
    tree: &mut DomTree,
    reference: NodeId,
    position: InsertPosition,
    text: &str,
) -> EditResult<NodeId> {
    target_container(tree, reference, position)?;
    let node = tree.create_text(text);
    insert_adjacent_element(tree, reference, position, node)
}
