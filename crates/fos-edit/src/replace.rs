//! Node replacement
//!
//! Swaps an item for a new one at the same index. Requested attribute sets
//! are copied onto the replacement before the swap, so the node that becomes
//! visible is already configured. Listeners bound directly on the old node
//! stay with the old node; only container-level listeners keep working.

use std::ops::BitOr;

use fos_dom::{DomError, DomTree, NodeId, NodeOperations};

use crate::{EditConfig, EditError, EditResult, IdentityStore};

const OPERATION: &str = "replace";

/// Which attribute sets a replacement inherits from the node it replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Preserve(u8);

impl Preserve {
    pub const NONE: Preserve = Preserve(0);
    /// Identity attribute
    pub const IDENTITY: Preserve = Preserve(0x1);
    /// Action tags
    pub const BEHAVIOR: Preserve = Preserve(0x2);
    /// Class list
    pub const STYLE: Preserve = Preserve(0x4);
    pub const ALL: Preserve = Preserve(0x7);

    pub fn contains(self, other: Preserve) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Preserve {
    type Output = Preserve;

    fn bitor(self, rhs: Preserve) -> Preserve {
        Preserve(self.0 | rhs.0)
    }
}

impl Default for Preserve {
    fn default() -> Self {
        Self::ALL
    }
}

fn copy_attribute(tree: &mut DomTree, from: NodeId, to: NodeId, name: &str) -> EditResult<()> {
    match tree.get_attribute(from, name) {
        Some(value) => tree.set_attribute(to, name, &value)?,
        None => {
            tree.remove_attribute(to, name)?;
        }
    }
    Ok(())
}

/// Replace `old` with `new` at the same position, returning `new`.
pub fn replace(
    tree: &mut DomTree,
    config: &EditConfig,
    identities: &mut IdentityStore,
    old: NodeId,
    new: NodeId,
    preserve: Preserve,
) -> EditResult<NodeId> {
    if !tree.is_element(old) {
        return Err(EditError::invalid(OPERATION, "old node"));
    }
    if !tree.is_element(new) || new == old {
        return Err(EditError::invalid(OPERATION, "new node"));
    }
    let parent = tree
        .parent(old)
        .ok_or_else(|| EditError::detached(OPERATION, "old node"))?;
    if tree.is_inclusive_ancestor(new, parent) {
        return Err(DomError::HierarchyRequest { parent, child: new }.into());
    }

    if preserve.contains(Preserve::IDENTITY) {
        if let Some(identity) = identities.identity_of(tree, old) {
            identities.set(tree, new, &identity)?;
        }
    }
    if preserve.contains(Preserve::BEHAVIOR) {
        copy_attribute(tree, old, new, &config.action_attribute)?;
    }
    if preserve.contains(Preserve::STYLE) {
        copy_attribute(tree, old, new, "class")?;
    }
    // Whatever was not carried over, the replacement still needs an identity
    identities.assign(tree, new, Some(parent))?;

    tree.replace_child(parent, new, old)?;

    tracing::debug!("replaced {} with {} in {} ({:?})", old, new, parent, preserve);
    Ok(new)
}
