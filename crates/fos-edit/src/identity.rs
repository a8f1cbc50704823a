//! Item identity
//!
//! Identities are opaque strings stored in an attribute (`data-id` by
//! default). Fresh identities come from a monotonically increasing counter,
//! skipping any value a sibling in the target container already carries, so
//! an identity is unique within its container at assignment time and never
//! handed out twice by the same store.

use std::collections::HashSet;

use fos_dom::{DomTree, NodeId};

use crate::{EditError, EditResult};

/// Assigns and looks up item identities
#[derive(Debug, Clone)]
pub struct IdentityStore {
    attribute: String,
    next: u64,
}

impl IdentityStore {
    pub fn new(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            next: 1,
        }
    }

    /// Attribute the identity is stored in
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn identity_of(&self, tree: &DomTree, node: NodeId) -> Option<String> {
        tree.get_attribute(node, &self.attribute)
    }

    /// Set an explicit identity, overwriting any existing one
    pub fn set(&self, tree: &mut DomTree, node: NodeId, identity: &str) -> EditResult<()> {
        if !tree.is_element(node) {
            return Err(EditError::invalid("set_identity", "node"));
        }
        tree.set_attribute(node, &self.attribute, identity)?;
        Ok(())
    }

    /// Return the node's identity, assigning a fresh one if it has none.
    /// Freshness is checked against the children of `scope`.
    pub fn assign(
        &mut self,
        tree: &mut DomTree,
        node: NodeId,
        scope: Option<NodeId>,
    ) -> EditResult<String> {
        self.assign_avoiding(tree, node, scope, &HashSet::new())
    }

    /// Like [`assign`](Self::assign), also skipping every value in
    /// `reserved`. Used when a batch mixes supplied and fresh identities.
    pub fn assign_avoiding(
        &mut self,
        tree: &mut DomTree,
        node: NodeId,
        scope: Option<NodeId>,
        reserved: &HashSet<String>,
    ) -> EditResult<String> {
        if !tree.is_element(node) {
            return Err(EditError::invalid("assign_identity", "node"));
        }
        if let Some(existing) = self.identity_of(tree, node) {
            return Ok(existing);
        }

        let identity = loop {
            let candidate = self.next.to_string();
            self.next += 1;
            let taken = reserved.contains(&candidate)
                || scope.is_some_and(|container| self.find(tree, container, &candidate).is_some());
            if !taken {
                break candidate;
            }
        };

        tree.set_attribute(node, &self.attribute, &identity)?;
        tracing::trace!("assigned identity {:?} to {}", identity, node);
        Ok(identity)
    }

    /// Find the direct child of `container` carrying `identity`
    pub fn find(&self, tree: &DomTree, container: NodeId, identity: &str) -> Option<NodeId> {
        tree.children(container)
            .find(|&child| self.identity_of(tree, child).as_deref() == Some(identity))
    }

    /// Give every element child of `container` lacking an identity a fresh
    /// one. Returns how many were assigned.
    pub fn assign_missing(&mut self, tree: &mut DomTree, container: NodeId) -> EditResult<usize> {
        if !tree.contains(container) {
            return Err(EditError::invalid("assign_missing", "container"));
        }

        let missing: Vec<NodeId> = tree
            .children(container)
            .filter(|&child| tree.is_element(child) && self.identity_of(tree, child).is_none())
            .collect();
        for &child in &missing {
            self.assign(tree, child, Some(container))?;
        }

        tracing::debug!("assigned {} identities in {}", missing.len(), container);
        Ok(missing.len())
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new("data-id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::NodeOperations;

    fn list(tree: &mut DomTree, n: usize) -> (NodeId, Vec<NodeId>) {
        let ul = tree.create_element("ul");
        let items = (0..n)
            .map(|_| {
                let li = tree.create_element("li");
                tree.append_child(ul, li).unwrap();
                li
            })
            .collect();
        (ul, items)
    }

    #[test]
    fn test_assign_missing_numbers_in_order() {
        let mut tree = DomTree::new();
        let (ul, items) = list(&mut tree, 3);
        let mut store = IdentityStore::default();

        assert_eq!(store.assign_missing(&mut tree, ul).unwrap(), 3);

        let ids: Vec<_> = items.iter().map(|&li| store.identity_of(&tree, li).unwrap()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(store.assign_missing(&mut tree, ul).unwrap(), 0);
    }

    #[test]
    fn test_assign_skips_taken_values() {
        let mut tree = DomTree::new();
        let (ul, items) = list(&mut tree, 2);
        let mut store = IdentityStore::default();
        store.set(&mut tree, items[0], "1").unwrap();

        let fresh = tree.create_element("li");
        let id = store.assign(&mut tree, fresh, Some(ul)).unwrap();

        assert_eq!(id, "2");
    }

    #[test]
    fn test_assign_avoiding_reserved() {
        let mut tree = DomTree::new();
        let mut store = IdentityStore::default();
        let reserved: HashSet<String> = ["1", "2"].into_iter().map(String::from).collect();

        let li = tree.create_element("li");
        let id = store.assign_avoiding(&mut tree, li, None, &reserved).unwrap();

        assert_eq!(id, "3");
    }

    #[test]
    fn test_assign_keeps_existing() {
        let mut tree = DomTree::new();
        let li = tree.create_element("li");
        let mut store = IdentityStore::default();
        store.set(&mut tree, li, "task-9").unwrap();

        assert_eq!(store.assign(&mut tree, li, None).unwrap(), "task-9");
    }

    #[test]
    fn test_find_by_identity() {
        let mut tree = DomTree::new();
        let (ul, items) = list(&mut tree, 3);
        let mut store = IdentityStore::new("data-task-id");
        store.assign_missing(&mut tree, ul).unwrap();

        assert_eq!(store.find(&tree, ul, "2"), Some(items[1]));
        assert_eq!(store.find(&tree, ul, "7"), None);
        assert!(tree.has_attribute(items[0], "data-task-id"));
    }

    #[test]
    fn test_text_nodes_have_no_identity() {
        let mut tree = DomTree::new();
        let text = tree.create_text("x");
        let mut store = IdentityStore::default();

        assert_eq!(
            store.assign(&mut tree, text, None),
            Err(EditError::invalid("assign_identity", "node"))
        );
    }
}
