//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: removing a node only unlinks it, so handles held
//! by callers keep answering `parent() == None` after a removal.

use crate::events::ListenerRegistry;
use crate::{DomError, DomResult, Node, NodeData, NodeId, NodeType, TokenList};

/// Arena-based DOM tree
pub struct DomTree {
    nodes: Vec<Node>,
    pub(crate) listeners: ListenerRegistry,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DomTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomTree")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            listeners: ListenerRegistry::default(),
        }
    }

    /// Document root
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Check that a handle names a node of this tree
    pub fn contains(&self, id: NodeId) -> bool {
        id.is_valid() && id.index() < self.nodes.len()
    }

    /// Number of nodes ever allocated, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let Some(id) = NodeId::from_index(self.nodes.len()) else {
            panic!("node arena exhausted: {} nodes", self.nodes.len());
        };
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text))
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.to_option())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling.to_option())
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling.to_option())
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.first_child.to_option())
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.last_child.to_option())
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Iterate from the parent of a node up to the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Pre-order walk of everything below `root`, excluding `root`
    pub fn descendants(&self, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut next = self.first_child(root);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.first_child(current).or_else(|| {
                let mut node = current;
                loop {
                    if node == root {
                        return None;
                    }
                    if let Some(sibling) = self.next_sibling(node) {
                        return Some(sibling);
                    }
                    node = self.parent(node)?;
                }
            });
            Some(current)
        })
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Position of a node among its siblings
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).position(|child| child == id)
    }

    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).nth(index)
    }

    /// True when `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Nearest inclusive ancestor accepted by `predicate`
    pub fn closest(
        &self,
        id: NodeId,
        mut predicate: impl FnMut(&DomTree, NodeId) -> bool,
    ) -> Option<NodeId> {
        if !self.contains(id) {
            return None;
        }
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&node| predicate(self, node))
    }

    // ------------------------------------------------------------------
    // Node data
    // ------------------------------------------------------------------

    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.get(id).map(Node::node_type)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Concatenated text of a node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(text)) | Some(NodeData::Comment(text)) => text.clone(),
            Some(_) => self
                .descendants(id)
                .filter_map(|d| self.get(d).and_then(Node::as_text))
                .collect(),
            None => String::new(),
        }
    }

    /// Replace a node's children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        match &mut node.data {
            NodeData::Text(content) | NodeData::Comment(content) => {
                *content = text.to_string();
                return Ok(());
            }
            NodeData::Document => return Err(DomError::InvalidNodeType(id)),
            NodeData::Element(_) => {}
        }

        while let Some(child) = self.first_child(id) {
            self.unlink(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.link_before(id, text_node, None);
        }
        Ok(())
    }

    pub fn class_list(&self, id: NodeId) -> Option<&TokenList> {
        self.get(id)?.as_element().map(|e| &e.classes)
    }

    pub fn class_list_mut(&mut self, id: NodeId) -> Option<&mut TokenList> {
        self.get_mut(id)?.as_element_mut().map(|e| &mut e.classes)
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get(id)
            .and_then(Node::as_element)
            .is_some_and(|e| e.has_attr(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        let elem = node.as_element_mut().ok_or(DomError::InvalidNodeType(id))?;
        elem.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<bool> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        let elem = node.as_element_mut().ok_or(DomError::InvalidNodeType(id))?;
        Ok(elem.remove_attr(name))
    }

    // ------------------------------------------------------------------
    // Raw linking. Callers validate first; see `operations.rs`.
    // ------------------------------------------------------------------

    /// Unlink a node from its parent and siblings
    pub(crate) fn unlink(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(node) => (node.parent, node.prev_sibling, node.next_sibling),
            None => return,
        };
        if !parent.is_valid() {
            return;
        }

        match self.get_mut(prev) {
            Some(prev_node) => prev_node.next_sibling = next,
            None => {
                if let Some(parent_node) = self.get_mut(parent) {
                    parent_node.first_child = next;
                }
            }
        }
        match self.get_mut(next) {
            Some(next_node) => next_node.prev_sibling = prev,
            None => {
                if let Some(parent_node) = self.get_mut(parent) {
                    parent_node.last_child = prev;
                }
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Link a detached node under `parent`, before `anchor` or at the end
    pub(crate) fn link_before(&mut self, parent: NodeId, id: NodeId, anchor: Option<NodeId>) {
        let next = anchor.unwrap_or(NodeId::NONE);
        let prev = match anchor {
            Some(a) => self.get(a).map_or(NodeId::NONE, |n| n.prev_sibling),
            None => self.get(parent).map_or(NodeId::NONE, |n| n.last_child),
        };

        if let Some(node) = self.get_mut(id) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        match self.get_mut(prev) {
            Some(prev_node) => prev_node.next_sibling = id,
            None => {
                if let Some(parent_node) = self.get_mut(parent) {
                    parent_node.first_child = id;
                }
            }
        }
        match self.get_mut(next) {
            Some(next_node) => next_node.prev_sibling = id,
            None => {
                if let Some(parent_node) = self.get_mut(parent) {
                    parent_node.last_child = id;
                }
            }
        }
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Iterator over ancestors, nearest first
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
