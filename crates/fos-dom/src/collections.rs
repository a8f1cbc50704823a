//! Node collections
//!
//! Two read modes, chosen explicitly by the caller:
//! - [`NodeList`]: a static snapshot taken at call time. Finite and
//!   restartable; later mutations do not show up in it.
//! - [`LiveCollection`]: a query description that is re-resolved against
//!   the tree on every access.

use crate::{DomTree, NodeId};

/// Static node list (snapshot)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList {
    nodes: Vec<NodeId>,
}

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn length(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<NodeId> {
        self.nodes.clone()
    }
}

impl IntoIterator for NodeList {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

/// What a live collection selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionFilter {
    /// Direct children, any node type
    Children,
    /// Descendant elements carrying a class
    Class(String),
    /// Descendant elements with a tag name
    Tag(String),
}

/// Live collection (re-evaluated on each access)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveCollection {
    root: NodeId,
    filter: CollectionFilter,
}

impl LiveCollection {
    pub fn new(root: NodeId, filter: CollectionFilter) -> Self {
        Self { root, filter }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current members, in tree order
    pub fn iter<'a>(&'a self, tree: &'a DomTree) -> Box<dyn Iterator<Item = NodeId> + 'a> {
        match &self.filter {
            CollectionFilter::Children => Box::new(tree.children(self.root)),
            CollectionFilter::Class(class) => Box::new(
                tree.descendants(self.root)
                    .filter(move |&n| tree.class_list(n).is_some_and(|c| c.contains(class))),
            ),
            CollectionFilter::Tag(tag) => Box::new(
                tree.descendants(self.root)
                    .filter(move |&n| {
                        tree.tag_name(n).is_some_and(|t| t.eq_ignore_ascii_case(tag))
                    }),
            ),
        }
    }

    pub fn length(&self, tree: &DomTree) -> usize {
        self.iter(tree).count()
    }

    pub fn item(&self, tree: &DomTree, index: usize) -> Option<NodeId> {
        self.iter(tree).nth(index)
    }

    /// Freeze the current members into a static list
    pub fn snapshot(&self, tree: &DomTree) -> NodeList {
        NodeList::from_vec(self.iter(tree).collect())
    }
}

impl DomTree {
    /// Live view of a node's children
    pub fn live_children(&self, node: NodeId) -> LiveCollection {
        LiveCollection::new(node, CollectionFilter::Children)
    }

    /// Static snapshot of a node's children
    pub fn child_snapshot(&self, node: NodeId) -> NodeList {
        NodeList::from_vec(self.children(node).collect())
    }

    /// Live view of descendants carrying `class`
    pub fn live_by_class(&self, root: NodeId, class: &str) -> LiveCollection {
        LiveCollection::new(root, CollectionFilter::Class(class.to_string()))
    }

    /// Static snapshot of descendants carrying `class`
    pub fn snapshot_by_class(&self, root: NodeId, class: &str) -> NodeList {
        self.live_by_class(root, class).snapshot(self)
    }

    /// Static snapshot of descendant elements with `tag`
    pub fn snapshot_by_tag(&self, root: NodeId, tag: &str) -> NodeList {
        LiveCollection::new(root, CollectionFilter::Tag(tag.to_string())).snapshot(self)
    }
}
