//! fOS DOM - Document Object Model
//!
//! Arena-based content tree used by the editing toolkit.
//!
//! Nodes live in a single `Vec` and link to each other through [`NodeId`]s,
//! so handles stay cheap to copy and a detached node remains addressable
//! (its `parent` simply reads as `None`).

mod attributes;
mod classlist;
mod collections;
mod document;
mod events;
mod node;
mod operations;
mod tree;

pub use attributes::{Attr, AttributeMap};
pub use classlist::TokenList;
pub use collections::{CollectionFilter, LiveCollection, NodeList};
pub use document::Document;
pub use events::{DomEvent, EventType, ListenerCallback, ListenerId, ListenerOptions};
pub use node::{ElementData, Node, NodeData, NodeType};
pub use operations::{DomError, DomResult, NodeOperations};
pub use tree::{Ancestors, Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Null link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the null link
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Handle for an arena index. `None` for indices that do not fit below
    /// the null link.
    pub fn from_index(index: usize) -> Option<NodeId> {
        u32::try_from(index)
            .ok()
            .filter(|&raw| raw != u32::MAX)
            .map(NodeId)
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert a link into an `Option`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        if self.is_valid() { Some(self) } else { None }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#none")
        }
    }
}
