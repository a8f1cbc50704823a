//! DOM Node - Compact representation
//!
//! Tree links are plain [`NodeId`]s; [`NodeId::NONE`] marks a missing link.

use crate::{AttributeMap, NodeId, TokenList};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn unlinked(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::unlinked(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::unlinked(NodeData::Text(content.into()))
    }

    /// Create a new comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::unlinked(NodeData::Comment(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::unlinked(NodeData::Document)
    }

    /// Node type
    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Only documents and elements hold children
    #[inline]
    pub fn can_have_children(&self) -> bool {
        matches!(self.data, NodeData::Document | NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node kind without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
    Comment,
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercased tag name
    pub tag: String,
    /// Class tokens, kept apart from the generic attributes
    pub classes: TokenList,
    /// Every other attribute, in insertion order
    pub attrs: AttributeMap,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: TokenList::new(),
            attrs: AttributeMap::new(),
        }
    }

    /// Get an attribute value. `class` reads through to the token list.
    pub fn get_attr(&self, name: &str) -> Option<String> {
        if name == "class" {
            return (!self.classes.is_empty()).then(|| self.classes.value());
        }
        self.attrs.get(name).map(str::to_string)
    }

    /// Set an attribute. `class` replaces the token list.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if name == "class" {
            self.classes.set_value(value);
        } else {
            self.attrs.set(name, value);
        }
    }

    /// Remove an attribute, returning whether it was present
    pub fn remove_attr(&mut self, name: &str) -> bool {
        if name == "class" {
            let had = !self.classes.is_empty();
            self.classes.clear();
            had
        } else {
            self.attrs.remove(name).is_some()
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        if name == "class" {
            !self.classes.is_empty()
        } else {
            self.attrs.contains(name)
        }
    }
}
