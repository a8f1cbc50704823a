//! Document - High-level document API
//!
//! Owns the tree and the `<html>/<head>/<body>` skeleton. Containers handed
//! to the editing toolkit come from here; the toolkit never creates them.

use crate::{DomResult, DomTree, NodeId, NodeOperations};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a new document with the basic structure
    pub fn new() -> DomResult<Self> {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let root = tree.root();
        tree.append_child(root, html)?;
        tree.append_child(html, head)?;
        tree.append_child(html, body)?;

        Ok(Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
        })
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Create an element with an `id` and append it under `parent`
    pub fn create_section(&mut self, parent: NodeId, tag: &str, id: &str) -> DomResult<NodeId> {
        let element = self.tree.create_element(tag);
        self.tree.set_attribute(element, "id", id)?;
        self.tree.append_child(parent, element)
    }

    /// Get attached element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.tree.root();
        self.tree
            .descendants(root)
            .find(|&node| self.tree.get_attribute(node, "id").as_deref() == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::new().unwrap();
        assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
        assert_eq!(doc.tree().next_sibling(doc.head()), Some(doc.body()));
    }

    #[test]
    fn test_get_element_by_id_skips_detached() {
        let mut doc = Document::new().unwrap();
        let body = doc.body();
        let ul = doc.create_section(body, "ul", "tasks").unwrap();
        let stray = doc.tree.create_element("ul");
        doc.tree.set_attribute(stray, "id", "stray").unwrap();

        assert_eq!(doc.get_element_by_id("tasks"), Some(ul));
        assert_eq!(doc.get_element_by_id("stray"), None);
    }
}
