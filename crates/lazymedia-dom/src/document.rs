//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with the html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after ingestion filled the tree
    pub fn finalize(&mut self) {
        let root = self.tree.root();
        for id in self.tree.descendants(root) {
            match self.tree.tag_name(id) {
                Some("html") if !self.html_element.is_valid() => self.html_element = id,
                Some("head") if !self.head_element.is_valid() => self.head_element = id,
                Some("body") if !self.body_element.is_valid() => self.body_element = id,
                _ => {}
            }
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
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

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new("about:blank");

        assert!(doc.document_element().is_valid());
        assert!(doc.head().is_valid());
        assert!(doc.body().is_valid());
        assert_eq!(doc.tree().tag_name(doc.body()), Some("body"));
    }

    #[test]
    fn test_finalize_locates_structure() {
        let mut doc = Document::empty("about:blank");
        let root = doc.tree().root();
        let html = doc.tree_mut().create_element("html");
        let body = doc.tree_mut().create_element("body");
        doc.tree_mut().append_child(root, html);
        doc.tree_mut().append_child(html, body);

        assert!(!doc.body().is_valid());
        doc.finalize();
        assert_eq!(doc.body(), body);
        assert_eq!(doc.document_element(), html);
        assert!(!doc.head().is_valid());
    }
}
