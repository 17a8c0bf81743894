//! DOM Tree (arena-based allocation)
//!
//! Nodes live in a flat vector and reference each other by `NodeId`.
//! Callers hold copyable ids; traversal and attribute access go through
//! the tree. Lookups on stale ids return `None`/`Err`, never panic.

use crate::{DomError, Node, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree containing only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Document root id
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (it never is; the root always exists)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push_node(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push_node(Node::comment(content))
    }

    /// Append `child` as the last child of `parent`. Detaches `child`
    /// from any previous parent first. No-op if either id is stale.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);

        let prev_last = self.nodes[parent.0 as usize].last_child;
        if prev_last.is_valid() {
            self.nodes[prev_last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;

        let child_node = &mut self.nodes[child.0 as usize];
        child_node.parent = parent;
        child_node.prev_sibling = prev_last;
        child_node.next_sibling = NodeId::NONE;
    }

    /// Unlink a node (and its subtree) from its parent. The node stays
    /// in the arena; `is_attached` turns false for the whole subtree.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Is the node still linked under the document root?
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let Some(node) = self.get(current) else {
                return false;
            };
            if node.is_document() {
                return true;
            }
            if !node.parent.is_valid() {
                return false;
            }
            current = node.parent;
        }
    }

    /// Iterate direct children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate the subtree below `id` in document order. `id` itself is
    /// not yielded.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Tag name if the node is an element (always lowercase)
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.attrs.get(name)
    }

    /// Check if an element carries an attribute
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.attrs.set(name, value);
        Ok(())
    }

    /// Remove an attribute from an element. Removing an absent
    /// attribute is not an error.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        self.element_mut(id)?.attrs.remove(name);
        Ok(())
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut crate::ElementData, DomError> {
        self.get_mut(id)
            .ok_or(DomError::NodeNotFound(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self
            .tree
            .get(current)
            .map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}

/// Document-order iterator over a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Descendants<'_> {
    /// Successor of `id` in document order, staying inside the subtree.
    fn successor(&self, id: NodeId) -> NodeId {
        let Some(node) = self.tree.get(id) else {
            return NodeId::NONE;
        };
        if node.first_child.is_valid() {
            return node.first_child;
        }
        // Climb until a next sibling exists or the subtree root is hit.
        let mut current = id;
        loop {
            if current == self.root {
                return NodeId::NONE;
            }
            let Some(node) = self.tree.get(current) else {
                return NodeId::NONE;
            };
            if node.next_sibling.is_valid() {
                return node.next_sibling;
            }
            if !node.parent.is_valid() {
                return NodeId::NONE;
            }
            current = node.parent;
        }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.successor(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (DomTree, NodeId, Vec<NodeId>) {
        // <div><p>text</p><img/></div>
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        let text = tree.create_text("text");
        let img = tree.create_element("img");

        tree.append_child(tree.root(), div);
        tree.append_child(div, p);
        tree.append_child(p, text);
        tree.append_child(div, img);

        (tree, div, vec![p, text, img])
    }

    #[test]
    fn test_append_and_children() {
        let (tree, div, ids) = sample_tree();

        let children: Vec<_> = tree.children(div).collect();
        assert_eq!(children, vec![ids[0], ids[2]]); // p, img
    }

    #[test]
    fn test_descendants_document_order() {
        let (tree, div, ids) = sample_tree();

        let order: Vec<_> = tree.descendants(div).collect();
        assert_eq!(order, ids); // p, text, img
    }

    #[test]
    fn test_descendants_of_leaf() {
        let (tree, _, ids) = sample_tree();

        assert_eq!(tree.descendants(ids[2]).count(), 0);
    }

    #[test]
    fn test_detach() {
        let (mut tree, div, ids) = sample_tree();
        let p = ids[0];

        assert!(tree.is_attached(p));
        tree.detach(p);
        assert!(!tree.is_attached(p));
        assert!(!tree.is_attached(ids[1])); // text inside p
        assert!(tree.is_attached(ids[2])); // img untouched

        let children: Vec<_> = tree.children(div).collect();
        assert_eq!(children, vec![ids[2]]);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let (mut tree, _, ids) = sample_tree();

        tree.detach(ids[0]);
        tree.detach(ids[0]);
        assert!(!tree.is_attached(ids[0]));
    }

    #[test]
    fn test_reappend_moves_node() {
        let (mut tree, div, ids) = sample_tree();
        let img = ids[2];
        let other = tree.create_element("section");
        tree.append_child(tree.root(), other);

        tree.append_child(other, img);

        assert_eq!(tree.children(div).count(), 1);
        assert_eq!(tree.children(other).collect::<Vec<_>>(), vec![img]);
        assert!(tree.is_attached(img));
    }

    #[test]
    fn test_attributes_via_tree() {
        let (mut tree, _, ids) = sample_tree();
        let img = ids[2];

        tree.set_attribute(img, "data-src", "a.png").unwrap();
        assert!(tree.has_attribute(img, "data-src"));
        assert_eq!(tree.get_attribute(img, "data-src"), Some("a.png"));

        tree.remove_attribute(img, "data-src").unwrap();
        assert!(!tree.has_attribute(img, "data-src"));
    }

    #[test]
    fn test_attribute_on_text_node_fails() {
        let (mut tree, _, ids) = sample_tree();
        let text = ids[1];

        assert_eq!(
            tree.set_attribute(text, "src", "a.png"),
            Err(DomError::NotAnElement(text))
        );
        assert_eq!(
            tree.set_attribute(NodeId(999), "src", "a.png"),
            Err(DomError::NodeNotFound(NodeId(999)))
        );
    }

    #[test]
    fn test_stale_id_lookups() {
        let tree = DomTree::new();

        assert!(tree.get(NodeId(42)).is_none());
        assert!(!tree.is_attached(NodeId(42)));
        assert_eq!(tree.children(NodeId(42)).count(), 0);
        assert_eq!(tree.descendants(NodeId(42)).count(), 0);
    }
}
