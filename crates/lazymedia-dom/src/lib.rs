//! lazymedia DOM - Document tree substrate
//!
//! Memory-light arena DOM the lazy-loading engine scans and mutates.

mod attributes;
mod document;
mod node;
mod tree;

pub use attributes::{Attr, AttributeMap};
pub use document::Document;
pub use node::{ElementData, Node, NodeData, TextData};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Document root ID
    pub const ROOT: NodeId = NodeId(0);

    /// Check the id refers to a real slot
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != NodeId::NONE
    }
}

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// No node with this id exists in the tree
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),

    /// The operation requires an element node
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
}
