//! Media Scanner
//!
//! One-shot, document-order walk of a container subtree that finds
//! every element eligible for lazy tracking. The scan happens once per
//! attach; content added afterwards is picked up by re-attaching.

use crate::promote::{has_deferred_attributes, has_deferred_background};
use lazymedia_dom::{DomTree, NodeId};
use std::collections::HashSet;

/// Elements whose nested sources are promoted together
const GROUPING_TAGS: [&str; 3] = ["picture", "video", "audio"];

/// Tags a grouping element may contribute as group members
const MEMBER_TAGS: [&str; 2] = ["source", "img"];

/// A trackable unit
///
/// `primary` is the single element registered with the observer;
/// `members` are all nodes whose deferred attributes are promoted when
/// `primary` enters the proximity area. For a standalone image the two
/// coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaGroup {
    pub primary: NodeId,
    pub members: Vec<NodeId>,
}

impl MediaGroup {
    fn standalone(node: NodeId) -> Self {
        Self {
            primary: node,
            members: vec![node],
        }
    }
}

/// Collect every trackable media group under `container`, in document
/// order. A missing or stale container yields an empty set.
pub fn scan_container(tree: &DomTree, container: NodeId) -> Vec<MediaGroup> {
    if tree.get(container).is_none() {
        tracing::debug!("scan target missing, nothing to track");
        return Vec::new();
    }

    let mut groups = Vec::new();
    // Direct children already claimed by a grouping element; they must
    // not be enqueued again as standalone matches.
    let mut claimed: HashSet<NodeId> = HashSet::new();

    for node in tree.descendants(container) {
        let Some(tag) = tree.tag_name(node) else {
            continue;
        };

        if GROUPING_TAGS.contains(&tag) {
            let mut members = Vec::new();
            if has_deferred_attributes(tree, node) {
                members.push(node);
            }
            for child in tree.children(node) {
                match tree.tag_name(child) {
                    Some(child_tag) if MEMBER_TAGS.contains(&child_tag) => {
                        claimed.insert(child);
                        if has_deferred_attributes(tree, child) {
                            members.push(child);
                        }
                    }
                    _ => {}
                }
            }
            if !members.is_empty() {
                groups.push(MediaGroup {
                    primary: node,
                    members,
                });
            }
        } else if !claimed.contains(&node)
            && (tag == "img" && has_deferred_attributes(tree, node)
                || has_deferred_background(tree, node))
        {
            // Standalone image, or any element with a deferred
            // background locator.
            groups.push(MediaGroup::standalone(node));
        }
    }

    tracing::debug!("scan found {} trackable media groups", groups.len());
    groups
}
