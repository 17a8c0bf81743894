//! Attribute Promoter
//!
//! Swaps deferred `data-*` attributes for the live ones. Promotion is
//! idempotent: the deferred attribute is removed in the same step, so a
//! second invocation finds nothing to do.

use crate::MediaGroup;
use lazymedia_dom::{DomTree, NodeId};

/// Deferred attributes copied verbatim to their live counterpart
const PROMOTION_PAIRS: [(&str, &str); 2] = [("data-src", "src"), ("data-srcset", "srcset")];

/// Deferred background locator, promoted into an inline style
const DEFERRED_BACKGROUND: &str = "data-background-src";

/// Every recognized deferred attribute name
const DEFERRED_ATTRS: [&str; 3] = ["data-src", "data-srcset", DEFERRED_BACKGROUND];

/// Does the element carry at least one deferred attribute?
pub fn has_deferred_attributes(tree: &DomTree, node: NodeId) -> bool {
    DEFERRED_ATTRS
        .iter()
        .any(|name| tree.has_attribute(node, name))
}

/// Does the element carry a deferred background locator?
pub(crate) fn has_deferred_background(tree: &DomTree, node: NodeId) -> bool {
    tree.has_attribute(node, DEFERRED_BACKGROUND)
}

/// Promote every deferred attribute on one element. Returns whether
/// anything changed. Non-element or stale ids change nothing.
pub fn promote_element(tree: &mut DomTree, node: NodeId) -> bool {
    let mut changed = false;

    for (deferred, live) in PROMOTION_PAIRS {
        let Some(value) = tree.get_attribute(node, deferred).map(str::to_owned) else {
            continue;
        };
        if tree.set_attribute(node, live, &value).is_ok() {
            let _ = tree.remove_attribute(node, deferred);
            changed = true;
        }
    }

    if let Some(src) = tree.get_attribute(node, DEFERRED_BACKGROUND).map(str::to_owned) {
        let css = format!("background-image: url('{src}')");
        let style = match tree.get_attribute(node, "style") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{}; {}", existing.trim_end_matches([' ', ';']), css)
            }
            _ => css,
        };
        if tree.set_attribute(node, "style", &style).is_ok() {
            let _ = tree.remove_attribute(node, DEFERRED_BACKGROUND);
            changed = true;
        }
    }

    changed
}

/// Promote a whole group so the platform's source selection sees a
/// consistent candidate set. Skipped silently when the primary has been
/// removed from the document; a detached individual member is skipped
/// without affecting the rest.
pub fn promote_group(tree: &mut DomTree, group: &MediaGroup) -> bool {
    if !tree.is_attached(group.primary) {
        tracing::debug!("skipping promotion, element left the document");
        return false;
    }

    let mut changed = false;
    for &member in &group.members {
        if member != group.primary && !tree.is_attached(member) {
            continue;
        }
        changed |= promote_element(tree, member);
    }

    if changed {
        tracing::debug!("promoted media group of {} member(s)", group.members.len());
    }
    changed
}
