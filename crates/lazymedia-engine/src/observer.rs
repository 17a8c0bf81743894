//! Viewport Observation Primitive
//!
//! The engine talks to whatever intersection facility the host provides
//! through these traits. Delivery is batched and pull-based: the host
//! collects transition entries from its primitive and hands them to the
//! tracker in report order, one batch per tick.

use crate::ProximityConfig;
use lazymedia_dom::NodeId;

/// One visibility transition for an observed element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// The observed element
    pub target: NodeId,
    /// Whether the element now intersects the configured proximity area
    pub is_intersecting: bool,
    /// Overlap ratio at the time of the transition
    pub intersection_ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: NodeId, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
        }
    }
}

/// Handle to an open observation session
pub trait ViewportObserver {
    /// Start watching an element
    fn observe(&mut self, target: NodeId);

    /// Stop watching a single element; the session stays open
    fn unobserve(&mut self, target: NodeId);

    /// Release the whole session
    fn disconnect(&mut self);

    /// Number of elements currently watched
    fn observed_count(&self) -> usize;
}

/// Opens observation sessions on a host environment
pub trait ObserverFactory {
    /// Open a session with the given proximity tuning.
    ///
    /// Returns `None` when the host has no visibility primitive at all;
    /// the tracker then promotes everything eagerly instead of leaving
    /// media permanently unloaded.
    fn create(&self, config: &ProximityConfig) -> Option<Box<dyn ViewportObserver>>;
}

/// Factory for hosts without a visibility primitive
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedHost;

impl ObserverFactory for UnsupportedHost {
    fn create(&self, _config: &ProximityConfig) -> Option<Box<dyn ViewportObserver>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_ratio_defaults() {
        let mut tree = lazymedia_dom::DomTree::new();
        let img = tree.create_element("img");

        let hit = IntersectionEntry::new(img, true);
        let miss = IntersectionEntry::new(img, false);

        assert_eq!(hit.intersection_ratio, 1.0);
        assert_eq!(miss.intersection_ratio, 0.0);
    }

    #[test]
    fn test_unsupported_host_creates_nothing() {
        assert!(UnsupportedHost.create(&ProximityConfig::default()).is_none());
    }
}
