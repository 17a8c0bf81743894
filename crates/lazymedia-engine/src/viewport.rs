//! Viewport Geometry Observer
//!
//! Reference implementation of the observation primitive: element
//! rectangles are tested against a margin-expanded viewport, and a
//! transition is reported only when an element's intersection state
//! changes between sweeps.
//!
//! The host owns a [`GeometryHost`]; the tracker owns the session
//! handles it creates. Both sides point at the same session core
//! through `Rc<RefCell<_>>` - everything here runs on the single UI
//! thread.

use crate::{IntersectionEntry, MarginBox, ObserverFactory, ProximityConfig, ViewportObserver};
use lazymedia_dom::NodeId;
use std::cell::RefCell;
use std::rc::Rc;

/// Rectangle in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create with dimensions
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Check if two rectangles overlap
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Area of the overlap (0 if disjoint)
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        if !self.intersects(other) {
            return 0.0;
        }
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        w * h
    }
}

/// Viewport for proximity testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: Rect,
}

impl Viewport {
    /// Viewport at the origin
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
        }
    }

    /// Viewport with a scroll offset
    pub const fn with_origin(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Rect::new(x, y, width, height),
        }
    }

    /// Current bounds
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Grow the viewport by a per-edge margin (for proximity testing)
    pub fn expand(&self, margin: &MarginBox) -> Rect {
        Rect {
            x: self.bounds.x - margin.left,
            y: self.bounds.y - margin.top,
            width: self.bounds.width + margin.left + margin.right,
            height: self.bounds.height + margin.top + margin.bottom,
        }
    }
}

/// One watched element and its last reported state
#[derive(Debug)]
struct Watched {
    target: NodeId,
    rect: Rect,
    last: Option<bool>,
}

/// Geometry-based observation session
///
/// Element rects are fed in from the host's layout; `take_entries`
/// reports state changes in observation order. The first sweep after
/// `observe` always reports the element's current state once.
#[derive(Debug)]
pub struct GeometryObserver {
    viewport: Viewport,
    margin: MarginBox,
    threshold: f64,
    watched: Vec<Watched>,
}

impl GeometryObserver {
    pub fn new(viewport: Viewport, config: &ProximityConfig) -> Self {
        Self {
            viewport,
            margin: config.margin,
            threshold: config.threshold,
            watched: Vec::new(),
        }
    }

    /// Update the layout rect of a watched element. Rects for elements
    /// that are not observed are ignored.
    pub fn set_rect(&mut self, target: NodeId, rect: Rect) {
        if let Some(w) = self.watched.iter_mut().find(|w| w.target == target) {
            w.rect = rect;
        }
    }

    /// Move the viewport (scroll)
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Compute transitions since the last sweep
    pub fn take_entries(&mut self) -> Vec<IntersectionEntry> {
        let expanded = self.viewport.expand(&self.margin);
        let mut entries = Vec::new();

        for w in &mut self.watched {
            let overlap = expanded.intersection_area(&w.rect);
            let ratio = if w.rect.area() > 0.0 {
                f64::from(overlap / w.rect.area())
            } else if expanded.intersects(&w.rect) {
                1.0
            } else {
                0.0
            };
            let intersecting = if self.threshold > 0.0 {
                ratio > self.threshold
            } else {
                ratio > 0.0
            };

            if w.last != Some(intersecting) {
                w.last = Some(intersecting);
                entries.push(IntersectionEntry {
                    target: w.target,
                    is_intersecting: intersecting,
                    intersection_ratio: ratio,
                });
            }
        }

        entries
    }
}

impl ViewportObserver for GeometryObserver {
    fn observe(&mut self, target: NodeId) {
        if !self.watched.iter().any(|w| w.target == target) {
            self.watched.push(Watched {
                target,
                rect: Rect::default(),
                last: None,
            });
        }
    }

    fn unobserve(&mut self, target: NodeId) {
        self.watched.retain(|w| w.target != target);
    }

    fn disconnect(&mut self) {
        self.watched.clear();
    }

    fn observed_count(&self) -> usize {
        self.watched.len()
    }
}

/// Host side of the geometry primitive
///
/// Creates session cores on demand (one per `attach`), feeds them
/// layout rects and viewport moves, and sweeps them for transitions.
pub struct GeometryHost {
    viewport: Viewport,
    sessions: RefCell<Vec<Rc<RefCell<GeometryObserver>>>>,
}

impl GeometryHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            sessions: RefCell::new(Vec::new()),
        }
    }

    /// Feed an element's layout rect to every open session
    pub fn set_rect(&self, target: NodeId, rect: Rect) {
        for session in self.sessions.borrow().iter() {
            session.borrow_mut().set_rect(target, rect);
        }
    }

    /// Scroll the viewport
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for session in self.sessions.borrow().iter() {
            session.borrow_mut().set_viewport(viewport);
        }
    }

    /// Sweep all sessions and collect transitions in session order.
    /// Sessions whose handle was dropped fall out here.
    pub fn sweep(&self) -> Vec<IntersectionEntry> {
        let mut sessions = self.sessions.borrow_mut();
        sessions.retain(|s| Rc::strong_count(s) > 1);

        let mut entries = Vec::new();
        for session in sessions.iter() {
            entries.extend(session.borrow_mut().take_entries());
        }
        entries
    }
}

impl ObserverFactory for GeometryHost {
    fn create(&self, config: &ProximityConfig) -> Option<Box<dyn ViewportObserver>> {
        let core = Rc::new(RefCell::new(GeometryObserver::new(self.viewport, config)));
        self.sessions.borrow_mut().push(Rc::clone(&core));
        Some(Box::new(HostedObserver { core }))
    }
}

/// Session handle handed to the tracker; shares its core with the host
struct HostedObserver {
    core: Rc<RefCell<GeometryObserver>>,
}

impl ViewportObserver for HostedObserver {
    fn observe(&mut self, target: NodeId) {
        self.core.borrow_mut().observe(target);
    }

    fn unobserve(&mut self, target: NodeId) {
        self.core.borrow_mut().unobserve(target);
    }

    fn disconnect(&mut self) {
        self.core.borrow_mut().disconnect();
    }

    fn observed_count(&self) -> usize {
        self.core.borrow().observed_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazymedia_dom::DomTree;

    fn node_ids(count: usize) -> (DomTree, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let ids = (0..count).map(|_| tree.create_element("img")).collect();
        (tree, ids)
    }

    #[test]
    fn test_rect_intersects() {
        let vp = Rect::new(0.0, 0.0, 100.0, 100.0);

        // Fully inside
        assert!(vp.intersects(&Rect::new(10.0, 10.0, 20.0, 20.0)));

        // Partially inside
        assert!(vp.intersects(&Rect::new(-10.0, -10.0, 20.0, 20.0)));

        // Fully outside
        assert!(!vp.intersects(&Rect::new(200.0, 200.0, 20.0, 20.0)));
    }

    #[test]
    fn test_intersection_area() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);

        assert_eq!(a.intersection_area(&b), 2500.0);
        assert_eq!(a.intersection_area(&Rect::new(200.0, 0.0, 10.0, 10.0)), 0.0);
    }

    #[test]
    fn test_expand_per_edge() {
        let vp = Viewport::new(800.0, 600.0);
        let margin = MarginBox {
            top: 10.0,
            right: 20.0,
            bottom: 30.0,
            left: 40.0,
        };

        let expanded = vp.expand(&margin);
        assert_eq!(expanded.x, -40.0);
        assert_eq!(expanded.y, -10.0);
        assert_eq!(expanded.width, 860.0);
        assert_eq!(expanded.height, 640.0);
    }

    #[test]
    fn test_reports_only_state_changes() {
        let (_tree, ids) = node_ids(1);
        let config = ProximityConfig::with_margin(100.0);
        let mut observer = GeometryObserver::new(Viewport::new(800.0, 600.0), &config);

        observer.observe(ids[0]);
        observer.set_rect(ids[0], Rect::new(0.0, 2000.0, 100.0, 100.0));

        // First sweep reports the initial (offscreen) state once.
        let first = observer.take_entries();
        assert_eq!(first.len(), 1);
        assert!(!first[0].is_intersecting);

        // No change, no entry.
        assert!(observer.take_entries().is_empty());

        // Element scrolls into the 100px proximity band.
        observer.set_rect(ids[0], Rect::new(0.0, 650.0, 100.0, 100.0));
        let entered = observer.take_entries();
        assert_eq!(entered.len(), 1);
        assert!(entered[0].is_intersecting);
        assert_eq!(entered[0].target, ids[0]);

        // Still intersecting, nothing new.
        assert!(observer.take_entries().is_empty());
    }

    #[test]
    fn test_threshold_requires_ratio() {
        let (_tree, ids) = node_ids(1);
        let config = ProximityConfig {
            threshold: 0.5,
            ..Default::default()
        };
        let mut observer = GeometryObserver::new(Viewport::new(100.0, 100.0), &config);

        observer.observe(ids[0]);
        // 100x100 element, only 20px visible: ratio 0.2 stays below 0.5.
        observer.set_rect(ids[0], Rect::new(0.0, 80.0, 100.0, 100.0));
        let entries = observer.take_entries();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);

        // 60px visible: ratio 0.6 crosses the threshold.
        observer.set_rect(ids[0], Rect::new(0.0, 40.0, 100.0, 100.0));
        let entries = observer.take_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
    }

    #[test]
    fn test_unobserve_stops_reports() {
        let (_tree, ids) = node_ids(2);
        let config = ProximityConfig::default();
        let mut observer = GeometryObserver::new(Viewport::new(800.0, 600.0), &config);

        observer.observe(ids[0]);
        observer.observe(ids[1]);
        observer.set_rect(ids[0], Rect::new(0.0, 0.0, 10.0, 10.0));
        observer.set_rect(ids[1], Rect::new(0.0, 0.0, 10.0, 10.0));
        observer.unobserve(ids[0]);

        let entries = observer.take_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, ids[1]);
        assert_eq!(observer.observed_count(), 1);
    }

    #[test]
    fn test_host_factory_and_sweep() {
        let (_tree, ids) = node_ids(1);
        let host = GeometryHost::new(Viewport::new(800.0, 600.0));

        let mut handle = host
            .create(&ProximityConfig::with_margin(50.0))
            .expect("geometry host always has a primitive");
        handle.observe(ids[0]);
        host.set_rect(ids[0], Rect::new(0.0, 0.0, 10.0, 10.0));

        let entries = host.sweep();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);

        // Dropping the handle retires the session on the next sweep.
        drop(handle);
        assert!(host.sweep().is_empty());
    }
}
