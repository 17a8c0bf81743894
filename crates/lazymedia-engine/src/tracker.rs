//! Visibility Tracker
//!
//! Owns the tracking session: one observation handle plus the media
//! groups still waiting to enter the viewport. `Idle` until attach;
//! `Active` while anything is tracked; back to `Idle` on detach or
//! once the last group has been promoted.

use crate::{
    promote_group, scan_container, IntersectionEntry, MediaGroup, ObserverFactory,
    ProximityConfig, ViewportObserver,
};
use lazymedia_dom::{DomTree, NodeId};

/// Live binding between a proximity config and the observed set
struct TrackingSession {
    observer: Box<dyn ViewportObserver>,
    tracked: Vec<MediaGroup>,
    config: ProximityConfig,
}

enum State {
    Idle,
    Active(TrackingSession),
}

/// Lazy media loader
///
/// Scans a container once, tracks its media groups and promotes each
/// group's deferred attributes as it approaches the viewport. One
/// loader manages one container at a time; every `attach` is paired
/// with exactly one eventual `detach` (re-attaching detaches first).
pub struct LazyMediaLoader {
    state: State,
}

impl LazyMediaLoader {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Is a tracking session open?
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active(_))
    }

    /// Groups still waiting for promotion
    pub fn tracked_len(&self) -> usize {
        match &self.state {
            State::Idle => 0,
            State::Active(session) => session.tracked.len(),
        }
    }

    /// Proximity tuning of the open session, if any
    pub fn active_config(&self) -> Option<ProximityConfig> {
        match &self.state {
            State::Idle => None,
            State::Active(session) => Some(session.config),
        }
    }

    /// Start tracking media under `container`.
    ///
    /// `config` accepts a full [`ProximityConfig`] or a bare number (a
    /// uniform pixel margin). With no trackable media the loader stays
    /// idle; with no visibility primitive every group is promoted on
    /// the spot so nothing stays unloaded forever.
    pub fn attach<C>(
        &mut self,
        tree: &mut DomTree,
        container: NodeId,
        config: C,
        factory: &dyn ObserverFactory,
    ) where
        C: Into<ProximityConfig>,
    {
        self.detach();

        let config = config.into();
        let groups = scan_container(tree, container);
        if groups.is_empty() {
            tracing::debug!("no trackable media under container, staying idle");
            return;
        }

        let Some(mut observer) = factory.create(&config) else {
            // No visibility primitive: load now rather than never.
            tracing::debug!(
                "visibility primitive unavailable, promoting {} group(s) eagerly",
                groups.len()
            );
            for group in &groups {
                promote_group(tree, group);
            }
            return;
        };

        for group in &groups {
            observer.observe(group.primary);
        }
        tracing::debug!("tracking {} media group(s)", groups.len());
        self.state = State::Active(TrackingSession {
            observer,
            tracked: groups,
            config,
        });
    }

    /// Deliver a batch of transitions from the visibility primitive.
    ///
    /// Entries are processed sequentially in delivered order. Leaving
    /// the proximity area never un-promotes. Promoting a group stops
    /// its observation; promoting the last group closes the session.
    pub fn on_intersection(&mut self, tree: &mut DomTree, entries: &[IntersectionEntry]) {
        for entry in entries {
            // The session may have closed itself earlier in this batch.
            let State::Active(session) = &mut self.state else {
                return;
            };
            if !entry.is_intersecting {
                continue;
            }
            let Some(index) = session
                .tracked
                .iter()
                .position(|group| group.primary == entry.target)
            else {
                // Already promoted and evicted, or never ours.
                continue;
            };

            let group = session.tracked.remove(index);
            session.observer.unobserve(group.primary);
            promote_group(tree, &group);

            if session.tracked.is_empty() {
                // Release the primitive without waiting for detach.
                self.detach();
            }
        }
    }

    /// Close the session and drop all element references.
    ///
    /// Unconditional and idempotent: safe from `Idle`, safe to call
    /// twice, releases the observation handle however many groups
    /// remain unpromoted.
    pub fn detach(&mut self) {
        if let State::Active(mut session) = std::mem::replace(&mut self.state, State::Idle) {
            session.observer.disconnect();
            tracing::debug!(
                "tracking session closed, {} group(s) released",
                session.tracked.len()
            );
        }
    }
}

impl Default for LazyMediaLoader {
    fn default() -> Self {
        Self::new()
    }
}
