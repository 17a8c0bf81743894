//! Proximity Configuration
//!
//! How far outside the viewport an element may be while still counting
//! as "about to become visible".

use serde::{Deserialize, Serialize};

/// Per-edge margin in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginBox {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl MarginBox {
    /// Same margin on all four edges
    pub const fn uniform(px: f32) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

/// Tuning for a tracking session
///
/// Immutable once a session starts; re-attach to change it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityConfig {
    /// Margin added around the viewport when testing proximity
    pub margin: MarginBox,

    /// Intersection ratio that must be exceeded before an element
    /// counts as intersecting. 0.0 fires on any overlap.
    pub threshold: f64,
}

impl ProximityConfig {
    /// Uniform margin with the default threshold of 0
    pub fn with_margin(px: f32) -> Self {
        Self {
            margin: MarginBox::uniform(px),
            ..Default::default()
        }
    }
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            margin: MarginBox::default(),
            threshold: 0.0,
        }
    }
}

// Numeric shorthand of the attachment API: a bare number is a uniform
// pixel margin.
impl From<f32> for ProximityConfig {
    fn from(px: f32) -> Self {
        Self::with_margin(px)
    }
}

impl From<i32> for ProximityConfig {
    fn from(px: i32) -> Self {
        Self::with_margin(px as f32)
    }
}
