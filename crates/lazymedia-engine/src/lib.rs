//! lazymedia Engine - visibility-triggered attribute promotion
//!
//! Media elements keep their resource locators in inert `data-*`
//! attributes until they approach the viewport. When an element's
//! visibility transition fires, its deferred attributes are promoted to
//! the live ones and the platform's native loading takes over.
//!
//! # Example
//! ```rust,ignore
//! use lazymedia_engine::{GeometryHost, LazyMediaLoader, Rect, Viewport};
//!
//! let mut host = GeometryHost::new(Viewport::new(1280.0, 720.0));
//! let mut loader = LazyMediaLoader::new();
//! loader.attach(doc.tree_mut(), container, 200, &host);
//!
//! // After every layout/scroll tick:
//! host.set_rect(image, Rect::new(0.0, 2400.0, 640.0, 480.0));
//! let entries = host.sweep();
//! loader.on_intersection(doc.tree_mut(), &entries);
//! ```

mod config;
mod observer;
mod promote;
mod scan;
mod tracker;
mod viewport;

pub use config::{MarginBox, ProximityConfig};
pub use observer::{IntersectionEntry, ObserverFactory, UnsupportedHost, ViewportObserver};
pub use promote::{has_deferred_attributes, promote_element, promote_group};
pub use scan::{scan_container, MediaGroup};
pub use tracker::LazyMediaLoader;
pub use viewport::{GeometryHost, GeometryObserver, Rect, Viewport};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
