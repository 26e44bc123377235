//! inview Core Primitives
//!
//! This crate provides the host-boundary primitives for the inview engine:
//!
//! - **TargetRef**: ref-like handles to animatable elements
//! - **ElementRegistry**: per-section O(1) ID lookup
//! - **Viewport Model**: document-space bounds and scroll state
//! - **VisibilityObserver**: abstract arm/cancel intersection capability,
//!   with a scroll-position-driven implementation
//!
//! # Example
//!
//! ```rust
//! use inview_core::{ElementBounds, FireCallback, ScrollViewport, TargetRef, VisibilityObserver};
//! use std::sync::Arc;
//!
//! let viewport = ScrollViewport::new(900.0);
//!
//! let hero = TargetRef::new().with_id("hero");
//! hero.attach(ElementBounds::new(0.0, 1400.0, 800.0, 400.0));
//!
//! let on_enter: FireCallback = Arc::new(|| println!("hero entered"));
//! let _sub = viewport.arm(&hero, 0.85, on_enter);
//!
//! viewport.set_scroll_y(700.0); // fires once the top edge crosses 85%
//! ```

pub mod bounds;
pub mod observer;
pub mod registry;
pub mod target;
pub mod viewport;

pub use bounds::ElementBounds;
pub use observer::{FireCallback, Subscription, TriggerState, VisibilityObserver, WatcherId};
pub use registry::ElementRegistry;
pub use target::{SharedTargetInner, TargetRef, VisualStyle};
pub use viewport::{ScrollViewport, Viewport};
