//! inview Reveal Engine
//!
//! Scroll-triggered reveal and count-up animations for sectioned pages.
//!
//! # Features
//!
//! - **RevealController**: one-shot fade/rise transitions for single
//!   elements or staggered groups
//! - **CountUpController**: integer count-up displays with exact terminal
//!   values and plain or grouped formatting
//! - **Section**: per-section controller ownership with cancelling teardown
//! - **ScrollRevealEngine**: one scheduler + one viewport observer behind a
//!   three-call host surface (scroll, frame, mount)
//!
//! # Example
//!
//! ```rust
//! use inview_core::{ElementBounds, TargetRef};
//! use inview_reveal::{
//!     CountUpConfig, CountUpController, RevealConfig, RevealController, ScrollRevealEngine,
//!     Section,
//! };
//!
//! let engine = ScrollRevealEngine::new(900.0);
//!
//! let heading = TargetRef::new().with_id("impact-heading");
//! heading.attach(ElementBounds::new(0.0, 1800.0, 800.0, 120.0));
//! let stat = TargetRef::new().with_id("stat-children").with_text("0");
//! stat.attach(ElementBounds::new(0.0, 2000.0, 120.0, 48.0));
//!
//! let mut section = Section::new("impact")
//!     .with_reveal(RevealController::single(heading, RevealConfig::fade_up()))
//!     .with_count_up(CountUpController::new(stat.clone(), CountUpConfig::new(2000).grouped()));
//! engine.mount_section(&mut section);
//!
//! // Host frame loop: forward scroll, then advance time.
//! engine.set_scroll_y(1400.0);
//! while engine.frame(16.0) {}
//!
//! assert_eq!(stat.text(), Some("2,000".to_string()));
//! ```

pub mod countup;
pub mod engine;
pub mod format;
pub mod reveal;
pub mod section;

pub use countup::{CountUpConfig, CountUpController};
pub use engine::ScrollRevealEngine;
pub use format::{group_digits, NumberFormat};
pub use reveal::{RevealConfig, RevealController, RevealFrom};
pub use section::Section;

// Re-export the pieces hosts need without importing the lower crates.
pub use inview_animation::{Easing, SchedulerHandle, StaggerConfig, StaggerDirection};
pub use inview_core::{ElementBounds, ScrollViewport, TargetRef, VisibilityObserver, VisualStyle};
