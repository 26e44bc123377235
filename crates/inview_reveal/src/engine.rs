//! Engine facade
//!
//! `ScrollRevealEngine` ties one scheduler to one viewport observer and
//! gives the host a three-call surface: forward scroll events, drive a
//! frame, mount sections. Everything else happens through the controllers.
//!
//! The engine is single-threaded and cooperative: scroll forwarding
//! evaluates watchers on the caller's thread, and `frame(dt_ms)` advances
//! every animation exactly as far as the host says time has passed.

use inview_animation::{install_global_scheduler, AnimationScheduler, SchedulerHandle};
use inview_core::ScrollViewport;

use crate::section::Section;

/// Scroll-triggered animation engine for a page of sections
pub struct ScrollRevealEngine {
    scheduler: AnimationScheduler,
    viewport: ScrollViewport,
}

impl ScrollRevealEngine {
    /// Create an engine for a viewport of the given height, scrolled to top
    pub fn new(viewport_height: f32) -> Self {
        Self {
            scheduler: AnimationScheduler::new(),
            viewport: ScrollViewport::new(viewport_height),
        }
    }

    /// Get a weak handle to the engine's scheduler
    pub fn scheduler_handle(&self) -> SchedulerHandle {
        self.scheduler.handle()
    }

    /// Get the engine's viewport observer
    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }

    /// Install this engine's scheduler as the process-wide default
    ///
    /// Idempotent: a second engine installing over the first is ignored, so
    /// repeated host initialization cannot duplicate animation plumbing.
    /// Returns `true` if this call performed the installation.
    pub fn install_global(&self) -> bool {
        install_global_scheduler(self.scheduler.handle())
    }

    /// Mount a section and evaluate watchers once
    ///
    /// The immediate evaluation lets elements already past their threshold
    /// fire without waiting for the next scroll event.
    pub fn mount_section(&self, section: &mut Section) {
        section.mount(&self.viewport, &self.scheduler.handle());
        self.viewport.refresh();
    }

    // =========================================================================
    // Host event forwarding
    // =========================================================================

    /// Set the absolute scroll offset
    pub fn set_scroll_y(&self, scroll_y: f32) {
        self.viewport.set_scroll_y(scroll_y);
    }

    /// Scroll by a relative amount
    pub fn scroll_by(&self, dy: f32) {
        self.viewport.scroll_by(dy);
    }

    /// Update the viewport height
    pub fn resize(&self, height: f32) {
        self.viewport.resize(height);
    }

    /// Advance all animations by `dt_ms`
    ///
    /// Returns true while anything still needs another frame, so hosts can
    /// stop scheduling frames once the page has settled.
    pub fn frame(&self, dt_ms: f32) -> bool {
        self.scheduler.tick(dt_ms)
    }
}
