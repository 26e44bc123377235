//! Section lifecycle
//!
//! A `Section` groups the controllers belonging to one region of the page
//! and owns their lifetime. Sections keep their own target registry; there
//! is no shared registry across sections, so tearing one down cannot affect
//! another's animations.
//!
//! Unmounting (or dropping) a section cancels every in-flight animation and
//! detaches every live observer its controllers hold, so no callback can
//! mutate an element that no longer exists.

use inview_animation::SchedulerHandle;
use inview_core::{ElementRegistry, TargetRef, VisibilityObserver};

use crate::countup::CountUpController;
use crate::reveal::RevealController;

/// A page section owning its reveal and count-up controllers
pub struct Section {
    name: String,
    registry: ElementRegistry,
    reveals: Vec<RevealController>,
    counters: Vec<CountUpController>,
    mounted: bool,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: ElementRegistry::new(),
            reveals: Vec::new(),
            counters: Vec::new(),
            mounted: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// This section's private target registry
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Register a target under an ID for later lookup
    pub fn add_target(&self, id: impl Into<String>, target: TargetRef) {
        self.registry.register(id, target);
    }

    /// Add a reveal controller (builder style)
    pub fn with_reveal(mut self, controller: RevealController) -> Self {
        self.reveals.push(controller);
        self
    }

    /// Add a count-up controller (builder style)
    pub fn with_count_up(mut self, controller: CountUpController) -> Self {
        self.counters.push(controller);
        self
    }

    /// Add a reveal controller
    pub fn add_reveal(&mut self, controller: RevealController) {
        self.reveals.push(controller);
    }

    /// Add a count-up controller
    pub fn add_count_up(&mut self, controller: CountUpController) {
        self.counters.push(controller);
    }

    /// Mount every controller: apply hidden states and arm observation
    pub fn mount(&mut self, observer: &dyn VisibilityObserver, scheduler: &SchedulerHandle) {
        if self.mounted {
            tracing::debug!(section = %self.name, "section already mounted");
            return;
        }
        self.mounted = true;

        for reveal in &mut self.reveals {
            reveal.mount(observer, scheduler);
        }
        for counter in &mut self.counters {
            counter.mount(observer, scheduler);
        }
        tracing::debug!(
            section = %self.name,
            reveals = self.reveals.len(),
            counters = self.counters.len(),
            "section mounted"
        );
    }

    /// Tear every controller down, cancelling in-flight animations
    ///
    /// Idempotent; also runs on drop.
    pub fn unmount(&mut self) {
        for reveal in &mut self.reveals {
            reveal.unmount();
        }
        for counter in &mut self.counters {
            counter.unmount();
        }
        self.registry.clear();
        if self.mounted {
            self.mounted = false;
            tracing::debug!(section = %self.name, "section unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl Drop for Section {
    fn drop(&mut self) {
        self.unmount();
    }
}
