//! Scroll-position-driven visibility observer
//!
//! `ScrollViewport` is the concrete `VisibilityObserver` for hosts that
//! report a vertical scroll offset and a viewport height. Watchers fire when
//! the watched element's top edge rises above the configured fraction of the
//! viewport height:
//!
//! ```text
//! bounds.y - scroll_y <= threshold * viewport_height
//! ```
//!
//! Evaluation happens on `set_scroll_y` / `scroll_by` / `resize` /
//! `refresh`, always on the caller's thread. Fired watchers are released
//! before their callbacks run, so re-entrant arming or cancelling from
//! inside a callback is fine.

use std::sync::{Arc, Mutex};

use slotmap::SlotMap;

use crate::observer::{
    FireCallback, SharedWatchers, Subscription, TriggerState, VisibilityObserver, Watcher,
    WatcherId,
};
use crate::target::TargetRef;

/// Snapshot of the scrollable viewport
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Visible height in pixels
    pub height: f32,
    /// Current vertical scroll offset in document coordinates
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            scroll_y: 0.0,
        }
    }

    /// Document-space y of the trigger line for a threshold fraction
    pub fn threshold_line(&self, threshold: f32) -> f32 {
        self.scroll_y + self.height * threshold
    }
}

/// Scroll-driven visibility observer
pub struct ScrollViewport {
    viewport: Mutex<Viewport>,
    watchers: SharedWatchers,
}

impl ScrollViewport {
    /// Create an observer for a viewport of the given height, scrolled to top
    pub fn new(height: f32) -> Self {
        Self {
            viewport: Mutex::new(Viewport::new(height)),
            watchers: Arc::new(Mutex::new(SlotMap::with_key())),
        }
    }

    /// Get the current viewport snapshot
    pub fn viewport(&self) -> Viewport {
        self.viewport.lock().ok().map(|vp| *vp).unwrap_or_default()
    }

    /// Set the absolute scroll offset and evaluate watchers
    pub fn set_scroll_y(&self, scroll_y: f32) {
        if let Ok(mut vp) = self.viewport.lock() {
            vp.scroll_y = scroll_y;
        }
        self.evaluate();
    }

    /// Scroll by a relative amount and evaluate watchers
    pub fn scroll_by(&self, dy: f32) {
        if let Ok(mut vp) = self.viewport.lock() {
            vp.scroll_y += dy;
        }
        self.evaluate();
    }

    /// Update the viewport height and evaluate watchers
    pub fn resize(&self, height: f32) {
        if let Ok(mut vp) = self.viewport.lock() {
            vp.height = height;
        }
        self.evaluate();
    }

    /// Re-evaluate watchers without changing viewport state
    ///
    /// Call after mounting a section so elements already past their
    /// threshold fire without waiting for the next scroll event.
    pub fn refresh(&self) {
        self.evaluate();
    }

    /// Number of armed watchers
    pub fn watcher_count(&self) -> usize {
        self.watchers.lock().map(|map| map.len()).unwrap_or(0)
    }

    /// Evaluate all armed watchers against the current viewport
    ///
    /// Qualifying watchers transition Armed → Fired and are removed from
    /// the map before any callback runs: late evaluation passes cannot
    /// re-fire them, and callbacks run without holding the watcher lock.
    fn evaluate(&self) {
        let vp = self.viewport();

        let mut fired: Vec<(WatcherId, FireCallback)> = Vec::new();
        if let Ok(mut map) = self.watchers.lock() {
            for (id, watcher) in map.iter_mut() {
                if watcher.state != TriggerState::Armed {
                    continue;
                }
                // A watcher whose target detached mid-flight stays armed;
                // it can qualify again if the target re-attaches.
                let Some(bounds) = watcher.target.bounds() else {
                    continue;
                };
                if bounds.top() <= vp.threshold_line(watcher.threshold) {
                    watcher.state = TriggerState::Fired;
                    tracing::trace!(
                        target_id = ?watcher.target.id(),
                        threshold = watcher.threshold,
                        "visibility watcher fired"
                    );
                    fired.push((id, Arc::clone(&watcher.on_enter)));
                }
            }
            for (id, _) in &fired {
                map.remove(*id);
            }
        }

        for (_, on_enter) in fired {
            on_enter();
        }
    }
}

impl VisibilityObserver for ScrollViewport {
    fn arm(
        &self,
        target: &TargetRef,
        threshold: f32,
        on_enter: FireCallback,
    ) -> Option<Subscription> {
        if !target.is_attached() {
            tracing::debug!(
                target_id = ?target.id(),
                "arm skipped: target not attached"
            );
            return None;
        }

        let mut watcher = Watcher {
            target: target.clone(),
            threshold: threshold.clamp(0.0, 1.0),
            state: TriggerState::Idle,
            on_enter,
        };
        // Idle → Armed is synchronous with registration.
        watcher.state = TriggerState::Armed;

        let id = self.watchers.lock().ok()?.insert(watcher);
        Some(Subscription::new(id, &self.watchers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::ElementBounds;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn attached_target(y: f32) -> TargetRef {
        let target = TargetRef::new();
        target.attach(ElementBounds::new(0.0, y, 100.0, 100.0));
        target
    }

    fn counting_callback() -> (FireCallback, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let cb: FireCallback = Arc::new(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        (cb, count)
    }

    #[test]
    fn test_fires_when_threshold_crossed() {
        let viewport = ScrollViewport::new(1000.0);
        let target = attached_target(2000.0);
        let (cb, count) = counting_callback();

        let sub = viewport.arm(&target, 0.85, cb).unwrap();
        assert!(sub.is_active());

        // Threshold line at scroll 0 is 850; element top at 2000 - no fire.
        viewport.refresh();
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // Scroll until 2000 - scroll_y <= 850.
        viewport.set_scroll_y(1150.0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!sub.is_active());
    }

    #[test]
    fn test_one_shot_across_repeated_crossings() {
        let viewport = ScrollViewport::new(1000.0);
        let target = attached_target(1200.0);
        let (cb, count) = counting_callback();

        let _sub = viewport.arm(&target, 0.85, cb).unwrap();

        // Cross, scroll back out, cross again - several times.
        for _ in 0..4 {
            viewport.set_scroll_y(1200.0);
            viewport.set_scroll_y(0.0);
        }

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(viewport.watcher_count(), 0);
    }

    #[test]
    fn test_arm_unattached_target_is_noop() {
        let viewport = ScrollViewport::new(1000.0);
        let target = TargetRef::new();
        let (cb, count) = counting_callback();

        let sub = viewport.arm(&target, 0.85, cb);
        assert!(sub.is_none());
        assert_eq!(viewport.watcher_count(), 0);

        viewport.set_scroll_y(5000.0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let viewport = ScrollViewport::new(1000.0);
        let target = attached_target(1200.0);
        let (cb, count) = counting_callback();

        let sub = viewport.arm(&target, 0.85, cb).unwrap();
        sub.cancel();
        sub.cancel();
        assert!(!sub.is_active());
        assert_eq!(viewport.watcher_count(), 0);

        viewport.set_scroll_y(2000.0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_cancels() {
        let viewport = ScrollViewport::new(1000.0);
        let target = attached_target(1200.0);
        let (cb, count) = counting_callback();

        {
            let _sub = viewport.arm(&target, 0.85, cb).unwrap();
        }
        assert_eq!(viewport.watcher_count(), 0);

        viewport.set_scroll_y(2000.0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscription_outlives_observer() {
        let target = attached_target(1200.0);
        let (cb, _count) = counting_callback();

        let sub = {
            let viewport = ScrollViewport::new(1000.0);
            viewport.arm(&target, 0.85, cb).unwrap()
        };

        // Observer is gone; cancel must not panic.
        assert!(!sub.is_active());
        sub.cancel();
    }

    #[test]
    fn test_element_already_past_threshold_fires_on_refresh() {
        let viewport = ScrollViewport::new(1000.0);
        let target = attached_target(100.0);
        let (cb, count) = counting_callback();

        let _sub = viewport.arm(&target, 0.85, cb).unwrap();
        viewport.refresh();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resize_can_trigger() {
        let viewport = ScrollViewport::new(500.0);
        let target = attached_target(600.0);
        let (cb, count) = counting_callback();

        let _sub = viewport.arm(&target, 0.85, cb).unwrap();
        viewport.refresh();
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // Taller viewport moves the threshold line past the element.
        viewport.resize(800.0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_detached_target_does_not_fire() {
        let viewport = ScrollViewport::new(1000.0);
        let target = attached_target(1200.0);
        let (cb, count) = counting_callback();

        let sub = viewport.arm(&target, 0.85, cb).unwrap();
        target.detach();

        viewport.set_scroll_y(2000.0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        // Still armed; re-attach and it can fire.
        assert!(sub.is_active());

        target.attach(ElementBounds::new(0.0, 1200.0, 100.0, 100.0));
        viewport.refresh();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
