//! Count-up controller
//!
//! Animates a displayed integer from 0 to a target value when its element
//! first becomes visible, overwriting the element's text content on every
//! animation frame with the floored interpolated value. The terminal frame
//! always writes the exact end value, never a floored near-miss.
//!
//! Re-entry is guarded twice: the visibility watcher is one-shot, and the
//! controller keeps its own `has_animated` flag so a second crossing can
//! neither restart nor stack a second animation.

use std::sync::{Arc, Mutex};

use inview_animation::{Easing, SchedulerHandle, TickCallbackId, Tween, TweenId};
use inview_core::{FireCallback, Subscription, TargetRef, VisibilityObserver};

use crate::format::NumberFormat;

/// Configuration for a count-up animation
#[derive(Clone, Copy, Debug)]
pub struct CountUpConfig {
    /// Final displayed value
    pub end: u64,
    /// Animation duration in milliseconds
    pub duration_ms: u32,
    /// Easing curve for the interpolation
    pub easing: Easing,
    /// Viewport-height fraction that starts the count
    pub threshold: f32,
    /// Presentation mode for the displayed integer
    pub format: NumberFormat,
}

impl CountUpConfig {
    /// Count to `end` over 2 seconds with a quadratic ease-out, triggered
    /// at 85%, rendered as plain digits
    pub fn new(end: u64) -> Self {
        Self {
            end,
            duration_ms: 2000,
            easing: Easing::EaseOutQuad,
            threshold: 0.85,
            format: NumberFormat::Plain,
        }
    }

    /// Set the duration (builder style)
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the trigger threshold (builder style)
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Render with thousands separators (builder style)
    pub fn grouped(mut self) -> Self {
        self.format = NumberFormat::Grouped;
        self
    }

    /// Set the presentation mode (builder style)
    pub fn format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }
}

/// State shared between the controller and its fire/tick callbacks
#[derive(Default)]
struct CountUpRuntime {
    /// One-shot guard, local to this controller instance
    has_animated: bool,
    tween: Option<TweenId>,
    tick_cb: Option<TickCallbackId>,
}

/// Animates a displayed integer from 0 to a target value on first
/// visibility
pub struct CountUpController {
    target: TargetRef,
    config: CountUpConfig,
    scheduler: Option<SchedulerHandle>,
    subscription: Option<Subscription>,
    runtime: Arc<Mutex<CountUpRuntime>>,
}

impl CountUpController {
    pub fn new(target: TargetRef, config: CountUpConfig) -> Self {
        Self {
            target,
            config,
            scheduler: None,
            subscription: None,
            runtime: Arc::new(Mutex::new(CountUpRuntime::default())),
        }
    }

    /// Arm observation on the bound element
    ///
    /// A missing target makes the controller a no-op: no observer is
    /// created and the element's text is never touched.
    pub fn mount(&mut self, observer: &dyn VisibilityObserver, scheduler: &SchedulerHandle) {
        if self.scheduler.is_some() {
            tracing::debug!("count-up controller already mounted");
            return;
        }
        if !self.target.is_attached() {
            tracing::debug!(target_id = ?self.target.id(), "count-up skipped: target missing");
            return;
        }

        self.scheduler = Some(scheduler.clone());
        let on_enter = self.fire_callback(scheduler.clone());
        self.subscription = observer.arm(&self.target, self.config.threshold, on_enter);
    }

    /// Build the one-shot fire callback that starts the interpolation
    fn fire_callback(&self, handle: SchedulerHandle) -> FireCallback {
        let runtime = Arc::clone(&self.runtime);
        let target = self.target.clone();
        let config = self.config;

        Arc::new(move || {
            let Ok(mut rt) = runtime.lock() else {
                return;
            };
            if rt.has_animated {
                return;
            }
            rt.has_animated = true;

            let mut tween =
                Tween::new(0.0, config.end as f32, config.duration_ms).easing(config.easing);
            tween.start();
            let Some(tween_id) = handle.register_tween(tween) else {
                return;
            };
            rt.tween = Some(tween_id);

            let cb_target = target.clone();
            let cb_handle = handle.clone();
            rt.tick_cb = handle.add_tick_callback(Arc::new(move |_dt| {
                let finished = cb_handle.is_tween_finished(tween_id);
                let shown = if finished {
                    // Land exactly on the target value; flooring the eased
                    // interpolation here could undershoot by one.
                    config.end
                } else {
                    match cb_handle.tween_value(tween_id) {
                        Some(value) => value.floor() as u64,
                        None => return false,
                    }
                };
                cb_target.set_text(config.format.format(shown));
                !finished
            }));
        })
    }

    /// Check whether the count has started (one-shot guard)
    pub fn has_animated(&self) -> bool {
        self.runtime
            .lock()
            .map(|rt| rt.has_animated)
            .unwrap_or(false)
    }

    /// Check whether observation is currently armed
    pub fn is_armed(&self) -> bool {
        self.subscription
            .as_ref()
            .map(|sub| sub.is_active())
            .unwrap_or(false)
    }

    /// Cancel observation and any in-flight count
    ///
    /// Idempotent; safe on a controller that never fired or was never
    /// mounted.
    pub fn unmount(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.cancel();
        }

        let scheduler = self.scheduler.take();
        if let Ok(mut rt) = self.runtime.lock() {
            if let Some(handle) = scheduler {
                if let Some(cb) = rt.tick_cb.take() {
                    handle.remove_tick_callback(cb);
                }
                if let Some(tween) = rt.tween.take() {
                    handle.remove_tween(tween);
                }
            } else {
                rt.tick_cb = None;
                rt.tween = None;
            }
        }
    }
}

impl Drop for CountUpController {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inview_animation::AnimationScheduler;
    use inview_core::{ElementBounds, ScrollViewport};

    fn attached(y: f32) -> TargetRef {
        let target = TargetRef::new().with_text("0");
        target.attach(ElementBounds::new(0.0, y, 120.0, 48.0));
        target
    }

    fn drive(scheduler: &AnimationScheduler, ms: f32) {
        let mut remaining = ms;
        while remaining > 0.0 {
            scheduler.tick(16.0_f32.min(remaining));
            remaining -= 16.0;
        }
    }

    #[test]
    fn test_no_text_change_before_trigger() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(3000.0);

        let mut counter = CountUpController::new(target.clone(), CountUpConfig::new(2000));
        counter.mount(&viewport, &scheduler.handle());

        drive(&scheduler, 500.0);
        assert_eq!(target.text(), Some("0".to_string()));
        assert!(!counter.has_animated());
    }

    #[test]
    fn test_terminal_value_is_exact() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1200.0);

        let mut counter = CountUpController::new(target.clone(), CountUpConfig::new(2000));
        counter.mount(&viewport, &scheduler.handle());

        viewport.set_scroll_y(1200.0);
        assert!(counter.has_animated());

        drive(&scheduler, 2100.0);
        assert_eq!(target.text(), Some("2000".to_string()));
    }

    #[test]
    fn test_display_is_monotonic() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1200.0);

        let mut counter = CountUpController::new(target.clone(), CountUpConfig::new(2000));
        counter.mount(&viewport, &scheduler.handle());
        viewport.set_scroll_y(1200.0);

        let mut prev = 0u64;
        for _ in 0..140 {
            scheduler.tick(16.0);
            let shown: u64 = target.text().unwrap().parse().unwrap();
            assert!(shown >= prev);
            prev = shown;
        }
        assert_eq!(prev, 2000);
    }

    #[test]
    fn test_second_crossing_does_not_restart() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1200.0);

        let mut counter = CountUpController::new(target.clone(), CountUpConfig::new(2000));
        counter.mount(&viewport, &scheduler.handle());

        viewport.set_scroll_y(1200.0);
        drive(&scheduler, 2100.0);
        assert_eq!(target.text(), Some("2000".to_string()));

        // Scroll far away and back across the threshold.
        viewport.set_scroll_y(0.0);
        viewport.set_scroll_y(1200.0);
        drive(&scheduler, 500.0);

        assert_eq!(target.text(), Some("2000".to_string()));
        assert_eq!(scheduler.callback_count(), 0);
    }

    #[test]
    fn test_grouped_display() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1200.0);

        let config = CountUpConfig::new(12345).grouped();
        let mut counter = CountUpController::new(target.clone(), config);
        counter.mount(&viewport, &scheduler.handle());

        viewport.set_scroll_y(1200.0);
        drive(&scheduler, 2100.0);
        assert_eq!(target.text(), Some("12,345".to_string()));
    }

    #[test]
    fn test_missing_target_is_noop() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = TargetRef::new(); // never attached

        let mut counter = CountUpController::new(target.clone(), CountUpConfig::new(2000));
        counter.mount(&viewport, &scheduler.handle());

        assert_eq!(viewport.watcher_count(), 0);
        viewport.set_scroll_y(5000.0);
        drive(&scheduler, 500.0);
        assert_eq!(target.text(), None);
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1200.0);

        let mut counter = CountUpController::new(target, CountUpConfig::new(100));
        counter.mount(&viewport, &scheduler.handle());

        counter.unmount();
        counter.unmount();
        assert_eq!(viewport.watcher_count(), 0);
    }

    #[test]
    fn test_unmount_cancels_mid_count() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1200.0);

        let mut counter = CountUpController::new(target.clone(), CountUpConfig::new(2000));
        counter.mount(&viewport, &scheduler.handle());
        viewport.set_scroll_y(1200.0);
        drive(&scheduler, 300.0);

        let frozen = target.text();
        counter.unmount();
        assert_eq!(scheduler.tween_count(), 0);
        assert_eq!(scheduler.callback_count(), 0);

        drive(&scheduler, 1000.0);
        assert_eq!(target.text(), frozen);
    }
}
