//! Reveal controller
//!
//! Fades an element (or a container's selected children) from a hidden
//! offset state to its resting state once it scrolls into view. Group
//! reveals stagger their children so a grid of cards arrives in sequence
//! rather than as a block.
//!
//! The transition fires exactly once per mounted controller: the armed
//! watcher is released the moment it fires, and scrolling away and back
//! cannot re-trigger or reverse it.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut reveal = RevealController::group(cards, "stat", RevealConfig::fade_up_stats());
//! reveal.mount(&viewport, &scheduler.handle());
//!
//! // Host frame loop:
//! viewport.set_scroll_y(scroll_y);
//! scheduler.tick(dt_ms);
//! ```

use std::sync::{Arc, Mutex};

use inview_animation::{Easing, SchedulerHandle, StaggerConfig, TickCallbackId, Tween, TweenId};
use inview_core::{FireCallback, Subscription, TargetRef, VisibilityObserver, VisualStyle};

/// Hidden starting state applied to every revealed child at mount
#[derive(Clone, Copy, Debug)]
pub struct RevealFrom {
    pub opacity: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Default for RevealFrom {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            translate_y: 30.0,
            scale: 1.0,
        }
    }
}

/// Configuration for a reveal transition
#[derive(Clone, Copy, Debug)]
pub struct RevealConfig {
    /// Starting visual state
    pub from: RevealFrom,
    /// Transition duration in milliseconds
    pub duration_ms: u32,
    /// Easing curve for every animated track
    pub easing: Easing,
    /// Viewport-height fraction that triggers the reveal
    pub threshold: f32,
    /// Per-child delay for group reveals
    pub stagger: Option<StaggerConfig>,
}

impl RevealConfig {
    /// Single-element fade: 30px rise over 0.8s, triggered at 85%
    pub fn fade_up() -> Self {
        Self {
            from: RevealFrom::default(),
            duration_ms: 800,
            easing: Easing::EaseOutCubic,
            threshold: 0.85,
            stagger: None,
        }
    }

    /// Group fade for lists: 40px rise over 0.6s with a 100ms stagger,
    /// triggered at 80%
    pub fn fade_up_group() -> Self {
        Self {
            from: RevealFrom {
                translate_y: 40.0,
                ..RevealFrom::default()
            },
            duration_ms: 600,
            easing: Easing::EaseOutCubic,
            threshold: 0.80,
            stagger: Some(StaggerConfig::new(100)),
        }
    }

    /// Stat-card grid: 50px rise over 0.8s with a 100ms stagger, triggered
    /// early at 60% so counters have room to run
    pub fn fade_up_stats() -> Self {
        Self {
            from: RevealFrom {
                translate_y: 50.0,
                ..RevealFrom::default()
            },
            duration_ms: 800,
            easing: Easing::EaseOutCubic,
            threshold: 0.60,
            stagger: Some(StaggerConfig::new(100)),
        }
    }

    /// Set the transition duration (builder style)
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the trigger threshold (builder style)
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the starting vertical offset (builder style)
    pub fn offset_y(mut self, translate_y: f32) -> Self {
        self.from.translate_y = translate_y;
        self
    }

    /// Set the stagger config (builder style)
    pub fn stagger(mut self, stagger: StaggerConfig) -> Self {
        self.stagger = Some(stagger);
        self
    }
}

/// What a reveal controller animates
enum RevealTarget {
    /// One element; it is also the trigger
    Single(TargetRef),
    /// A container's direct children matching `selector`; the container
    /// is the trigger
    Group {
        container: TargetRef,
        selector: String,
    },
}

/// Per-child animated tracks created when the trigger fires
struct ChildTracks {
    target: TargetRef,
    opacity: TweenId,
    offset: TweenId,
    scale: Option<TweenId>,
}

/// State shared between the controller and its fire/tick callbacks
#[derive(Default)]
struct RevealRuntime {
    fired: bool,
    tracks: Vec<ChildTracks>,
    tick_cb: Option<TickCallbackId>,
}

/// Reveals an element or a group of children on first viewport entry
pub struct RevealController {
    target: RevealTarget,
    config: RevealConfig,
    scheduler: Option<SchedulerHandle>,
    subscription: Option<Subscription>,
    runtime: Arc<Mutex<RevealRuntime>>,
}

impl RevealController {
    /// Reveal a single element
    pub fn single(target: TargetRef, config: RevealConfig) -> Self {
        Self {
            target: RevealTarget::Single(target),
            config,
            scheduler: None,
            subscription: None,
            runtime: Arc::new(Mutex::new(RevealRuntime::default())),
        }
    }

    /// Reveal the direct children of `container` carrying `selector`,
    /// staggered in render order
    pub fn group(container: TargetRef, selector: impl Into<String>, config: RevealConfig) -> Self {
        Self {
            target: RevealTarget::Group {
                container,
                selector: selector.into(),
            },
            config,
            scheduler: None,
            subscription: None,
            runtime: Arc::new(Mutex::new(RevealRuntime::default())),
        }
    }

    /// Arm observation and apply the hidden starting state
    ///
    /// A missing target (detached element, or a group selector matching
    /// nothing) makes the whole controller a no-op: no observer is created
    /// and the content keeps its default fully-visible state.
    pub fn mount(&mut self, observer: &dyn VisibilityObserver, scheduler: &SchedulerHandle) {
        if self.scheduler.is_some() {
            tracing::debug!("reveal controller already mounted");
            return;
        }

        let (trigger, children) = match &self.target {
            RevealTarget::Single(target) => {
                if !target.is_attached() {
                    tracing::debug!(target_id = ?target.id(), "reveal skipped: target missing");
                    return;
                }
                (target.clone(), vec![target.clone()])
            }
            RevealTarget::Group {
                container,
                selector,
            } => {
                if !container.is_attached() {
                    tracing::debug!(
                        container_id = ?container.id(),
                        "reveal skipped: container missing"
                    );
                    return;
                }
                let children = container.select_children(selector);
                if children.is_empty() {
                    tracing::debug!(
                        container_id = ?container.id(),
                        selector = %selector,
                        "reveal skipped: selector matched no children"
                    );
                    return;
                }
                (container.clone(), children)
            }
        };

        // Children start hidden; the trigger brings them to rest state.
        for child in &children {
            child.apply_style(VisualStyle {
                opacity: self.config.from.opacity,
                translate_y: self.config.from.translate_y,
                scale: self.config.from.scale,
            });
        }

        self.scheduler = Some(scheduler.clone());
        let on_enter = self.fire_callback(scheduler.clone(), children);
        self.subscription = observer.arm(&trigger, self.config.threshold, on_enter);
    }

    /// Build the one-shot fire callback that creates the animated tracks
    fn fire_callback(&self, handle: SchedulerHandle, children: Vec<TargetRef>) -> FireCallback {
        let runtime = Arc::clone(&self.runtime);
        let config = self.config;

        Arc::new(move || {
            let Ok(mut rt) = runtime.lock() else {
                return;
            };
            if rt.fired {
                return;
            }
            rt.fired = true;

            let total = children.len();
            for (index, child) in children.iter().enumerate() {
                let delay = config
                    .stagger
                    .map(|s| s.delay_for_index(index, total))
                    .unwrap_or(0);

                let mut opacity = Tween::new(config.from.opacity, 1.0, config.duration_ms)
                    .easing(config.easing)
                    .delay(delay);
                opacity.start();
                let mut offset = Tween::new(config.from.translate_y, 0.0, config.duration_ms)
                    .easing(config.easing)
                    .delay(delay);
                offset.start();

                let scale = if (config.from.scale - 1.0).abs() > f32::EPSILON {
                    let mut scale = Tween::new(config.from.scale, 1.0, config.duration_ms)
                        .easing(config.easing)
                        .delay(delay);
                    scale.start();
                    handle.register_tween(scale)
                } else {
                    None
                };

                let (Some(opacity), Some(offset)) =
                    (handle.register_tween(opacity), handle.register_tween(offset))
                else {
                    continue;
                };
                rt.tracks.push(ChildTracks {
                    target: child.clone(),
                    opacity,
                    offset,
                    scale,
                });
            }

            // Per-frame write-back; unregisters itself once every child has
            // settled at its rest state.
            let cb_runtime = Arc::clone(&runtime);
            let cb_handle = handle.clone();
            rt.tick_cb = handle.add_tick_callback(Arc::new(move |_dt| {
                let Ok(rt) = cb_runtime.lock() else {
                    return false;
                };
                let mut any_playing = false;
                for track in &rt.tracks {
                    if let Some(value) = cb_handle.tween_value(track.opacity) {
                        track.target.set_opacity(value);
                    }
                    if let Some(value) = cb_handle.tween_value(track.offset) {
                        track.target.set_translate_y(value);
                    }
                    if let Some(scale_id) = track.scale {
                        if let Some(value) = cb_handle.tween_value(scale_id) {
                            track.target.set_scale(value);
                        }
                    }
                    any_playing |= cb_handle.is_tween_playing(track.opacity)
                        || cb_handle.is_tween_playing(track.offset)
                        || track
                            .scale
                            .map(|id| cb_handle.is_tween_playing(id))
                            .unwrap_or(false);
                }
                any_playing
            }));
        })
    }

    /// Check whether the trigger has fired
    pub fn has_fired(&self) -> bool {
        self.runtime.lock().map(|rt| rt.fired).unwrap_or(false)
    }

    /// Check whether observation is currently armed
    pub fn is_armed(&self) -> bool {
        self.subscription
            .as_ref()
            .map(|sub| sub.is_active())
            .unwrap_or(false)
    }

    /// Cancel observation and any in-flight animation
    ///
    /// Idempotent; safe to call on a controller that never fired or was
    /// never mounted.
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
                for track in rt.tracks.drain(..) {
                    handle.remove_tween(track.opacity);
                    handle.remove_tween(track.offset);
                    if let Some(scale) = track.scale {
                        handle.remove_tween(scale);
                    }
                }
            } else {
                rt.tick_cb = None;
                rt.tracks.clear();
            }
        }
    }
}

impl Drop for RevealController {
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
        let target = TargetRef::new();
        target.attach(ElementBounds::new(0.0, y, 400.0, 200.0));
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
    fn test_single_reveal_runs_to_rest() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1500.0);

        let mut reveal = RevealController::single(target.clone(), RevealConfig::fade_up());
        reveal.mount(&viewport, &scheduler.handle());

        // Hidden at mount.
        assert_eq!(target.style().opacity, 0.0);
        assert_eq!(target.style().translate_y, 30.0);
        assert!(reveal.is_armed());
        assert!(!reveal.has_fired());

        viewport.set_scroll_y(1000.0);
        assert!(reveal.has_fired());

        drive(&scheduler, 900.0);
        assert_eq!(target.style().opacity, 1.0);
        assert_eq!(target.style().translate_y, 0.0);
    }

    #[test]
    fn test_fires_exactly_once() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1200.0);

        let mut reveal = RevealController::single(target.clone(), RevealConfig::fade_up());
        reveal.mount(&viewport, &scheduler.handle());

        viewport.set_scroll_y(1200.0);
        drive(&scheduler, 900.0);
        assert_eq!(target.style().opacity, 1.0);

        // Leave and re-enter several times; nothing restarts or reverses.
        for _ in 0..3 {
            viewport.set_scroll_y(0.0);
            viewport.set_scroll_y(1200.0);
        }
        drive(&scheduler, 100.0);
        assert_eq!(target.style().opacity, 1.0);
        assert_eq!(viewport.watcher_count(), 0);
    }

    #[test]
    fn test_missing_target_is_noop() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = TargetRef::new(); // never attached

        let mut reveal = RevealController::single(target.clone(), RevealConfig::fade_up());
        reveal.mount(&viewport, &scheduler.handle());

        assert_eq!(viewport.watcher_count(), 0);
        assert!(!reveal.is_armed());
        // Default markup stays fully visible.
        assert_eq!(target.style().opacity, 1.0);
    }

    #[test]
    fn test_empty_group_is_noop() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let container = attached(1200.0);
        container.push_child(TargetRef::new().with_class("other"));

        let mut reveal =
            RevealController::group(container, "card", RevealConfig::fade_up_group());
        reveal.mount(&viewport, &scheduler.handle());

        assert_eq!(viewport.watcher_count(), 0);
    }

    #[test]
    fn test_group_stagger_ordering() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();

        let container = attached(1200.0);
        let cards: Vec<TargetRef> = (0..3)
            .map(|i| {
                let card = TargetRef::new()
                    .with_id(format!("card-{i}"))
                    .with_class("card");
                container.push_child(card.clone());
                card
            })
            .collect();

        let config = RevealConfig::fade_up_group()
            .duration_ms(400)
            .stagger(StaggerConfig::new(100));
        let mut reveal = RevealController::group(container, "card", config);
        reveal.mount(&viewport, &scheduler.handle());

        viewport.set_scroll_y(1200.0);

        // 50ms in: only child 0 has started.
        scheduler.tick(50.0);
        assert!(cards[0].style().opacity > 0.0);
        assert_eq!(cards[1].style().opacity, 0.0);
        assert_eq!(cards[2].style().opacity, 0.0);

        // 150ms in: child 1 started, child 2 still waiting.
        scheduler.tick(100.0);
        assert!(cards[1].style().opacity > 0.0);
        assert_eq!(cards[2].style().opacity, 0.0);

        // 250ms in: all three running.
        scheduler.tick(100.0);
        assert!(cards[2].style().opacity > 0.0);

        // Run out; everyone lands exactly at rest.
        drive(&scheduler, 800.0);
        for card in &cards {
            assert_eq!(card.style().opacity, 1.0);
            assert_eq!(card.style().translate_y, 0.0);
        }
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1200.0);

        let mut reveal = RevealController::single(target, RevealConfig::fade_up());
        reveal.mount(&viewport, &scheduler.handle());

        // Twice, without ever firing.
        reveal.unmount();
        reveal.unmount();
        assert_eq!(viewport.watcher_count(), 0);
    }

    #[test]
    fn test_unmount_cancels_in_flight_animation() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1200.0);

        let mut reveal = RevealController::single(target.clone(), RevealConfig::fade_up());
        reveal.mount(&viewport, &scheduler.handle());

        viewport.set_scroll_y(1200.0);
        drive(&scheduler, 100.0);
        let mid_flight = target.style().opacity;
        assert!(mid_flight > 0.0 && mid_flight < 1.0);

        reveal.unmount();
        assert_eq!(scheduler.tween_count(), 0);
        assert_eq!(scheduler.callback_count(), 0);

        // Further frames no longer touch the target.
        drive(&scheduler, 500.0);
        assert_eq!(target.style().opacity, mid_flight);
    }

    #[test]
    fn test_drop_tears_down() {
        let viewport = ScrollViewport::new(1000.0);
        let scheduler = AnimationScheduler::new();
        let target = attached(1200.0);

        {
            let mut reveal = RevealController::single(target, RevealConfig::fade_up());
            reveal.mount(&viewport, &scheduler.handle());
            viewport.set_scroll_y(1200.0);
            scheduler.tick(50.0);
        }

        assert_eq!(viewport.watcher_count(), 0);
        assert_eq!(scheduler.tween_count(), 0);
        assert_eq!(scheduler.callback_count(), 0);
    }
}
