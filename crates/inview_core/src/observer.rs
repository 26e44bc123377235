//! Visibility observation capability
//!
//! The engine never talks to a platform's intersection primitive directly.
//! Controllers arm watchers through the `VisibilityObserver` trait and hold
//! the returned `Subscription` for the lifetime of the animation; whatever
//! backs the observer (the scroll-position viewport in this workspace, a
//! native intersection API elsewhere) dispatches the fire callback on the
//! rendering thread.
//!
//! Every watcher is one-shot: once fired, observation is released and no
//! further callbacks can arrive for that subscription.

use std::sync::{Arc, Mutex, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::target::TargetRef;

/// Callback invoked when a watched element crosses its threshold
pub type FireCallback = Arc<dyn Fn() + Send + Sync>;

new_key_type! {
    /// Handle to a registered visibility watcher
    pub struct WatcherId;
}

/// Lifecycle of a tracked element
///
/// Idle → Armed happens synchronously while arming. Armed → Fired happens
/// during observer evaluation; the watcher is released immediately after,
/// so Fired is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerState {
    /// Constructed, not yet registered with an observer
    #[default]
    Idle,
    /// Registered, waiting for the threshold crossing
    Armed,
    /// Threshold crossed; callback dispatched, observation released
    Fired,
}

/// A registered watcher awaiting its threshold crossing
pub(crate) struct Watcher {
    pub(crate) target: TargetRef,
    /// Viewport-height fraction at which the target's top edge triggers
    pub(crate) threshold: f32,
    pub(crate) state: TriggerState,
    pub(crate) on_enter: FireCallback,
}

/// Shared watcher storage, owned by the observer and weakly referenced by
/// outstanding subscriptions
pub(crate) type SharedWatchers = Arc<Mutex<SlotMap<WatcherId, Watcher>>>;

/// Handle to an armed watcher
///
/// Cancelling detaches observation so the callback can never fire for an
/// unmounted target. Cancel is idempotent and also runs on drop.
pub struct Subscription {
    id: WatcherId,
    watchers: Weak<Mutex<SlotMap<WatcherId, Watcher>>>,
}

impl Subscription {
    pub(crate) fn new(id: WatcherId, watchers: &SharedWatchers) -> Self {
        Self {
            id,
            watchers: Arc::downgrade(watchers),
        }
    }

    /// Detach observation
    ///
    /// Safe to call repeatedly, after the watcher has fired, or after the
    /// observer itself has been dropped.
    pub fn cancel(&self) {
        if let Some(watchers) = self.watchers.upgrade() {
            if let Ok(mut map) = watchers.lock() {
                map.remove(self.id);
            }
        }
    }

    /// Check whether the watcher is still armed
    ///
    /// Returns `false` once the watcher has fired or been cancelled, or if
    /// the observer is gone.
    pub fn is_active(&self) -> bool {
        self.watchers
            .upgrade()
            .and_then(|watchers| watchers.lock().ok().map(|map| map.contains_key(self.id)))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Capability for viewport-intersection observation
///
/// Implementations deliver fire callbacks on the rendering thread, at most
/// once per armed watcher.
pub trait VisibilityObserver {
    /// Arm a one-shot watcher on `target`
    ///
    /// `threshold` is the viewport-height fraction the target's top edge
    /// must cross (0.85 means "top of element reaches 85% down the
    /// viewport"). Returns `None` when the target is not attached - a
    /// missing element is not a failure, the caller simply skips animation
    /// and the content stays in its default visible state.
    fn arm(&self, target: &TargetRef, threshold: f32, on_enter: FireCallback)
        -> Option<Subscription>;
}
