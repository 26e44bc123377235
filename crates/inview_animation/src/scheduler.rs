//! Animation scheduler
//!
//! Manages all active tweens and advances them each frame. The scheduler is
//! cooperative and host-driven: nothing progresses until the rendering host
//! calls `tick(dt_ms)`, and all work inside a tick runs on the caller's
//! thread. Controllers register tweens and per-frame callbacks through a
//! weak `SchedulerHandle`, so a dropped scheduler degrades every handle
//! operation to a no-op instead of an error.
//!
//! Tweens are only removed when their owning controller removes them (or is
//! dropped); finishing a tween leaves it in place so late samples still read
//! the exact terminal value.

use std::sync::{Arc, Mutex, OnceLock, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::tween::Tween;

// ============================================================================
// Global Scheduler Installation
// ============================================================================

/// Process-wide scheduler handle for hosts that want ambient access
static GLOBAL_SCHEDULER: OnceLock<SchedulerHandle> = OnceLock::new();

/// Install the global scheduler handle
///
/// Installation is idempotent: the first call wins and later calls are
/// ignored, so repeated host initialization cannot double-register the
/// animation plumbing. Returns `true` if this call performed the
/// installation.
pub fn install_global_scheduler(handle: SchedulerHandle) -> bool {
    let installed = GLOBAL_SCHEDULER.set(handle).is_ok();
    if !installed {
        tracing::debug!("global animation scheduler already installed; ignoring");
    }
    installed
}

/// Get the global scheduler handle, if installed
pub fn try_global_scheduler() -> Option<SchedulerHandle> {
    GLOBAL_SCHEDULER.get().cloned()
}

/// Check if the global scheduler has been installed
pub fn is_scheduler_installed() -> bool {
    GLOBAL_SCHEDULER.get().is_some()
}

new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
    /// Handle to a registered per-frame callback
    pub struct TickCallbackId;
}

/// Per-frame callback run after tweens advance
///
/// Receives the frame's delta time in milliseconds. Returning `false`
/// unregisters the callback; returning `true` keeps it for the next frame.
pub type TickCallback = Arc<dyn Fn(f32) -> bool + Send + Sync>;

/// Internal state of the animation scheduler
struct SchedulerInner {
    tweens: SlotMap<TweenId, Tween>,
    callbacks: SlotMap<TickCallbackId, TickCallback>,
}

/// The animation scheduler that ticks all active tweens
///
/// Typically owned by the engine facade and shared via `SchedulerHandle`.
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                callbacks: SlotMap::with_key(),
            })),
        }
    }

    /// Get a weak handle for passing to controllers
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance all tweens by `dt_ms`, then run per-frame callbacks
    ///
    /// Callbacks run outside the scheduler lock, so they are free to sample
    /// tween values, register new work, or unregister themselves via a
    /// handle. Returns true if anything still needs another frame.
    pub fn tick(&self, dt_ms: f32) -> bool {
        let pending: Vec<(TickCallbackId, TickCallback)> = {
            let Ok(mut inner) = self.inner.lock() else {
                return false;
            };

            for (_, tween) in inner.tweens.iter_mut() {
                tween.tick(dt_ms);
            }

            inner
                .callbacks
                .iter()
                .map(|(id, cb)| (id, Arc::clone(cb)))
                .collect()
        };

        let mut done: Vec<TickCallbackId> = Vec::new();
        for (id, callback) in &pending {
            if !callback(dt_ms) {
                done.push(*id);
            }
        }

        if let Ok(mut inner) = self.inner.lock() {
            for id in done {
                inner.callbacks.remove(id);
            }
            inner.tweens.iter().any(|(_, t)| t.is_playing()) || !inner.callbacks.is_empty()
        } else {
            false
        }
    }

    /// Check if any tweens are still playing
    pub fn has_active_animations(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.tweens.iter().any(|(_, t)| t.is_playing()))
            .unwrap_or(false)
    }

    /// Get the number of registered tweens
    pub fn tween_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.tweens.len()).unwrap_or(0)
    }

    /// Get the number of registered per-frame callbacks
    pub fn callback_count(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.callbacks.len())
            .unwrap_or(0)
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// Passed to controllers that need to register tweens and callbacks.
/// It won't prevent the scheduler from being dropped; every operation on a
/// dead scheduler quietly no-ops.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    // =========================================================================
    // Tween Operations
    // =========================================================================

    /// Register a tween and return its ID
    pub fn register_tween(&self, tween: Tween) -> Option<TweenId> {
        self.inner
            .upgrade()
            .and_then(|inner| Some(inner.lock().ok()?.tweens.insert(tween)))
    }

    /// Get the current value of a tween
    pub fn tween_value(&self, id: TweenId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().ok()?.tweens.get(id).map(|t| t.value()))
    }

    /// Check if a tween is still playing
    pub fn is_tween_playing(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().ok()?.tweens.get(id).map(|t| t.is_playing()))
            .unwrap_or(false)
    }

    /// Check if a tween ran to completion
    pub fn is_tween_finished(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().ok()?.tweens.get(id).map(|t| t.is_finished()))
            .unwrap_or(false)
    }

    /// Start a registered tween from the beginning
    pub fn start_tween(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Ok(mut inner) = inner.lock() {
                if let Some(tween) = inner.tweens.get_mut(id) {
                    tween.start();
                }
            }
        }
    }

    /// Remove a tween
    pub fn remove_tween(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Ok(mut inner) = inner.lock() {
                inner.tweens.remove(id);
            }
        }
    }

    // =========================================================================
    // Per-frame Callbacks
    // =========================================================================

    /// Register a per-frame callback, run after tweens advance each tick
    pub fn add_tick_callback(&self, callback: TickCallback) -> Option<TickCallbackId> {
        self.inner
            .upgrade()
            .and_then(|inner| Some(inner.lock().ok()?.callbacks.insert(callback)))
    }

    /// Remove a per-frame callback
    pub fn remove_tick_callback(&self, id: TickCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Ok(mut inner) = inner.lock() {
                inner.callbacks.remove(id);
            }
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
