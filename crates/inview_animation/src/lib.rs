//! inview Animation System
//!
//! Easing, tweens, stagger timing, and the cooperative frame scheduler.
//!
//! # Features
//!
//! - **Easing**: linear, sine, quadratic, and cubic curves with exact
//!   endpoints
//! - **Tweens**: timed single-track interpolation with delay support and
//!   terminal-value exactness
//! - **Stagger**: per-index delay computation for group animations
//! - **Scheduler**: host-driven `tick(dt_ms)` loop with weak handles and
//!   per-frame callbacks; idempotent global installation

pub mod easing;
pub mod scheduler;
pub mod stagger;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{
    install_global_scheduler, is_scheduler_installed, try_global_scheduler, AnimationScheduler,
    SchedulerHandle, TickCallback, TickCallbackId, TweenId,
};
pub use stagger::{StaggerConfig, StaggerDirection};
pub use tween::Tween;
