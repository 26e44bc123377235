//! Easing functions
//!
//! Curves map normalized progress (0.0 to 1.0) to an eased factor. All
//! curves hit their endpoints exactly: `apply(0.0) == 0.0` and
//! `apply(1.0) == 1.0`, which terminal-value guarantees elsewhere rely on.

use std::f32::consts::PI;

/// Easing curve applied to normalized animation progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// Sine-based acceleration
    EaseIn,
    /// Sine-based deceleration
    EaseOut,
    /// Sine-based acceleration then deceleration
    EaseInOut,
    /// Quadratic acceleration
    EaseInQuad,
    /// Quadratic deceleration
    EaseOutQuad,
    /// Cubic acceleration
    EaseInCubic,
    /// Cubic deceleration
    EaseOutCubic,
}

impl Easing {
    /// Apply the curve to a progress value
    ///
    /// Input is clamped to [0.0, 1.0].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::EaseOut => (t * PI / 2.0).sin(),
            Easing::EaseInOut => -((t * PI).cos() - 1.0) / 2.0,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0", easing);
            assert!(
                (easing.apply(1.0) - 1.0).abs() < 1e-6,
                "{:?} at 1",
                easing
            );
        }
        // The curves used for terminal-exact writes must hit 1.0 precisely.
        assert_eq!(Easing::EaseOutQuad.apply(1.0), 1.0);
        assert_eq!(Easing::EaseOutCubic.apply(1.0), 1.0);
    }

    #[test]
    fn test_monotonic() {
        for easing in ALL {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(value >= prev - 1e-6, "{:?} not monotonic at {}", easing, i);
                prev = value;
            }
        }
    }

    #[test]
    fn test_ease_out_leads_linear() {
        // Deceleration curves cover more ground early than linear.
        for easing in [Easing::EaseOut, Easing::EaseOutQuad, Easing::EaseOutCubic] {
            assert!(easing.apply(0.3) > 0.3, "{:?}", easing);
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::EaseOutCubic.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
    }
}
