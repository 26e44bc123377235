//! Stagger timing for group animations

/// Direction for stagger animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    /// Animate first to last
    #[default]
    Forward,
    /// Animate last to first
    Reverse,
    /// Animate from center outward
    FromCenter,
}

/// Per-child delay configuration for a group animation
///
/// Children of a group do not all start at once: child `i` starts
/// `delay_for_index(i, total)` after the group's trigger fires, so a list
/// reveals in sequence rather than as a block.
#[derive(Clone, Copy, Debug)]
pub struct StaggerConfig {
    /// Delay between each child's animation start (ms)
    pub interval_ms: u32,
    /// Direction of stagger
    pub direction: StaggerDirection,
    /// Optional: cap the effective index so long lists saturate
    pub limit: Option<usize>,
}

impl StaggerConfig {
    /// Create a forward stagger with the given interval between items
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    /// Stagger from last to first
    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Stagger from center outward
    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    /// Cap the stagger at the first N steps
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Calculate the start delay for a specific child index
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let effective_index = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => {
                let center = total / 2;
                if index <= center {
                    center - index
                } else {
                    index - center
                }
            }
        };

        let capped_index = if let Some(limit) = self.limit {
            effective_index.min(limit)
        } else {
            effective_index
        };

        self.interval_ms * capped_index as u32
    }
}
