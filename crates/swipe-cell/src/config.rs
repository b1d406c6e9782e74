use std::time::Duration;

use swipe_core::Color;

use crate::error::{ConfigError, Result};

/// Settle time for a release with no horizontal velocity.
pub const DURATION_LOW_LIMIT: f32 = 0.25;
/// Settle time for a release at (or above) one row width per second.
pub const DURATION_HIGH_LIMIT: f32 = 0.1;
/// Spring used when the row bounces back.
pub const BOUNCE_DAMPING: f32 = 0.5;
pub const BOUNCE_INITIAL_VELOCITY: f32 = 0.7;
/// Delay between a fired action and overlay teardown, leaving room for the
/// host's row-removal animation.
pub const CLEANUP_DELAY: Duration = Duration::from_millis(300);

/// Four ascending fractions of the row width, shared by both directions.
///
/// Slot rank N on a side activates once the drag passes trigger N
/// (rank 1 activates as soon as the drag heads that way; its trigger only
/// decides whether releasing commits the action).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerThresholds {
    first: f32,
    second: f32,
    third: f32,
    fourth: f32,
}

impl Default for TriggerThresholds {
    fn default() -> Self {
        Self {
            first: 0.15,
            second: 0.35,
            third: 0.55,
            fourth: 0.75,
        }
    }
}

impl TriggerThresholds {
    /// Validates `0 < first < second < third < fourth <= 1`.
    pub fn new(first: f32, second: f32, third: f32, fourth: f32) -> Result<Self> {
        let values = [first, second, third, fourth];
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { index: index + 1 });
            }
            if value <= 0.0 || value > 1.0 {
                return Err(ConfigError::OutOfRange {
                    index: index + 1,
                    value,
                });
            }
        }
        for (i, pair) in values.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ConfigError::NotAscending {
                    index: i + 2,
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self {
            first,
            second,
            third,
            fourth,
        })
    }

    pub fn first(&self) -> f32 {
        self.first
    }
    pub fn second(&self) -> f32 {
        self.second
    }
    pub fn third(&self) -> f32 {
        self.third
    }
    pub fn fourth(&self) -> f32 {
        self.fourth
    }

    /// Threshold a drag must reach for slot `rank` (1..=4). Rank 1 needs
    /// nothing beyond heading in its direction.
    pub fn activation(&self, rank: u8) -> f32 {
        match rank {
            2 => self.second,
            3 => self.third,
            4 => self.fourth,
            _ => 0.0,
        }
    }
}

/// Host-tunable behavior of a row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    pub triggers: TriggerThresholds,
    /// Indicator fill shown before the first trigger (and when no slot applies).
    pub default_color: Color,
    /// When false, gesture input is ignored entirely.
    pub should_drag: bool,
    /// When false, the icon floats at a fixed spot instead of following the drag.
    pub should_animate_icons: bool,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            triggers: TriggerThresholds::default(),
            default_color: Color::LIGHT_GRAY,
            should_drag: true,
            should_animate_icons: true,
        }
    }
}

impl SwipeConfig {
    pub fn with_triggers(mut self, triggers: TriggerThresholds) -> Self {
        self.triggers = triggers;
        self
    }

    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    pub fn with_drag(mut self, enabled: bool) -> Self {
        self.should_drag = enabled;
        self
    }

    pub fn with_icon_animation(mut self, enabled: bool) -> Self {
        self.should_animate_icons = enabled;
        self
    }
}
