//! Drag samples in, percentage/direction/duration out.

use std::time::Duration;

use swipe_core::Vec2;

use crate::config::{DURATION_HIGH_LIMIT, DURATION_LOW_LIMIT};
use crate::slots::SlotSide;

/// Which way the content has moved from rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Center,
}

impl SwipeDirection {
    /// Side of the row this motion points toward.
    pub fn toward_side(self) -> Option<SlotSide> {
        match self {
            SwipeDirection::Right => Some(SlotSide::Right),
            SwipeDirection::Left => Some(SlotSide::Left),
            SwipeDirection::Center => None,
        }
    }

    /// +1, -1 or 0.
    pub fn sign(self) -> f32 {
        match self {
            SwipeDirection::Right => 1.0,
            SwipeDirection::Left => -1.0,
            SwipeDirection::Center => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One sample from a pan recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanGesture {
    pub phase: PanPhase,
    /// Movement since the previous sample.
    pub translation: Vec2,
    /// Pointer velocity in px/s.
    pub velocity: Vec2,
}

impl PanGesture {
    pub fn began(translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase: PanPhase::Began,
            translation,
            velocity,
        }
    }

    pub fn changed(translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase: PanPhase::Changed,
            translation,
            velocity,
        }
    }

    pub fn ended(velocity: Vec2) -> Self {
        Self {
            phase: PanPhase::Ended,
            translation: Vec2::ZERO,
            velocity,
        }
    }

    pub fn cancelled(velocity: Vec2) -> Self {
        Self {
            phase: PanPhase::Cancelled,
            translation: Vec2::ZERO,
            velocity,
        }
    }
}

/// Per-gesture drag bookkeeping owned by the row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    /// Horizontal displacement of the content snapshot, px.
    pub offset: f32,
    pub dragging: bool,
    /// A release animation or its cleanup is still pending.
    pub exiting: bool,
}

impl DragState {
    /// Adds the horizontal part of a sample. Vertical motion is ignored.
    pub fn apply(&mut self, translation: Vec2) {
        self.offset += translation.x;
    }

    pub fn percentage(&self, width: f32) -> f32 {
        percentage(self.offset, width)
    }

    pub fn reset(&mut self) {
        *self = DragState::default();
    }
}

/// `offset / width` clamped to `[-1, 1]`; 0 for a degenerate width.
pub fn percentage(offset: f32, width: f32) -> f32 {
    if width <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / width).clamp(-1.0, 1.0)
}

/// Inverse of [`percentage`], clamped to `[-width, width]`.
pub fn offset_for(percentage: f32, width: f32) -> f32 {
    let width = width.max(0.0);
    (percentage * width).clamp(-width, width)
}

pub fn direction_of(percentage: f32) -> SwipeDirection {
    if percentage < 0.0 {
        SwipeDirection::Left
    } else if percentage > 0.0 {
        SwipeDirection::Right
    } else {
        SwipeDirection::Center
    }
}

/// Release animation length: 0.35 s at rest down to 0.2 s at one row width
/// per second or faster.
pub fn animation_duration(velocity_x: f32, width: f32) -> Duration {
    let normalized = if width > 0.0 && velocity_x.is_finite() {
        velocity_x.clamp(-width, width) / width
    } else {
        0.0
    };
    let range = DURATION_HIGH_LIMIT - DURATION_LOW_LIMIT;
    let secs = (DURATION_HIGH_LIMIT + DURATION_LOW_LIMIT) - (normalized * range).abs();
    Duration::from_secs_f32(secs)
}

/// True while a release at `percentage` should not commit an action.
///
/// Exactly 0 counts as before the trigger, so a release at rest never
/// commits an action.
pub fn is_before_trigger(percentage: f32, first: f32) -> bool {
    percentage.abs() < first
}
