//! Pointer events → four-phase pan gesture stream.
//!
//! Tracks a single pointer. Once it travels past [`PAN_SLOP`] the host's
//! `should_begin` predicate decides whether this is a row swipe; a declined
//! pointer is left alone (e.g. for the list's vertical scroll) until it lifts.

use std::time::Duration;

use smallvec::SmallVec;
use swipe_core::{PointerButton, PointerEvent, PointerEventKind, PointerId, Vec2};
use web_time::Instant;

use crate::gesture::PanGesture;

/// Distance a pointer must travel before a pan is considered.
pub const PAN_SLOP: f32 = 10.0;

/// Only samples this recent contribute to velocity.
const HORIZON: Duration = Duration::from_millis(100);

/// No movement for this long means the pointer has stopped.
const ASSUME_STOPPED: Duration = Duration::from_millis(40);

/// Estimates pointer velocity from recent position samples.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[(Instant, Vec2); 16]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn add(&mut self, t: Instant, position: Vec2) {
        self.samples.push((t, position));
        self.samples
            .retain(|(st, _)| t.saturating_duration_since(*st) <= HORIZON);
    }

    /// Velocity in px/s, or zero if there is not enough recent motion.
    pub fn velocity(&self, now: Instant) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.first(), self.samples.last())
        else {
            return Vec2::ZERO;
        };
        if now.saturating_duration_since(t1) > ASSUME_STOPPED {
            return Vec2::ZERO;
        }
        let dt = t1.saturating_duration_since(t0).as_secs_f32();
        if dt <= 0.0 {
            return Vec2::ZERO;
        }
        (p1 - p0).scale(1.0 / dt)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PanState {
    Idle,
    Pressed {
        id: PointerId,
        start: Vec2,
    },
    Panning {
        id: PointerId,
        last: Vec2,
    },
    /// Host said no; ignore this pointer until it lifts.
    Declined {
        id: PointerId,
    },
}

#[derive(Clone, Debug)]
pub struct PanRecognizer {
    state: PanState,
    tracker: VelocityTracker,
    slop: f32,
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PanRecognizer {
    pub fn new() -> Self {
        Self {
            state: PanState::Idle,
            tracker: VelocityTracker::new(),
            slop: PAN_SLOP,
        }
    }

    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop.max(0.0);
        self
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, PanState::Panning { .. })
    }

    pub fn reset(&mut self) {
        self.state = PanState::Idle;
        self.tracker.reset();
    }

    /// Feeds one pointer event.
    ///
    /// `should_begin` receives the pointer's velocity when the slop is first
    /// exceeded (or its displacement if it moved too slowly to measure one).
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        should_begin: impl FnOnce(Vec2) -> bool,
    ) -> Option<PanGesture> {
        let pos = event.position;
        match (self.state, event.event) {
            (PanState::Idle, PointerEventKind::Down(PointerButton::Primary)) => {
                self.tracker.reset();
                self.tracker.add(now, pos);
                self.state = PanState::Pressed {
                    id: event.id,
                    start: pos,
                };
                None
            }
            (PanState::Pressed { id, start }, PointerEventKind::Move) if id == event.id => {
                self.tracker.add(now, pos);
                let moved = pos - start;
                if moved.length() <= self.slop {
                    return None;
                }
                let velocity = self.tracker.velocity(now);
                let hint = if velocity == Vec2::ZERO { moved } else { velocity };
                if should_begin(hint) {
                    log::trace!("pan began at {pos:?}, v = {velocity:?}");
                    self.state = PanState::Panning { id, last: pos };
                    Some(PanGesture::began(moved, velocity))
                } else {
                    log::trace!("pan declined, v = {hint:?}");
                    self.state = PanState::Declined { id };
                    None
                }
            }
            (PanState::Panning { id, last }, PointerEventKind::Move) if id == event.id => {
                self.tracker.add(now, pos);
                self.state = PanState::Panning { id, last: pos };
                Some(PanGesture::changed(pos - last, self.tracker.velocity(now)))
            }
            (PanState::Panning { id, last }, PointerEventKind::Up(_)) if id == event.id => {
                if pos != last {
                    self.tracker.add(now, pos);
                }
                let velocity = self.tracker.velocity(now);
                log::trace!("pan ended, v = {velocity:?}");
                self.reset();
                Some(PanGesture::ended(velocity))
            }
            (PanState::Panning { id, .. }, PointerEventKind::Cancel) if id == event.id => {
                let velocity = self.tracker.velocity(now);
                log::trace!("pan cancelled");
                self.reset();
                Some(PanGesture::cancelled(velocity))
            }
            (
                PanState::Pressed { id, .. } | PanState::Declined { id },
                PointerEventKind::Up(_) | PointerEventKind::Cancel,
            ) if id == event.id => {
                self.reset();
                None
            }
            _ => None,
        }
    }
}
